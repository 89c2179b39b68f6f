//! Changelog source document

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// The Markdown changelog as loaded from disk
#[derive(Clone, Debug)]
pub struct Changelog {
    pub path: PathBuf,
    pub text: String,
    pub loaded_mtime: Option<SystemTime>,
    pub rev: u64,
}

impl Changelog {
    /// Load a changelog from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let text = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;

        let mtime = fs::metadata(&abs_path).and_then(|m| m.modified()).ok();

        Ok(Self {
            path: abs_path,
            text,
            loaded_mtime: mtime,
            rev: 1,
        })
    }

    /// Reload the changelog from disk
    ///
    /// Returns whether the text changed; the revision only moves when it did.
    pub fn reload(&mut self) -> Result<bool> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to reload file: {}", self.path.display()))?;

        self.loaded_mtime = fs::metadata(&self.path).and_then(|m| m.modified()).ok();

        if text == self.text {
            return Ok(false);
        }

        self.text = text;
        self.rev += 1;
        Ok(true)
    }
}
