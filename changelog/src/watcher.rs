//! File watching for changelog and date index changes

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// File change event
#[derive(Debug, Clone)]
pub enum FileEvent {
    Changed(PathBuf),
}

/// Watches the pipeline inputs and debounces bursts of change events
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<FileEvent>,
    last_event: Option<Instant>,
}

impl FileWatcher {
    /// Create a watcher over the given files (absolute paths)
    pub fn new(paths: &[PathBuf]) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let watched: Vec<PathBuf> = paths.to_vec();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    for path in event.paths.iter().filter(|p| watched.contains(p)) {
                        let _ = tx.send(FileEvent::Changed(path.clone()));
                    }
                }
            }
        })
        .context("Failed to create file watcher")?;

        for path in paths {
            watcher
                .watch(path, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch file: {}", path.display()))?;

            // Editors that save through a rename replace the file in its directory
            if let Some(parent) = path.parent() {
                watcher
                    .watch(parent, RecursiveMode::NonRecursive)
                    .context("Failed to watch parent directory")?;
            }
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            last_event: None,
        })
    }

    /// Returns true once a change was seen and the debounce period has elapsed
    pub fn check_changed(&mut self, debounce_ms: u64) -> bool {
        while let Ok(FileEvent::Changed(path)) = self.receiver.try_recv() {
            log::debug!("change detected: {}", path.display());
            self.last_event = Some(Instant::now());
        }

        if let Some(last) = self.last_event {
            if last.elapsed() >= Duration::from_millis(debounce_ms) {
                self.last_event = None;
                return true;
            }
        }

        false
    }

    /// Check if there are pending events (not debounced yet)
    pub fn has_pending(&self) -> bool {
        self.last_event.is_some()
    }
}
