//! Release classification
//!
//! Each release section is attributed to one or more libraries based on its
//! heading text, and turned into one [`ReleaseNote`] per library.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dates::DateIndex;
use crate::error::ClassifyError;
use crate::library::Library;
use crate::slug::format_id;
use crate::token::{extract_text, ExtractOptions, Token};
use crate::version::{find_release_date, mentions, mentions_primary, version_after_name};

/// Size limits above which an article is flagged for compact display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// More body lines than this sets `many_lines`
    pub many_lines: usize,
    /// More body characters than this sets `large_article`
    pub large_article: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            many_lines: 25,
            large_article: 2000,
        }
    }
}

/// A single release of a single library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNote {
    pub version: String,
    pub release_id: String,
    /// Epoch milliseconds, or [`crate::version::UNRESOLVED_DATE`]
    pub date: i64,
    pub library: Library,
    /// Release body without its heading, shared by notes of the same section
    pub content: Arc<[Token]>,
    pub many_lines: bool,
    pub large_article: bool,
}

impl ReleaseNote {
    /// Release date, if the date index knows it
    pub fn resolved_date(&self) -> Option<i64> {
        (self.date >= 0).then_some(self.date)
    }
}

/// Line and character statistics of a release body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BodyStats {
    many_lines: bool,
    large_article: bool,
}

impl BodyStats {
    fn measure(body: &[Token], thresholds: &Thresholds) -> Self {
        let text = extract_text(body, &ExtractOptions::prose()).join("");
        let lines = text.split('\n').count();
        let chars = text.chars().count();
        Self {
            many_lines: lines > thresholds.many_lines,
            large_article: chars > thresholds.large_article,
        }
    }
}

/// Which libraries a release title is about, with the version of each
fn versions_in_title(title: &str) -> Result<Vec<(Library, String)>, ClassifyError> {
    let primary = mentions_primary(title);
    let react = mentions(Library::React, title);
    let vue = mentions(Library::Vue, title);

    match (primary, react, vue) {
        (true, false, false) => {
            let version = title.replacen(Library::Effector.package_name(), "", 1);
            Ok(vec![(Library::Effector, version.trim().to_string())])
        }
        // A bare version number heading
        (false, false, false) => Ok(vec![(Library::Effector, title.to_string())]),
        _ => Library::ALL
            .into_iter()
            .filter(|library| mentions(*library, title))
            .map(|library| {
                version_after_name(library, title)
                    .map(|version| (library, version.to_string()))
                    .ok_or_else(|| ClassifyError::MissingVersion {
                        library,
                        title: title.to_string(),
                    })
            })
            .collect(),
    }
}

/// Classify one release section (heading first, then body)
pub fn classify_section(
    section: Vec<Token>,
    dates: &DateIndex,
    thresholds: &Thresholds,
) -> Result<Vec<ReleaseNote>, ClassifyError> {
    let mut tokens = section.into_iter();
    let heading = tokens.next().ok_or(ClassifyError::MissingHeading)?;
    if heading.heading_level().is_none() {
        return Err(ClassifyError::MissingHeading);
    }

    let title = extract_text(std::slice::from_ref(&heading), &ExtractOptions::default()).join("");
    let versions = versions_in_title(&title)?;

    let content: Arc<[Token]> = tokens.collect();
    let stats = BodyStats::measure(&content, thresholds);

    let notes = versions
        .into_iter()
        .map(|(library, version)| {
            let package = library.package_name();
            ReleaseNote {
                release_id: format_id(&format!("{package} {version}")),
                date: find_release_date(dates, package, &version),
                version,
                library,
                content: Arc::clone(&content),
                many_lines: stats.many_lines,
                large_article: stats.large_article,
            }
        })
        .collect();

    Ok(notes)
}

/// Classify every section in order, stopping at the first malformed one
pub fn classify(
    sections: Vec<Vec<Token>>,
    dates: &DateIndex,
    thresholds: &Thresholds,
) -> Result<Vec<ReleaseNote>, ClassifyError> {
    let mut notes = Vec::new();
    for section in sections {
        notes.extend(classify_section(section, dates, thresholds)?);
    }
    Ok(notes)
}
