//! Full rebuild of the release index from its inputs

use log::{debug, warn};

use crate::classify::{classify_section, ReleaseNote};
use crate::config::{Config, MalformedPolicy};
use crate::dates::DateIndex;
use crate::error::ClassifyError;
use crate::group::{assemble, ReleaseGroup};
use crate::segment::segment;
use crate::token::parse_to_ast;

/// Build the grouped release index from changelog text and a date index
///
/// The result depends only on the arguments; callers decide when to rebuild.
/// Sections that cannot be classified either fail the build or are skipped,
/// per `config.classify.on_malformed`.
pub fn build_release_groups(
    text: &str,
    dates: &DateIndex,
    config: &Config,
) -> Result<Vec<ReleaseGroup>, ClassifyError> {
    let sections = segment(parse_to_ast(text));
    debug!("segmented changelog into {} release sections", sections.len());

    let mut notes: Vec<ReleaseNote> = Vec::new();
    for section in sections {
        match classify_section(section, dates, &config.article) {
            Ok(section_notes) => notes.extend(section_notes),
            Err(err) => match config.classify.on_malformed {
                MalformedPolicy::Abort => return Err(err),
                MalformedPolicy::Skip => warn!("skipping release section: {err}"),
            },
        }
    }

    let groups = assemble(notes);
    for group in &groups {
        debug!("{}: {} releases", group.library, group.releases.len());
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;

    const CHANGELOG: &str = "# Changelog\n\
\n\
Intro text.\n\
\n\
## effector 21.8.0\n\
\n\
- Fix a bug\n\
\n\
## effector-react 21.3.0\n\
\n\
React fix.\n\
\n\
## effector-vue next\n\
\n\
Unreleased.\n\
\n\
## 20.0.0\n\
\n\
Old release.\n";

    #[test]
    fn test_abort_on_malformed_section() {
        let result = build_release_groups(CHANGELOG, &DateIndex::default(), &Config::default());
        assert!(matches!(
            result,
            Err(ClassifyError::MissingVersion {
                library: Library::Vue,
                ..
            })
        ));
    }

    #[test]
    fn test_skip_malformed_section() -> Result<(), ClassifyError> {
        let mut config = Config::default();
        config.classify.on_malformed = MalformedPolicy::Skip;

        let groups = build_release_groups(CHANGELOG, &DateIndex::default(), &config)?;
        assert_eq!(groups.len(), 3);

        let effector: Vec<_> = groups[0].releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(effector, vec!["21.8.0", "20.0.0"]);
        assert_eq!(groups[1].releases.len(), 1);
        assert!(groups[2].releases.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_document() -> Result<(), ClassifyError> {
        let groups = build_release_groups("", &DateIndex::default(), &Config::default())?;
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.releases.is_empty()));
        Ok(())
    }
}
