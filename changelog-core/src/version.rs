//! Version extraction and release date resolution
//!
//! Every text pattern used by classification lives here behind a named
//! function, so each can be checked against literal strings.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dates::DateIndex;
use crate::library::Library;

/// Date value for releases missing from the date index
pub const UNRESOLVED_DATE: i64 = -1;

/// `MAJOR.MINOR.PATCH` with an optional `-<prerelease>` suffix
static SEMVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+(?:-[a-z]+[a-z0-9.]*)?").expect("valid semver regex"));

/// `effector` not directly followed by a hyphen (so not `effector-react`)
static PRIMARY_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"effector(?:[^-]|$)").expect("valid primary regex"));

static PRIMARY_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"effector[^-].*?(\d+\.\d+\.\d+(?:-\d+\.\d+\.\d+)?)").expect("valid primary regex")
});

static REACT_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"effector-react.*?(\d+\.\d+\.\d+)").expect("valid react regex"));

static VUE_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"effector-vue.*?(\d+\.\d+\.\d+)").expect("valid vue regex"));

/// All version numbers embedded in `text`, left to right
pub fn semver_candidates(text: &str) -> Vec<&str> {
    SEMVER.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether `title` mentions the primary library on its own
pub fn mentions_primary(title: &str) -> bool {
    PRIMARY_MENTION.is_match(title)
}

/// Whether `title` mentions `library`
pub fn mentions(library: Library, title: &str) -> bool {
    match library {
        Library::Effector => mentions_primary(title),
        Library::React | Library::Vue => title.contains(library.package_name()),
    }
}

/// The first version number following the library name in `title`
///
/// The primary library also accepts a `-MAJOR.MINOR.PATCH` build suffix.
pub fn version_after_name(library: Library, title: &str) -> Option<&str> {
    let pattern = match library {
        Library::Effector => &*PRIMARY_VERSION,
        Library::React => &*REACT_VERSION,
        Library::Vue => &*VUE_VERSION,
    };
    pattern
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Find the release date for a library version
///
/// `version` may embed several version numbers; they are tried left to right
/// and the first one present in the index wins. Returns [`UNRESOLVED_DATE`]
/// when none of them is known.
pub fn find_release_date(index: &DateIndex, library: &str, version: &str) -> i64 {
    let candidates = semver_candidates(version);
    if candidates.is_empty() {
        warn!("no version number found in {library} {version:?}");
    }

    for candidate in candidates {
        match index.lookup(library, candidate) {
            Some(date) => return date,
            None => warn!("no version info found for {library} {candidate}"),
        }
    }

    UNRESOLVED_DATE
}
