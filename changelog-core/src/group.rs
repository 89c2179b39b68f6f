//! Library groups of release notes

use serde::Serialize;

use crate::classify::ReleaseNote;
use crate::library::Library;
use crate::slug::format_id;

/// All releases of one library, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseGroup {
    /// Display name of the library
    pub library: String,
    pub group_id: String,
    pub releases: Vec<ReleaseNote>,
}

impl ReleaseGroup {
    fn empty(library: Library) -> Self {
        let name = library.package_name();
        Self {
            library: name.to_string(),
            group_id: format_id(name),
            releases: Vec::new(),
        }
    }
}

/// Partition notes into one group per library, in fixed library order
///
/// Every library gets a group, even without releases.
pub fn assemble(notes: Vec<ReleaseNote>) -> Vec<ReleaseGroup> {
    let mut groups: Vec<ReleaseGroup> = Library::ALL.into_iter().map(ReleaseGroup::empty).collect();

    for note in notes {
        let slot = match note.library {
            Library::Effector => 0,
            Library::React => 1,
            Library::Vue => 2,
        };
        groups[slot].releases.push(note);
    }

    groups
}
