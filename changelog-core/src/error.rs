//! Classification errors

use thiserror::Error;

use crate::library::Library;

/// A release section whose title does not fit the classification rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The title mentions a library but carries no version after its name
    #[error("no {library} version found in release title {title:?}")]
    MissingVersion { library: Library, title: String },

    /// A section that does not start with a heading
    #[error("release section does not start with a heading")]
    MissingHeading,
}

impl ClassifyError {
    /// Title text of the offending section, if any
    pub fn title(&self) -> Option<&str> {
        match self {
            ClassifyError::MissingVersion { title, .. } => Some(title),
            ClassifyError::MissingHeading => None,
        }
    }
}
