//! The fixed family of libraries covered by the changelog

use serde::{Deserialize, Serialize};
use std::fmt;

/// A library whose releases are documented in the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    /// The primary library
    Effector,
    /// React bindings
    React,
    /// Vue bindings
    Vue,
}

impl Library {
    /// All libraries, in group order
    pub const ALL: [Library; 3] = [Library::Effector, Library::React, Library::Vue];

    /// Internal key
    pub fn key(&self) -> &'static str {
        match self {
            Library::Effector => "effector",
            Library::React => "react",
            Library::Vue => "vue",
        }
    }

    /// Published package name, used for display, anchors and date lookups
    pub fn package_name(&self) -> &'static str {
        match self {
            Library::Effector => "effector",
            Library::React => "effector-react",
            Library::Vue => "effector-vue",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_order() {
        assert_eq!(
            Library::ALL,
            [Library::Effector, Library::React, Library::Vue]
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(Library::React.key(), "react");
        assert_eq!(Library::React.package_name(), "effector-react");
        assert_eq!(Library::Vue.to_string(), "effector-vue");
    }

    #[test]
    fn test_serializes_as_key() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Library::Vue)?, "\"vue\"");
        let parsed: Library = serde_json::from_str("\"effector\"")?;
        assert_eq!(parsed, Library::Effector);
        Ok(())
    }
}
