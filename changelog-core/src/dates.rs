//! Release date index

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One row of the date index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDate {
    /// Package name, e.g. `effector-react`
    pub library: String,
    pub version: String,
    /// Release time in epoch milliseconds
    pub date: i64,
}

/// TOML layout: a `[[release]]` table per record
#[derive(Debug, Deserialize)]
struct TomlDates {
    #[serde(default)]
    release: Vec<VersionDate>,
}

/// Lookup table from (library, version) to release date
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    dates: HashMap<(String, String), i64>,
}

impl DateIndex {
    /// Build the index; the first record wins when a version is listed twice
    pub fn from_records(records: Vec<VersionDate>) -> Self {
        let mut dates = HashMap::with_capacity(records.len());
        for record in records {
            dates
                .entry((record.library, record.version))
                .or_insert(record.date);
        }
        Self { dates }
    }

    /// Load the index from a JSON array, or from TOML when the extension is `.toml`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read date index: {}", path.display()))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let records = if is_toml {
            toml::from_str::<TomlDates>(&content)
                .with_context(|| format!("Failed to parse date index: {}", path.display()))?
                .release
        } else {
            serde_json::from_str::<Vec<VersionDate>>(&content)
                .with_context(|| format!("Failed to parse date index: {}", path.display()))?
        };

        log::debug!("loaded {} release dates from {}", records.len(), path.display());

        Ok(Self::from_records(records))
    }

    /// Release date of an exact library version
    pub fn lookup(&self, library: &str, version: &str) -> Option<i64> {
        self.dates
            .get(&(library.to_string(), version.to_string()))
            .copied()
    }

    /// Number of distinct (library, version) entries
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn record(library: &str, version: &str, date: i64) -> VersionDate {
        VersionDate {
            library: library.to_string(),
            version: version.to_string(),
            date,
        }
    }

    #[test]
    fn test_lookup() {
        let index = DateIndex::from_records(vec![
            record("effector", "21.8.0", 10),
            record("effector-vue", "21.8.0", 20),
        ]);
        assert_eq!(index.lookup("effector", "21.8.0"), Some(10));
        assert_eq!(index.lookup("effector-vue", "21.8.0"), Some(20));
        assert_eq!(index.lookup("effector-react", "21.8.0"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_first_record_wins() {
        let index = DateIndex::from_records(vec![
            record("effector", "1.0.0", 1),
            record("effector", "1.0.0", 2),
        ]);
        assert_eq!(index.lookup("effector", "1.0.0"), Some(1));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_load_json() -> Result<()> {
        let mut file = Builder::new().suffix(".json").tempfile()?;
        file.write_all(
            br#"[{"library":"effector","version":"21.8.0","date":1612137600000}]"#,
        )?;

        let index = DateIndex::load(file.path())?;
        assert_eq!(index.lookup("effector", "21.8.0"), Some(1_612_137_600_000));

        Ok(())
    }

    #[test]
    fn test_load_toml() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        file.write_all(
            b"[[release]]\n\
library = \"effector-react\"\n\
version = \"21.3.0\"\n\
date = 1612137600000\n",
        )?;

        let index = DateIndex::load(file.path())?;
        assert_eq!(
            index.lookup("effector-react", "21.3.0"),
            Some(1_612_137_600_000)
        );

        Ok(())
    }

    #[test]
    fn test_load_empty_toml() -> Result<()> {
        let file = Builder::new().suffix(".toml").tempfile()?;
        let index = DateIndex::load(file.path())?;
        assert!(index.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_invalid_returns_error() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{not json").unwrap();

        assert!(DateIndex::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        assert!(DateIndex::load(Path::new("/nonexistent/dates.json")).is_err());
    }
}
