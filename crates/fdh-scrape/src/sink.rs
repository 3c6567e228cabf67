//! On-disk record sinks
//!
//! Whole-document JSON writes, tabular CSV writes, and the loader for the
//! unique-list file that is the durable handoff between the list and detail
//! phases. Each write is a single complete file so a crash never leaves a
//! partially appended artifact in an ambiguous state.

use crate::error::{Result, ScrapeError};
use crate::records::ProfileRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names used by the list phase.
pub mod list_files {
    /// Per-page batch, flat mode: `profiles_page_{n}.json` / `.csv`
    pub fn page(shard: Option<char>, page: u32, ext: &str) -> String {
        match shard {
            Some(key) => format!("profiles_{}_page_{}.{}", key, page, ext),
            None => format!("profiles_page_{}.{}", page, ext),
        }
    }

    /// Full pre-dedup accumulation
    pub const ALL_JSON: &str = "profiles_all.json";
    pub const ALL_CSV: &str = "profiles_all.csv";

    /// Deduplicated collection, the input contract for the detail phase
    pub const UNIQUE_JSON: &str = "profiles_unique.json";
    pub const UNIQUE_CSV: &str = "profiles_unique.csv";
}

/// File names used by the detail phase.
pub mod detail_files {
    /// Per-identity checkpoint
    pub fn identity(id: &str, ext: &str) -> String {
        format!("{}.{}", id, ext)
    }

    /// Consolidated output, issue order
    pub const ALL_JSON: &str = "profiles_details.json";
    pub const ALL_CSV: &str = "profiles_details.csv";
}

/// A results directory accepting JSON and CSV writes by file name.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    dir: PathBuf,
}

impl ResultsDir {
    /// Open (creating if needed) a results directory.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Absolute path of a file inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write a value as pretty-printed JSON.
    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.path(name);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "Wrote JSON file");
        Ok(path)
    }

    /// Write serializable rows as CSV with a header row.
    pub fn write_csv<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<PathBuf> {
        let path = self.path(name);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "Wrote CSV file");
        Ok(path)
    }

    /// Load a previously persisted JSON document.
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        load_json(&self.path(name))
    }
}

/// Load a JSON document from an arbitrary path.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|_| ScrapeError::MissingInput(path.to_path_buf()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load the unique profile list produced by the list phase.
pub fn load_profiles(path: &Path) -> Result<Vec<ProfileRecord>> {
    load_json(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::records::{ListRow, ProfileRecord};

    fn record(id: &str) -> ProfileRecord {
        ProfileRecord {
            id: id.to_string(),
            name: format!("name-{}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_json_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = ResultsDir::create(tmp.path().join("out")).unwrap();

        let records = vec![record("a"), record("b")];
        sink.write_json("profiles_unique.json", &records).unwrap();

        let loaded = load_profiles(&sink.path("profiles_unique.json")).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = ResultsDir::create(tmp.path()).unwrap();

        let rows: Vec<ListRow> = [record("a"), record("b")].iter().map(ListRow::from).collect();
        let path = sink.write_csv("profiles_unique.csv", &rows).unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Name,Title,Designation,Locations,PhoneNumbers"
        );
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn test_missing_input_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("profiles_unique.json");
        let err = load_profiles(&missing).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingInput(_)));
    }

    #[test]
    fn test_page_file_names() {
        assert_eq!(list_files::page(None, 3, "json"), "profiles_page_3.json");
        assert_eq!(list_files::page(Some('k'), 1, "csv"), "profiles_k_page_1.csv");
        assert_eq!(detail_files::identity("Abc123", "json"), "Abc123.json");
    }
}
