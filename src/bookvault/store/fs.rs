use super::Storage;
use crate::error::{Result, VaultError};
use crate::model::{Record, Settings};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const RECORDS_FILE: &str = "records.json";
const SETTINGS_FILE: &str = "settings.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        }
        Ok(())
    }

    fn write_json(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_root()?;
        fs::write(path, content).map_err(VaultError::Io)
    }
}

impl Storage for FileStore {
    fn load_records(&self) -> Vec<Record> {
        let path = self.records_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str::<Vec<Record>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("records slot unreadable, starting empty: {e}");
                Vec::new()
            }
        }
    }

    fn save_records(&mut self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(VaultError::Serialization)?;
        self.write_json(&self.records_path(), &content)
    }

    fn load_settings(&self) -> Settings {
        let path = self.settings_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Settings::default(),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Settings::merged_over_defaults(value),
            Err(e) => {
                warn!("settings slot unreadable, using defaults: {e}");
                Settings::default()
            }
        }
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings).map_err(VaultError::Serialization)?;
        self.write_json(&self.settings_path(), &content)
    }

    fn clear(&mut self) -> Result<()> {
        for path in [self.records_path(), self.settings_path()] {
            if path.exists() {
                fs::remove_file(path).map_err(VaultError::Io)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordDraft;
    use chrono::NaiveDate;

    fn sample_record(id: &str, title: &str) -> Record {
        Record::new(
            id.to_string(),
            RecordDraft {
                title: title.to_string(),
                author: "Some Author".into(),
                pages: 200.0,
                tag: "Fiction".into(),
                date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                isbn: String::new(),
                notes: String::new(),
            },
        )
    }

    #[test]
    fn records_roundtrip_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        let records = vec![sample_record("b1", "Beta"), sample_record("a1", "Alpha")];
        store.save_records(&records).unwrap();

        let loaded = store.load_records();
        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(store.load_records().is_empty());
        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn corrupt_records_fall_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RECORDS_FILE), "{not json").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_records().is_empty());
    }

    #[test]
    fn non_array_records_fall_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RECORDS_FILE), r#"{"id": "b1"}"#).unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_records().is_empty());
    }

    #[test]
    fn partial_settings_are_merged_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), r#"{"pageCap": 250}"#).unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        let settings = store.load_settings();
        assert_eq!(settings.page_cap, 250);
        assert_eq!(settings, Settings { page_cap: 250, ..Settings::default() });
    }

    #[test]
    fn clear_removes_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save_records(&[sample_record("a1", "Alpha")]).unwrap();
        store.save_settings(&Settings::default()).unwrap();

        store.clear().unwrap();
        assert!(!dir.path().join(RECORDS_FILE).exists());
        assert!(!dir.path().join(SETTINGS_FILE).exists());
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }
}
