use super::Storage;
use crate::error::{Result, VaultError};
use crate::model::{Record, Settings};

/// In-memory storage for tests. Never touches the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Option<Vec<Record>>,
    settings: Option<Settings>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail, to exercise the durable-write
    /// error path.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(VaultError::Store("storage unavailable".to_string()));
        }
        Ok(())
    }
}

impl Storage for InMemoryStore {
    fn load_records(&self) -> Vec<Record> {
        self.records.clone().unwrap_or_default()
    }

    fn save_records(&mut self, records: &[Record]) -> Result<()> {
        self.check_writable()?;
        self.records = Some(records.to_vec());
        Ok(())
    }

    fn load_settings(&self) -> Settings {
        self.settings.clone().unwrap_or_default()
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.check_writable()?;
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_writable()?;
        self.records = None;
        self.settings = None;
        Ok(())
    }
}
