//! # Storage Layer
//!
//! Storage abstraction for the vault. The [`Storage`] trait keeps the record
//! store decoupled from persistence details and lets tests run against an
//! in-memory backend.
//!
//! Two independent durable slots are kept: the records collection and the
//! settings object, each a pretty-printed JSON value.
//!
//! ## Contract
//!
//! - Loads are defensive: absent, corrupt, or wrong-shaped data falls back
//!   to the safe default (empty collection / default settings) and never
//!   propagates as a crash.
//! - Saves are not: a failed write must surface as an error to the caller,
//!   never be swallowed, so the vault can keep memory and disk in step.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, `records.json` and
//!   `settings.json` under the data directory
//! - [`memory::InMemoryStore`]: test storage, with a write-failure toggle
//!   for exercising the durable-write error path

use crate::error::Result;
use crate::model::{Record, Settings};

pub mod fs;
pub mod memory;

pub trait Storage {
    /// Load the records collection. Corruption degrades to empty.
    fn load_records(&self) -> Vec<Record>;

    /// Persist the full records collection. Errors propagate.
    fn save_records(&mut self, records: &[Record]) -> Result<()>;

    /// Load settings, merged over defaults so no field is ever missing.
    fn load_settings(&self) -> Settings;

    /// Persist the settings object. Errors propagate.
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Remove both slots.
    fn clear(&mut self) -> Result<()>;
}
