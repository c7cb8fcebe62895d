//! The authoritative record store.
//!
//! [`Vault`] owns the in-memory collection and settings, and is generic over
//! [`Storage`] so tests run against `InMemoryStore` while production uses
//! `FileStore`. All mutations persist before they commit: the successor
//! collection is written to storage first and only adopted in memory once
//! the write succeeds, so a failed write leaves both sides unchanged.
//!
//! Callers are responsible for validating input before mutating; see
//! [`crate::validate`]. The vault itself never prompts or blocks; approval
//! for destructive operations happens upstream.

use crate::error::Result;
use crate::model::{Record, RecordDraft, RecordPatch, Settings, SettingsPatch, SortKey};
use crate::store::Storage;
use chrono::Utc;
use regex::Regex;
use tracing::debug;

/// Ephemeral view state: search pattern, tag filter, sort key. Not
/// persisted; resets to defaults on every startup.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub pattern: Option<Regex>,
    pub tag: String,
    pub sort: Option<SortKey>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            pattern: None,
            tag: String::new(),
            sort: Some(SortKey::DateDesc),
        }
    }
}

pub struct Vault<S: Storage> {
    store: S,
    records: Vec<Record>,
    settings: Settings,
    query: QueryState,
    id_seq: u32,
}

impl<S: Storage> Vault<S> {
    /// Load both slots from storage and start with default view state.
    pub fn open(store: S) -> Self {
        let records = store.load_records();
        let settings = store.load_settings();
        Self {
            store,
            records,
            settings,
            query: QueryState::default(),
            id_seq: 0,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a new record. The draft must already satisfy the blocking
    /// validation rules; the vault assigns the id and timestamps.
    pub fn create(&mut self, draft: RecordDraft) -> Result<Record> {
        let record = Record::new(self.generate_id(), draft);
        let mut next = self.records.clone();
        next.push(record.clone());
        self.store.save_records(&next)?;
        self.records = next;
        debug!("created record {}", record.id);
        Ok(record)
    }

    /// Merge a partial patch onto the record with the given id. Returns
    /// `Ok(false)` when no such record exists.
    pub fn update(&mut self, id: &str, patch: &RecordPatch) -> Result<bool> {
        let pos = match self.records.iter().position(|r| r.id == id) {
            Some(pos) => pos,
            None => return Ok(false),
        };
        let mut next = self.records.clone();
        patch.apply_to(&mut next[pos]);
        next[pos].updated_at = Utc::now();
        self.store.save_records(&next)?;
        self.records = next;
        debug!("updated record {id}");
        Ok(true)
    }

    /// Remove the record with the given id. Returns `Ok(false)` when no
    /// such record exists.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.records.iter().any(|r| r.id == id) {
            return Ok(false);
        }
        let next: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        self.store.save_records(&next)?;
        self.records = next;
        debug!("deleted record {id}");
        Ok(true)
    }

    /// Overwrite the entire collection. Used for import and clear-all;
    /// the caller pre-validates the replacement set and has already
    /// obtained confirmation.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        self.store.save_records(&records)?;
        self.records = records;
        Ok(())
    }

    /// Remove both durable slots and reset memory to defaults.
    pub fn erase_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.records.clear();
        self.settings = Settings::default();
        Ok(())
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<()> {
        let mut next = self.settings.clone();
        patch.apply_to(&mut next);
        self.store.save_settings(&next)?;
        self.settings = next;
        Ok(())
    }

    pub fn set_search_pattern(&mut self, pattern: Option<Regex>) {
        self.query.pattern = pattern;
    }

    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.query.tag = tag.into();
    }

    pub fn set_sort_key(&mut self, sort: Option<SortKey>) {
        self.query.sort = sort;
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    /// Give the storage backend back, dropping the vault. Lets tests reopen
    /// the same backend to check what was durably written.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The filtered-then-sorted read-only projection: tag filter first,
    /// then the search pattern over title/author/tag/notes, then the active
    /// sort. Never reorders the underlying collection.
    pub fn query(&self) -> Vec<&Record> {
        let mut out: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| {
                if !self.query.tag.is_empty() && r.tag != self.query.tag {
                    return false;
                }
                match &self.query.pattern {
                    Some(re) => re.is_match(&search_text(r)),
                    None => true,
                }
            })
            .collect();
        if let Some(sort) = self.query.sort {
            // sort_by is stable, so equal keys keep their relative order
            out.sort_by(|a, b| compare(sort, a, b));
        }
        out
    }

    /// Distinct non-empty tags across all records, alphabetically sorted.
    pub fn unique_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .records
            .iter()
            .filter(|r| !r.tag.is_empty())
            .map(|r| r.tag.clone())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    // A coarse time component plus an in-process counter: two creates in
    // the same millisecond never collide, and distinct runs land on
    // distinct milliseconds in practice.
    fn generate_id(&mut self) -> String {
        self.id_seq += 1;
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        format!("book_{}_{:04}", base36(millis), self.id_seq)
    }
}

fn search_text(record: &Record) -> String {
    format!(
        "{} {} {} {}",
        record.title, record.author, record.tag, record.notes
    )
}

fn compare(sort: SortKey, a: &Record, b: &Record) -> std::cmp::Ordering {
    match sort {
        SortKey::DateDesc => b.date_added.cmp(&a.date_added),
        SortKey::DateAsc => a.date_added.cmp(&b.date_added),
        SortKey::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        SortKey::PagesDesc => b.pages.total_cmp(&a.pages),
        SortKey::PagesAsc => a.pages.total_cmp(&b.pages),
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
