use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One catalogued book. Field names on the wire are camelCase so the
/// persisted JSON and export payloads keep the original layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(deserialize_with = "de_pages")]
    pub pages: f64,
    pub tag: String,
    pub date_added: NaiveDate,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(id: String, draft: RecordDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            author: draft.author,
            pages: draft.pages,
            tag: draft.tag,
            date_added: draft.date_added,
            isbn: draft.isbn,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The user-supplied fields of a record, before the store assigns an id and
/// timestamps. Callers validate these before handing them to the vault.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub title: String,
    pub author: String,
    pub pages: f64,
    pub tag: String,
    pub date_added: NaiveDate,
    pub isbn: String,
    pub notes: String,
}

/// A partial update. Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<f64>,
    pub tag: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub isbn: Option<String>,
    pub notes: Option<String>,
}

impl RecordPatch {
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(author) = &self.author {
            record.author = author.clone();
        }
        if let Some(pages) = self.pages {
            record.pages = pages;
        }
        if let Some(tag) = &self.tag {
            record.tag = tag.clone();
        }
        if let Some(date) = self.date_added {
            record.date_added = date;
        }
        if let Some(isbn) = &self.isbn {
            record.isbn = isbn.clone();
        }
        if let Some(notes) = &self.notes {
            record.notes = notes.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.pages.is_none()
            && self.tag.is_none()
            && self.date_added.is_none()
            && self.isbn.is_none()
            && self.notes.is_none()
    }
}

// Import payloads come from a JS exporter where pages may be a bare number
// or a numeric string.
fn de_pages<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("\"pages\" not numeric: {:?}", s))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pages,
    Chapters,
    Percent,
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pages" => Ok(Unit::Pages),
            "chapters" => Ok(Unit::Chapters),
            "percent" => Ok(Unit::Percent),
            other => Err(format!("unknown unit: {other} (pages|chapters|percent)")),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Pages => write!(f, "pages"),
            Unit::Chapters => write!(f, "chapters"),
            Unit::Percent => write!(f, "percent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other} (light|dark)")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Process-wide display/goal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub page_cap: u32,
    pub unit: Unit,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_cap: 1000,
            unit: Unit::Pages,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Total merge of a stored JSON value over the defaults. Every field is
    /// assigned: a key that is missing or fails to decode keeps its default,
    /// without discarding the keys that did decode.
    pub fn merged_over_defaults(stored: Value) -> Self {
        let mut settings = Settings::default();
        if let Value::Object(map) = stored {
            if let Some(cap) = map.get("pageCap").and_then(|v| v.as_u64()) {
                if let Ok(cap) = u32::try_from(cap) {
                    settings.page_cap = cap;
                }
            }
            if let Some(unit) = map
                .get("unit")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
            {
                settings.unit = unit;
            }
            if let Some(theme) = map
                .get("theme")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
            {
                settings.theme = theme;
            }
        }
        settings
    }
}

/// A partial settings update, persisted after every patch.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub page_cap: Option<u32>,
    pub unit: Option<Unit>,
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(cap) = self.page_cap {
            settings.page_cap = cap;
        }
        if let Some(unit) = self.unit {
            settings.unit = unit;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
    }
}

/// The six catalogue orderings. An unrecognized key parses to `None`, which
/// the query treats as "leave the insertion order alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    PagesDesc,
    PagesAsc,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date-desc" => Some(SortKey::DateDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "title-asc" => Some(SortKey::TitleAsc),
            "title-desc" => Some(SortKey::TitleDesc),
            "pages-desc" => Some(SortKey::PagesDesc),
            "pages-asc" => Some(SortKey::PagesAsc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::PagesDesc => "pages-desc",
            SortKey::PagesAsc => "pages-asc",
        }
    }
}
