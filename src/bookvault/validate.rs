//! Field validation for vault records.
//!
//! One pure function per field, taking the raw (untrimmed) input. Blocking
//! rules return a [`FieldCheck`]; the notes rule only ever warns.
//!
//! Rules, in check order (first failing rule wins):
//! - title: required, no leading/trailing spaces, no consecutive spaces,
//!   not entirely uppercase
//! - author: required, same whitespace rules, no immediately-repeated word
//! - pages: required, non-negative number with up to 2 decimals, 1..=99999
//! - date: required, strict `YYYY-MM-DD`, must be a real calendar date
//! - tag: required, alphabetic words separated by single spaces or hyphens
//! - isbn: optional; 10-digit (last may be `X`) or 13-digit, with optional
//!   single space/hyphen separators
//! - notes: adjacent duplicate word is reported as a non-blocking warning

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

static RE_PAGES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0|[1-9]\d*)(\.\d{1,2})?$").unwrap());
static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").unwrap());
static RE_ISBN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d[\s-]?){9}[\dX]$|^(?:\d[\s-]?){13}$").unwrap());

/// Outcome of a blocking field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub valid: bool,
    pub message: String,
}

impl FieldCheck {
    fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Outcome of the notes rule. Never blocks a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesCheck {
    pub warn: bool,
    pub message: String,
}

pub fn validate_title(value: &str) -> FieldCheck {
    if value.trim().is_empty() {
        return FieldCheck::fail("Title is required.");
    }
    if value != value.trim() {
        return FieldCheck::fail("No leading or trailing spaces.");
    }
    if value.contains("  ") {
        return FieldCheck::fail("No consecutive spaces.");
    }
    if is_all_uppercase(value) {
        return FieldCheck::fail("Title must not be entirely uppercase.");
    }
    FieldCheck::pass()
}

pub fn validate_author(value: &str) -> FieldCheck {
    if value.trim().is_empty() {
        return FieldCheck::fail("Author is required.");
    }
    if value != value.trim() {
        return FieldCheck::fail("No leading or trailing spaces.");
    }
    if value.contains("  ") {
        return FieldCheck::fail("No consecutive spaces.");
    }
    if let Some(phrase) = find_duplicate_word(value) {
        return FieldCheck::fail(format!(
            "Author name contains a duplicated word: \"{phrase}\"."
        ));
    }
    FieldCheck::pass()
}

pub fn validate_pages(value: &str) -> FieldCheck {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("Pages is required.");
    }
    if !RE_PAGES.is_match(trimmed) {
        return FieldCheck::fail("Must be a positive number (e.g. 312).");
    }
    let n: f64 = match trimmed.parse() {
        Ok(n) => n,
        Err(_) => return FieldCheck::fail("Must be a positive number (e.g. 312)."),
    };
    if n < 1.0 {
        return FieldCheck::fail("Must be at least 1.");
    }
    if n > 99999.0 {
        return FieldCheck::fail("Exceeds maximum (99999).");
    }
    FieldCheck::pass()
}

pub fn validate_date(value: &str) -> FieldCheck {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("Date is required.");
    }
    if !RE_DATE.is_match(trimmed) {
        return FieldCheck::fail("Use YYYY-MM-DD format (e.g. 2024-03-15).");
    }
    if chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
        return FieldCheck::fail("Not a valid calendar date.");
    }
    FieldCheck::pass()
}

pub fn validate_tag(value: &str) -> FieldCheck {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("Tag is required.");
    }
    if !RE_TAG.is_match(trimmed) {
        return FieldCheck::fail("Letters, spaces, or hyphens only (e.g. \"Sci-Fi\").");
    }
    FieldCheck::pass()
}

pub fn validate_isbn(value: &str) -> FieldCheck {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldCheck::pass();
    }
    if !RE_ISBN.is_match(trimmed) {
        return FieldCheck::fail("Unrecognised ISBN format.");
    }
    FieldCheck::pass()
}

pub fn warn_duplicate_words(value: &str) -> NotesCheck {
    match find_duplicate_word(value) {
        Some(phrase) => NotesCheck {
            warn: true,
            message: format!("Duplicate word: \"{phrase}\""),
        },
        None => NotesCheck {
            warn: false,
            message: String::new(),
        },
    }
}

// Only immediately adjacent repeats count ("the the"), never repeats
// elsewhere in the text. Whole whitespace-separated tokens are compared
// case-insensitively.
fn find_duplicate_word(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    for pair in words.windows(2) {
        if pair[0].to_lowercase() == pair[1].to_lowercase() {
            return Some(format!("{} {}", pair[0], pair[1]));
        }
    }
    None
}

// The original pattern rejects any string made of nothing but uppercase
// letters and whitespace.
fn is_all_uppercase(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

/// Raw text of every record field, as entered.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub date_added: String,
    pub tag: String,
    pub isbn: String,
    pub notes: String,
}

/// Composite result of running all seven validators.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub title: FieldCheck,
    pub author: FieldCheck,
    pub pages: FieldCheck,
    pub date_added: FieldCheck,
    pub tag: FieldCheck,
    pub isbn: FieldCheck,
    pub notes: NotesCheck,
    pub all_valid: bool,
}

/// Runs every validator. `all_valid` covers the six blocking fields; notes
/// warnings never affect it.
pub fn validate_all(fields: &RawFields) -> ValidationReport {
    let title = validate_title(&fields.title);
    let author = validate_author(&fields.author);
    let pages = validate_pages(&fields.pages);
    let date_added = validate_date(&fields.date_added);
    let tag = validate_tag(&fields.tag);
    let isbn = validate_isbn(&fields.isbn);
    let notes = warn_duplicate_words(&fields.notes);
    let all_valid = title.valid
        && author.valid
        && pages.valid
        && date_added.valid
        && tag.valid
        && isbn.valid;
    ValidationReport {
        title,
        author,
        pages,
        date_added,
        tag,
        isbn,
        notes,
        all_valid,
    }
}

/// Compiles a search pattern. Blank input means "no pattern"; so does a
/// pattern the engine rejects. The search box must never throw.
pub fn compile_regex(input: &str, case_sensitive: bool) -> Option<Regex> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(trimmed)
        .case_insensitive(!case_sensitive)
        .build()
        .ok()
}

/// Attempts compilation and surfaces the engine's own syntax message, so the
/// caller can show why a pattern was ignored.
pub fn validate_regex_pattern(input: &str) -> FieldCheck {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return FieldCheck::pass();
    }
    match Regex::new(trimmed) {
        Ok(_) => FieldCheck::pass(),
        Err(e) => FieldCheck::fail(format!("Invalid regex: {e}")),
    }
}

const REQUIRED_KEYS: [&str; 8] = [
    "id",
    "title",
    "author",
    "pages",
    "tag",
    "dateAdded",
    "createdAt",
    "updatedAt",
];

/// Outcome of checking an import payload. Every violation is collected, not
/// just the first, so the source file can be fixed in one pass.
#[derive(Debug, Clone)]
pub struct ImportCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_import(data: &Value) -> ImportCheck {
    let items = match data.as_array() {
        Some(items) => items,
        None => {
            return ImportCheck {
                valid: false,
                errors: vec!["Must be a JSON array.".into()],
            }
        }
    };
    if items.is_empty() {
        return ImportCheck {
            valid: false,
            errors: vec!["Array is empty.".into()],
        };
    }

    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let obj = match item.as_object() {
            Some(obj) => obj,
            None => {
                errors.push(format!("Item {i}: not an object."));
                continue;
            }
        };
        for key in REQUIRED_KEYS {
            if !obj.contains_key(key) {
                errors.push(format!("Item {i}: missing \"{key}\"."));
            }
        }
        if let Some(pages) = obj.get("pages") {
            if !pages.is_null() && !is_numeric_like(pages) {
                errors.push(format!("Item {i}: \"pages\" not numeric."));
            }
        }
    }

    ImportCheck {
        valid: errors.is_empty(),
        errors,
    }
}

fn is_numeric_like(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
        }
        _ => false,
    }
}
