//! Interchange formats: JSON and CSV export, JSON import decode.
//!
//! The layouts are a compatibility contract: column order, CRLF
//! terminators, and quoting are fixed.

use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::validate;
use chrono::SecondsFormat;
use serde_json::Value;

pub const CSV_HEADER: &str = "id,title,author,pages,tag,dateAdded,isbn,notes,createdAt,updatedAt";

/// Full records array, pretty-printed with 2-space indentation.
pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(VaultError::Serialization)
}

/// CSV with a fixed header row and CRLF line terminators. Fields containing
/// a comma, double quote, or newline are wrapped in double quotes with inner
/// quotes doubled; absent optional values render as empty strings.
pub fn to_csv(records: &[Record]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        let fields = [
            record.id.clone(),
            record.title.clone(),
            record.author.clone(),
            record.pages.to_string(),
            record.tag.clone(),
            record.date_added.to_string(),
            record.isbn.clone(),
            record.notes.clone(),
            record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            record
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        lines.push(row.join(","));
    }
    lines.join("\r\n")
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Decode an import payload into records. Runs [`validate::validate_import`]
/// first, then the typed per-item decode; every violation from either stage
/// is collected so the source file can be fixed in one pass.
pub fn decode_records(data: &Value) -> std::result::Result<Vec<Record>, Vec<String>> {
    let check = validate::validate_import(data);
    if !check.valid {
        return Err(check.errors);
    }

    // validate_import guarantees an array here
    let items = data.as_array().cloned().unwrap_or_default();
    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Record>(item) {
            Ok(record) => records.push(record),
            Err(e) => errors.push(format!("Item {i}: {e}.")),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}
