use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::RecordDraft;
use crate::store::Storage;
use crate::validate::{self, RawFields};
use crate::vault::Vault;
use chrono::NaiveDate;

/// Validate the raw fields and, if every blocking rule passes, create the
/// record. Failures come back as field-level error messages and the store
/// is never touched.
pub fn run<S: Storage>(vault: &mut Vault<S>, fields: RawFields) -> Result<CmdResult> {
    let report = validate::validate_all(&fields);
    let mut result = CmdResult::default();

    if !report.all_valid {
        for (name, check) in [
            ("title", &report.title),
            ("author", &report.author),
            ("pages", &report.pages),
            ("date", &report.date_added),
            ("tag", &report.tag),
            ("isbn", &report.isbn),
        ] {
            if !check.valid {
                result.add_message(CmdMessage::error(format!("{name}: {}", check.message)));
            }
        }
        return Ok(result);
    }

    if report.notes.warn {
        result.add_message(CmdMessage::warning(report.notes.message.clone()));
    }

    let pages: f64 = fields
        .pages
        .trim()
        .parse()
        .map_err(|_| VaultError::Api(format!("Pages is not numeric: {}", fields.pages)))?;
    let date_added = NaiveDate::parse_from_str(fields.date_added.trim(), "%Y-%m-%d")
        .map_err(|_| VaultError::Api(format!("Invalid date: {}", fields.date_added)))?;

    let record = vault.create(RecordDraft {
        title: fields.title.trim().to_string(),
        author: fields.author.trim().to_string(),
        pages,
        tag: fields.tag.trim().to_string(),
        date_added,
        isbn: fields.isbn.trim().to_string(),
        notes: fields.notes.trim().to_string(),
    })?;

    result.add_message(CmdMessage::success(format!(
        "Added to the vault: {} ({})",
        record.title, record.id
    )));
    Ok(result.with_records(vec![record]))
}
