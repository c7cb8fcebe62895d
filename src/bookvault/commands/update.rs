use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::RecordPatch;
use crate::store::Storage;
use crate::validate;
use crate::vault::Vault;
use chrono::NaiveDate;

/// Raw replacement text for the fields being edited. Absent fields keep
/// their current values.
#[derive(Debug, Clone, Default)]
pub struct EditFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<String>,
    pub date_added: Option<String>,
    pub tag: Option<String>,
    pub isbn: Option<String>,
    pub notes: Option<String>,
}

/// Validate the provided fields and merge them onto the record. Partial
/// patches are fine; a single failing field blocks the whole edit.
pub fn run<S: Storage>(vault: &mut Vault<S>, id: &str, fields: EditFields) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let mut checks = Vec::new();
    if let Some(title) = &fields.title {
        checks.push(("title", validate::validate_title(title)));
    }
    if let Some(author) = &fields.author {
        checks.push(("author", validate::validate_author(author)));
    }
    if let Some(pages) = &fields.pages {
        checks.push(("pages", validate::validate_pages(pages)));
    }
    if let Some(date) = &fields.date_added {
        checks.push(("date", validate::validate_date(date)));
    }
    if let Some(tag) = &fields.tag {
        checks.push(("tag", validate::validate_tag(tag)));
    }
    if let Some(isbn) = &fields.isbn {
        checks.push(("isbn", validate::validate_isbn(isbn)));
    }
    for (name, check) in &checks {
        if !check.valid {
            result.add_message(CmdMessage::error(format!("{name}: {}", check.message)));
        }
    }
    if result.has_errors() {
        return Ok(result);
    }

    if let Some(notes) = &fields.notes {
        let check = validate::warn_duplicate_words(notes);
        if check.warn {
            result.add_message(CmdMessage::warning(check.message));
        }
    }

    let pages = match &fields.pages {
        Some(raw) => Some(
            raw.trim()
                .parse::<f64>()
                .map_err(|_| VaultError::Api(format!("Pages is not numeric: {raw}")))?,
        ),
        None => None,
    };
    let date_added = match &fields.date_added {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| VaultError::Api(format!("Invalid date: {raw}")))?,
        ),
        None => None,
    };

    let patch = RecordPatch {
        title: fields.title.map(|s| s.trim().to_string()),
        author: fields.author.map(|s| s.trim().to_string()),
        pages,
        tag: fields.tag.map(|s| s.trim().to_string()),
        date_added,
        isbn: fields.isbn.map(|s| s.trim().to_string()),
        notes: fields.notes.map(|s| s.trim().to_string()),
    };

    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    if vault.update(id, &patch)? {
        let title = vault.find(id).map(|r| r.title.clone()).unwrap_or_default();
        result.add_message(CmdMessage::success(format!("Book updated: {title}")));
    } else {
        result.add_message(CmdMessage::warning(format!("No book with id \"{id}\".")));
    }
    Ok(result)
}
