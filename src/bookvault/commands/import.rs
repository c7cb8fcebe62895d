use crate::commands::helpers::confirm;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::formats;
use crate::store::Storage;
use crate::vault::Vault;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Import a JSON file, replacing the entire collection on acceptance.
/// Every violation in the payload is reported; a payload with any violation
/// leaves the current collection untouched.
pub fn run<S: Storage>(vault: &mut Vault<S>, path: &Path, skip_confirm: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let text = fs::read_to_string(path).map_err(VaultError::Io)?;
    let data: Value = match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(_) => {
            result.add_message(CmdMessage::error("Import failed: invalid JSON."));
            return Ok(result);
        }
    };

    let records = match formats::decode_records(&data) {
        Ok(records) => records,
        Err(errors) => {
            result.add_message(CmdMessage::error("Import failed:"));
            for error in errors {
                result.add_message(CmdMessage::error(error));
            }
            return Ok(result);
        }
    };

    let count = records.len();
    if !skip_confirm
        && !confirm(&format!(
            "Import {count} records? This replaces your current vault."
        ))?
    {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    vault.replace_all(records)?;
    result.add_message(CmdMessage::success(format!("Imported {count} records.")));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;
    use std::io::Write;

    fn payload_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn valid_payload() -> String {
        json!([{
            "id": "book_a_0001",
            "title": "Dune",
            "author": "Frank Herbert",
            "pages": 412,
            "tag": "Sci-Fi",
            "dateAdded": "2024-03-15",
            "createdAt": "2024-03-15T10:00:00Z",
            "updatedAt": "2024-03-15T10:00:00Z"
        }])
        .to_string()
    }

    #[test]
    fn replaces_the_collection_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = payload_file(&dir, "valid.json", &valid_payload());
        let mut vault = Vault::open(InMemoryStore::new());

        let result = run(&mut vault, &path, true).unwrap();
        assert!(!result.has_errors());
        assert_eq!(vault.records().len(), 1);
        assert_eq!(vault.records()[0].title, "Dune");
    }

    #[test]
    fn invalid_payload_leaves_collection_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let bad = payload_file(&dir, "bad.json", &json!([{ "title": "X" }]).to_string());
        let good = payload_file(&dir, "good.json", &valid_payload());
        let mut vault = Vault::open(InMemoryStore::new());
        run(&mut vault, &good, true).unwrap();

        let result = run(&mut vault, &bad, true).unwrap();
        assert!(result.has_errors());
        // 1 header + 7 missing-field messages
        assert_eq!(result.messages.len(), 8);
        assert_eq!(vault.records().len(), 1);
        assert_eq!(vault.records()[0].title, "Dune");
    }

    #[test]
    fn broken_json_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = payload_file(&dir, "broken.json", "{not json");
        let mut vault = Vault::open(InMemoryStore::new());

        let result = run(&mut vault, &path, true).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Import failed: invalid JSON."));
        assert!(vault.records().is_empty());
    }
}
