use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::formats;
use crate::store::Storage;
use crate::vault::Vault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

pub fn run<S: Storage>(vault: &Vault<S>, format: Format) -> Result<CmdResult> {
    let payload = match format {
        Format::Json => formats::to_json(vault.records())?,
        Format::Csv => formats::to_csv(vault.records()),
    };
    let mut result = CmdResult::default().with_payload(payload);
    result.add_message(CmdMessage::success(format!(
        "Exported {} records.",
        vault.records().len()
    )));
    Ok(result)
}
