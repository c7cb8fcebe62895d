use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;
use crate::vault::Vault;

pub fn run<S: Storage>(vault: &Vault<S>) -> Result<CmdResult> {
    let tags = vault.unique_tags();
    let mut result = CmdResult::default();
    if tags.is_empty() {
        result.add_message(CmdMessage::info("No tags yet."));
    }
    Ok(result.with_tags(tags))
}
