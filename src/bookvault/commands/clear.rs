use crate::commands::helpers::confirm;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;
use crate::vault::Vault;

pub fn run<S: Storage>(vault: &mut Vault<S>, skip_confirm: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if !skip_confirm && !confirm("Delete ALL books? This cannot be undone.")? {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    vault.erase_all()?;
    result.add_message(CmdMessage::success("All data cleared."));
    Ok(result)
}
