use crate::commands::helpers::confirm;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;
use crate::vault::Vault;

pub fn run<S: Storage>(vault: &mut Vault<S>, id: &str, skip_confirm: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let title = match vault.find(id) {
        Some(record) => record.title.clone(),
        None => {
            result.add_message(CmdMessage::warning(format!("No book with id \"{id}\".")));
            return Ok(result);
        }
    };

    if !skip_confirm && !confirm(&format!("Delete \"{title}\"?"))? {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    vault.delete(id)?;
    result.add_message(CmdMessage::success(format!("\"{title}\" deleted.")));
    Ok(result)
}
