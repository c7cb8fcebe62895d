use crate::commands::CmdResult;
use crate::error::Result;
use crate::stats;
use crate::store::Storage;
use crate::vault::Vault;

pub fn run<S: Storage>(vault: &Vault<S>) -> Result<CmdResult> {
    let report = stats::compute(vault.records(), vault.settings());
    Ok(CmdResult::default()
        .with_stats(report)
        .with_settings(vault.settings().clone()))
}
