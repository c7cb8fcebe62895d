use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{SettingsPatch, Theme, Unit};
use crate::store::Storage;
use crate::vault::Vault;

/// Get or set configuration. No key shows everything; a key without a value
/// prints that value; a key with a value patches and persists it.
pub fn run<S: Storage>(
    vault: &mut Vault<S>,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let key = match key {
        Some(key) => key,
        None => return Ok(result.with_settings(vault.settings().clone())),
    };

    let value = match value {
        Some(value) => value,
        None => {
            let settings = vault.settings();
            let current = match key.as_str() {
                "page-cap" => settings.page_cap.to_string(),
                "unit" => settings.unit.to_string(),
                "theme" => settings.theme.to_string(),
                other => {
                    result.add_message(CmdMessage::error(format!("Unknown setting: {other}")));
                    return Ok(result);
                }
            };
            result.add_message(CmdMessage::info(format!("{key} = {current}")));
            return Ok(result);
        }
    };

    match key.as_str() {
        "page-cap" => match value.parse::<u32>() {
            Ok(cap) if cap >= 1 => {
                vault.update_settings(&SettingsPatch {
                    page_cap: Some(cap),
                    ..SettingsPatch::default()
                })?;
                result.add_message(CmdMessage::success(format!("Target set to {cap} pages.")));
            }
            _ => result.add_message(CmdMessage::error("Enter a valid page target.")),
        },
        "unit" => match value.parse::<Unit>() {
            Ok(unit) => {
                vault.update_settings(&SettingsPatch {
                    unit: Some(unit),
                    ..SettingsPatch::default()
                })?;
                result.add_message(CmdMessage::success(format!("Unit changed to {unit}.")));
            }
            Err(e) => result.add_message(CmdMessage::error(e)),
        },
        "theme" => match value.parse::<Theme>() {
            Ok(theme) => {
                vault.update_settings(&SettingsPatch {
                    theme: Some(theme),
                    ..SettingsPatch::default()
                })?;
                result.add_message(CmdMessage::success(format!("Theme set to {theme}.")));
            }
            Err(e) => result.add_message(CmdMessage::error(e)),
        },
        other => result.add_message(CmdMessage::error(format!("Unknown setting: {other}"))),
    }

    Ok(result)
}
