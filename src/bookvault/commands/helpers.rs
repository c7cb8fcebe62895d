use crate::error::{Result, VaultError};
use std::io::{self, Write};

/// Ask for explicit approval before a destructive operation. The store is
/// only touched after this returns true.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [Y] to confirm: ");
    io::stdout().flush().map_err(VaultError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(VaultError::Io)?;
    Ok(input.trim() == "Y")
}
