//! Interactive input.

use anyhow::{bail, Context, Result};

/// Read a passphrase without echo.
pub fn passphrase(message: &str) -> Result<String> {
    let passphrase = rpassword::prompt_password(message).context("failed to read passphrase")?;
    if passphrase.is_empty() {
        bail!("passphrase cannot be empty");
    }
    Ok(passphrase)
}
