use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use secrecy::{ExposeSecret, SecretString};

use crate::core::errors::{EzGpgError, Result};

/// Use the preset passphrase if given, otherwise ask without echo.
pub fn passphrase(preset: Option<&SecretString>, prompt: &str) -> Result<SecretString> {
    if let Some(p) = preset {
        return Ok(SecretString::from(p.expose_secret().to_owned()));
    }
    let entered = rpassword::prompt_password(format!("  {prompt}: "))?;
    Ok(SecretString::from(entered))
}

/// Like `passphrase`, but asks twice when interactive and rejects empty input.
pub fn new_passphrase(preset: Option<&SecretString>, purpose: &str) -> Result<SecretString> {
    let first = passphrase(preset, &format!("Passphrase for {purpose}"))?;
    if first.expose_secret().is_empty() {
        return Err(EzGpgError::EmptyPassphrase {
            purpose: purpose.to_string(),
        });
    }
    if preset.is_none() {
        let second = passphrase(None, "Repeat passphrase")?;
        if first.expose_secret() != second.expose_secret() {
            return Err(EzGpgError::PassphraseMismatch);
        }
    }
    Ok(first)
}

/// Spinner for operations that block on gpg for a while.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
