use std::path::PathBuf;

use crate::adapters::gpg::keyring::EncryptionMode;
use crate::cli::context::Context;
use crate::cli::{output, prompt};
use crate::core::errors::{EzGpgError, Result};

/// Execute the `ezgpg encrypt` command.
///
/// Encrypts each file to `<file>.gpg`, either to the given recipients
/// (always trusted) or with a passphrase. Every file is attempted; the
/// command fails if any of them failed.
pub fn execute(
    ctx: &Context,
    files: &[PathBuf],
    recipients: &[String],
    symmetric: bool,
    armor: bool,
) -> Result<()> {
    let mode = if symmetric {
        EncryptionMode::Symmetric(prompt::new_passphrase(
            ctx.preset_passphrase(),
            "symmetric encryption",
        )?)
    } else if recipients.is_empty() {
        return Err(EzGpgError::NoRecipients);
    } else {
        EncryptionMode::PublicKey(recipients.to_vec())
    };

    let how = match &mode {
        EncryptionMode::PublicKey(r) => format!("for {}", r.join(", ")),
        EncryptionMode::Symmetric(_) => "with a passphrase".to_string(),
    };
    output::header(&format!("Encrypting {} file(s) {how}", files.len()));

    let spinner = prompt::spinner("Encrypting...");
    let outcomes = ctx.keyring().encrypt_files(files, &mode, ctx.armor(armor));
    spinner.finish_and_clear();
    let outcomes = outcomes?;

    let total = outcomes.len();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(dest) => output::success(&format!(
                "Encrypted {} to {}",
                outcome.source.display(),
                dest.display()
            )),
            Err(e) => {
                output::error(&format!("{}: {e}", outcome.source.display()));
                failures.push((outcome.source, e));
            }
        }
    }

    match failures.len() {
        0 => Ok(()),
        1 if total == 1 => Err(failures.remove(0).1),
        n => Err(EzGpgError::EncryptionFailed {
            path: failures.remove(0).0,
            reason: format!("{n} of {total} files could not be encrypted"),
        }),
    }
}
