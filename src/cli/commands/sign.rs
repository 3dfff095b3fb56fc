use std::path::Path;

use crate::cli::context::Context;
use crate::cli::{output, prompt};
use crate::core::errors::{EzGpgError, Result};

/// Execute the `ezgpg sign` command.
pub fn execute(ctx: &Context, file: &Path, key: &str, armor: bool, attached: bool) -> Result<()> {
    let keyring = ctx.keyring();
    let passphrase = prompt::passphrase(ctx.preset_passphrase(), &format!("Passphrase for {key}"))?;

    if !keyring.check_key_passphrase(key, &passphrase)? {
        return Err(EzGpgError::WrongPassphrase {
            key_id: key.to_string(),
        });
    }

    let signature = keyring.sign_file(file, key, &passphrase, !attached, ctx.armor(armor))?;
    output::success(&format!("Signed {} with {key}", file.display()));
    output::success(&format!("Signature can be found at {}", signature.display()));
    Ok(())
}
