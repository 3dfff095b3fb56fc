use std::path::Path;

use crate::adapters::gpg::keyring::strip_encrypted_suffix;
use crate::cli::context::Context;
use crate::cli::{output, prompt};
use crate::core::errors::{EzGpgError, Result};
use crate::core::services::decryption_plan::{self, DecryptionPlan};
use crate::core::traits::keyring::Keyring;

/// Execute the `ezgpg decrypt` command.
///
/// Inspects the file first: passphrase-only files ask for the passphrase,
/// otherwise the matching local secret key is found, its passphrase
/// checked, and only then is the file decrypted.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    strip_encrypted_suffix(file)?;
    let mut descriptor = ctx.introspector().inspect(file)?;
    let keyring = ctx.keyring();

    let secret_keys = if descriptor.is_symmetric {
        Vec::new()
    } else {
        keyring.list_keys(true)?
    };
    let plan = decryption_plan::plan(&mut descriptor, &secret_keys)?;

    output::header(&format!("Decrypting {}", file.display()));
    let passphrase = match &plan {
        DecryptionPlan::Symmetric => {
            output::detail("Encrypted with a passphrase");
            prompt::passphrase(ctx.preset_passphrase(), "Passphrase")?
        }
        DecryptionPlan::WithKey(key) => {
            output::detail(&format!("Encrypted for {}", key.friendly_name()));
            let passphrase = prompt::passphrase(
                ctx.preset_passphrase(),
                &format!("Passphrase for {}", key.display_name),
            )?;
            if !keyring.check_key_passphrase(&key.key_id, &passphrase)? {
                return Err(EzGpgError::WrongPassphrase {
                    key_id: key.key_id.clone(),
                });
            }
            passphrase
        }
    };

    let dest = keyring.decrypt_file(file, &passphrase)?;
    output::success(&format!("Decrypted file can be found at {}", dest.display()));
    Ok(())
}
