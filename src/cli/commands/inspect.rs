use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::key_matcher;
use crate::core::traits::keyring::Keyring;

/// Execute the `ezgpg inspect` command.
///
/// Reports the recipients of an encrypted file and which local secret
/// key, if any, could decrypt it.
pub fn execute(ctx: &Context, file: &Path, json: bool) -> Result<()> {
    let mut descriptor = ctx.introspector().inspect(file)?;
    if !descriptor.is_symmetric {
        let secret_keys = ctx.keyring().list_keys(true)?;
        key_matcher::annotate(&mut descriptor, &secret_keys);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    }

    output::header(&file.display().to_string());
    if descriptor.is_symmetric {
        output::success("Encrypted with a passphrase (symmetric)");
    }
    if !descriptor.recipient_key_ids.is_empty() {
        println!("  Recipients:");
        for id in &descriptor.recipient_key_ids {
            println!("  • {id}");
        }
    }
    match &descriptor.matching_local_key_id {
        Some(key_id) => output::success(&format!("Can be decrypted with local key {key_id}")),
        None if !descriptor.is_symmetric => {
            output::warning("No local secret key matches any recipient")
        }
        None => {}
    }
    Ok(())
}
