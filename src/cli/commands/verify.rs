use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `ezgpg verify` command.
///
/// Succeeds only for a valid signature from a signer trusted at least
/// marginally; bad, unverifiable and untrusted signatures each fail with
/// their own error.
pub fn execute(ctx: &Context, file: &Path, signature: Option<&Path>) -> Result<()> {
    let verification = ctx.keyring().verify_file(file, signature)?;

    output::header(&format!("Verifying {}", file.display()));
    if let Some(sig) = signature {
        output::detail(&format!("Signature: {}", sig.display()));
    }
    if let Some(user) = &verification.username {
        output::detail(&format!("User: {user}"));
    }
    if let Some(fingerprint) = &verification.fingerprint {
        output::detail(&format!("Fingerprint: {fingerprint}"));
    } else if let Some(key_id) = &verification.key_id {
        output::detail(&format!("Key ID: {key_id}"));
    }
    if let Some(trust) = verification.trust_level {
        output::detail(&format!("Trust: {trust}"));
    }

    verification.accept(file)?;
    output::success(&format!("File {} verified!", file.display()));
    Ok(())
}
