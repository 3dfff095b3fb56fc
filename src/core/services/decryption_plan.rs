use crate::core::errors::{EzGpgError, Result};
use crate::core::models::file_descriptor::FileEncryptionDescriptor;
use crate::core::models::key_record::KeyRecord;
use crate::core::services::key_matcher;

/// How an encrypted file should be decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptionPlan {
    /// Passphrase-only decryption.
    Symmetric,
    /// Decrypt with this local secret key.
    WithKey(KeyRecord),
}

/// Route a file to passphrase-only decryption or to a local secret key.
///
/// Annotates `descriptor` with the matching key id and fails with
/// `NoDecryptionKey` when recipients were found but none is held locally.
pub fn plan(
    descriptor: &mut FileEncryptionDescriptor,
    secret_keys: &[KeyRecord],
) -> Result<DecryptionPlan> {
    if descriptor.is_symmetric {
        return Ok(DecryptionPlan::Symmetric);
    }

    key_matcher::annotate(descriptor, secret_keys);

    descriptor
        .matching_local_key_id
        .as_ref()
        .and_then(|id| secret_keys.iter().find(|k| &k.key_id == id))
        .cloned()
        .map(DecryptionPlan::WithKey)
        .ok_or_else(|| EzGpgError::NoDecryptionKey {
            recipients: if descriptor.recipient_key_ids.is_empty() {
                "(no recipients listed)".into()
            } else {
                descriptor.recipient_key_ids.join(", ")
            },
        })
}
