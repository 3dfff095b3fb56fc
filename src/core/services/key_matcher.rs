use crate::core::models::file_descriptor::FileEncryptionDescriptor;
use crate::core::models::key_id::identifiers_match;
use crate::core::models::key_record::KeyRecord;

/// Find the local key able to decrypt a file described by `descriptor`.
///
/// Symmetric files have no key to match. Otherwise each recipient id is
/// compared against every local key's key id, fingerprint and subkey ids
/// using suffix matching, so 8, 16 and 40 character ids resolve alike.
///
/// The first matching key in `local_keys` order wins. There is no
/// trust-based tie-break between several matching keys.
pub fn match_key(descriptor: &FileEncryptionDescriptor, local_keys: &[KeyRecord]) -> Option<String> {
    if descriptor.is_symmetric {
        return None;
    }

    local_keys
        .iter()
        .find(|key| {
            key.comparison_set().any(|candidate| {
                descriptor
                    .recipient_key_ids
                    .iter()
                    .any(|recipient| identifiers_match(recipient, candidate))
            })
        })
        .map(|key| key.key_id.clone())
}

/// Fill in `matching_local_key_id` on the descriptor.
pub fn annotate(descriptor: &mut FileEncryptionDescriptor, local_keys: &[KeyRecord]) {
    descriptor.matching_local_key_id = match_key(descriptor, local_keys);
}
