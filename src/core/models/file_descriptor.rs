use serde::Serialize;

/// What a diagnostic run revealed about an encrypted file.
///
/// `matching_local_key_id` is left empty by the introspector and filled
/// in afterwards by the key matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileEncryptionDescriptor {
    pub is_symmetric: bool,
    pub recipient_key_ids: Vec<String>,
    pub matching_local_key_id: Option<String>,
}

impl FileEncryptionDescriptor {
    /// Record a recipient id unless it was already seen.
    pub fn add_recipient(&mut self, key_id: &str) {
        if !self.recipient_key_ids.iter().any(|k| k == key_id) {
            self.recipient_key_ids.push(key_id.to_string());
        }
    }
}
