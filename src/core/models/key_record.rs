use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display names longer than this are cut and suffixed with an ellipsis.
pub const MAX_DISPLAY_NAME: usize = 60;

/// Number of trailing key id characters shown in a friendly name.
pub const KEY_ID_SIZE: usize = 16;

/// Immutable snapshot of one key as reported by a keyring listing.
///
/// Never cached: any keyring mutation requires a fresh listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRecord {
    pub key_id: String,
    pub fingerprint: String,
    pub subkey_ids: Vec<String>,
    pub primary_uid: String,
    pub display_name: String,
    pub is_secret: bool,
    pub created: Option<DateTime<Utc>>,
}

impl KeyRecord {
    /// Build a record, deriving the display name from the primary uid.
    pub fn new(
        key_id: String,
        fingerprint: String,
        subkey_ids: Vec<String>,
        primary_uid: String,
        is_secret: bool,
    ) -> Self {
        let display_name = display_name(&primary_uid);
        Self {
            key_id,
            fingerprint,
            subkey_ids,
            primary_uid,
            display_name,
            is_secret,
            created: None,
        }
    }

    /// `"<display name> |<last 16 chars of key id>|"`
    pub fn friendly_name(&self) -> String {
        let start = self.key_id.len().saturating_sub(KEY_ID_SIZE);
        format!("{} |{}|", self.display_name, &self.key_id[start..])
    }

    /// Primary key id, fingerprint and all subkey ids.
    pub fn comparison_set(&self) -> impl Iterator<Item = &str> {
        [self.key_id.as_str(), self.fingerprint.as_str()]
            .into_iter()
            .chain(self.subkey_ids.iter().map(String::as_str))
    }
}

/// Truncate a uid to `MAX_DISPLAY_NAME` characters plus `...`.
pub fn display_name(uid: &str) -> String {
    if uid.chars().count() > MAX_DISPLAY_NAME {
        let cut: String = uid.chars().take(MAX_DISPLAY_NAME).collect();
        format!("{cut}...")
    } else {
        uid.to_string()
    }
}

/// Sort by the displayed (possibly truncated) name, case-insensitively.
pub fn sort_by_display_name(keys: &mut [KeyRecord]) {
    keys.sort_by_cached_key(|k| k.display_name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(uid: &str) -> KeyRecord {
        KeyRecord::new(
            "0123456789ABCDEF".into(),
            "AAAAAAAAAAAAAAAAAAAAAAAA0123456789ABCDEF".into(),
            vec![],
            uid.into(),
            false,
        )
    }

    #[test]
    fn short_uid_is_kept() {
        assert_eq!(key("Alice <a@example.com>").display_name, "Alice <a@example.com>");
    }

    #[test]
    fn long_uid_is_truncated_with_ellipsis() {
        let uid = "x".repeat(61);
        let k = key(&uid);
        assert_eq!(k.display_name, format!("{}...", "x".repeat(60)));
        assert_eq!(k.primary_uid, uid);
    }

    #[test]
    fn exactly_sixty_chars_is_not_truncated() {
        let uid = "y".repeat(60);
        assert_eq!(key(&uid).display_name, uid);
    }

    #[test]
    fn sorts_case_insensitively() {
        let mut keys = vec![key("Zed"), key("alice"), key("Bob")];
        sort_by_display_name(&mut keys);
        let names: Vec<_> = keys.iter().map(|k| k.display_name.as_str()).collect();
        assert_eq!(names, ["alice", "Bob", "Zed"]);
    }

    #[test]
    fn friendly_name_shows_key_id_suffix() {
        assert_eq!(key("Bob").friendly_name(), "Bob |0123456789ABCDEF|");
    }

    #[test]
    fn comparison_set_includes_subkeys() {
        let mut k = key("Bob");
        k.subkey_ids = vec!["1111222233334444".into()];
        let set: Vec<_> = k.comparison_set().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set[2], "1111222233334444");
    }
}
