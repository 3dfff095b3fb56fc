use crate::core::errors::Result;
use crate::core::models::fetch_result::FetchResult;
use crate::core::models::key_record::KeyRecord;

/// Port for the keyring operations the core services drive.
///
/// The GnuPG implementation lives in `adapters::gpg::keyring`.
/// Services only depend on this trait, never on a concrete gateway.
pub trait Keyring {
    /// List public (or secret) keys, sorted by display name.
    fn list_keys(&self, secret: bool) -> Result<Vec<KeyRecord>>;

    /// Retrieve `key_id` from `keyserver` into the local keyring.
    fn receive_keys(&self, keyserver: &str, key_id: &str) -> Result<FetchResult>;

    /// Delete public keys by full fingerprint.
    fn delete_fingerprints(&self, fingerprints: &[String]) -> Result<()>;
}
