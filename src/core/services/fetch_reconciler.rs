use crate::core::errors::{EzGpgError, Result};
use crate::core::models::key_id::{identifiers_match, normalize};
use crate::core::traits::keyring::Keyring;

/// Fetches keys from a keyserver and repairs key id collisions.
///
/// When a single id returns more than one certificate, every returned
/// certificate is deleted again and the fetch is reported as a failure.
/// The reconciler never retries; fetching again with a longer id is the
/// caller's choice.
pub struct FetchReconciler<'a, K: Keyring> {
    pub keyring: &'a K,
}

impl<K: Keyring> FetchReconciler<'_, K> {
    /// Fetch `requested_id` and return the fingerprint of the imported key.
    pub fn fetch_key(&self, keyserver: &str, requested_id: &str) -> Result<String> {
        let key_id = normalize(requested_id)?;
        tracing::info!(%keyserver, %key_id, "fetching key");

        let fetched = self.keyring.receive_keys(keyserver, &key_id)?;

        match fetched.count {
            0 => Err(EzGpgError::FetchNotFound {
                key_id,
                keyserver: keyserver.to_string(),
            }),
            1 => {
                let fingerprint = fetched
                    .returned_fingerprints
                    .into_iter()
                    .next()
                    .ok_or_else(|| EzGpgError::FetchNotFound {
                        key_id: key_id.clone(),
                        keyserver: keyserver.to_string(),
                    })?;
                tracing::info!(%fingerprint, "key imported");
                Ok(fingerprint)
            }
            count => {
                let fingerprints: Vec<String> =
                    fetched.returned_fingerprints.into_iter().collect();
                tracing::warn!(
                    %key_id,
                    ?fingerprints,
                    "multiple keys imported, possible rogue certificates; deleting them"
                );

                if let Err(e) = self.keyring.delete_fingerprints(&fingerprints) {
                    tracing::warn!(error = %e, "failed to delete rogue certificates");
                }

                let leftover = self
                    .keyring
                    .list_keys(false)?
                    .into_iter()
                    .any(|key| key.comparison_set().any(|id| identifiers_match(id, &key_id)));
                if leftover {
                    return Err(EzGpgError::FetchCleanupFailed { key_id });
                }

                Err(EzGpgError::FetchCollision { key_id, count })
            }
        }
    }
}
