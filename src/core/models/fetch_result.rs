use std::collections::BTreeSet;

/// Outcome of a single keyserver retrieval, consumed immediately by the
/// fetch reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub requested_id: String,
    pub returned_fingerprints: BTreeSet<String>,
    pub count: usize,
}

impl FetchResult {
    /// Build a result whose count is the number of distinct fingerprints.
    pub fn new(requested_id: &str, fingerprints: impl IntoIterator<Item = String>) -> Self {
        let returned_fingerprints: BTreeSet<String> = fingerprints.into_iter().collect();
        Self {
            requested_id: requested_id.to_string(),
            count: returned_fingerprints.len(),
            returned_fingerprints,
        }
    }
}
