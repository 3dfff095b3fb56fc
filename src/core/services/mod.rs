pub mod binary_resolver;
pub mod decryption_plan;
pub mod fetch_reconciler;
pub mod key_matcher;
