pub mod keyring;
pub mod probe;
