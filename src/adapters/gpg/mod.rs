pub mod colons;
pub mod command;
pub mod introspector;
pub mod keyring;
pub mod system_probe;
