use std::path::PathBuf;

use secrecy::SecretString;

use crate::adapters::gpg::command::GpgCommand;
use crate::adapters::gpg::introspector::FileIntrospector;
use crate::adapters::gpg::keyring::GpgKeyring;
use crate::adapters::gpg::system_probe::SystemProbe;
use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::binary_resolver::{BinaryResolver, Platform};

/// Environment variable holding a passphrase for non-interactive use.
/// Never accepted on the command line, where it would show up in `ps`.
pub const PASSPHRASE_ENV: &str = "EZGPG_PASSPHRASE";

/// Everything a command needs, resolved once from flags and config.
///
/// Holds no keyring state; each gateway call goes back to gpg.
pub struct Context {
    pub config: AppConfig,
    pub gpg: GpgCommand,
    pub passphrase: Option<SecretString>,
}

impl Context {
    /// Flags win over the config file; the binary falls back to lookup.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = AppConfig::load(cli.config.as_deref())?;

        let binary: PathBuf = match cli.gpg.clone().or_else(|| config.gpg.binary.clone()) {
            Some(explicit) => explicit,
            None => BinaryResolver::new(SystemProbe, Platform::current()).resolve(),
        };
        let homedir = cli.homedir.clone().or_else(|| config.gpg.homedir.clone());
        tracing::debug!(binary = %binary.display(), ?homedir, "gpg selected");

        Ok(Self {
            gpg: GpgCommand::new(binary, homedir),
            passphrase: std::env::var(PASSPHRASE_ENV).ok().map(SecretString::from),
            config,
        })
    }

    pub fn keyring(&self) -> GpgKeyring {
        GpgKeyring::new(self.gpg.clone())
    }

    pub fn introspector(&self) -> FileIntrospector {
        FileIntrospector::new(self.gpg.clone())
    }

    /// Command-line `--armor` or the config default.
    pub fn armor(&self, flag: bool) -> bool {
        flag || self.config.gpg.armor
    }

    pub fn preset_passphrase(&self) -> Option<&SecretString> {
        self.passphrase.as_ref()
    }
}
