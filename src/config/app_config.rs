use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{EzGpgError, Result};

/// Keyservers offered when the config file does not list any.
pub const DEFAULT_KEYSERVERS: [&str; 4] = [
    "pgp.mit.edu",
    "keys.gnupg.net",
    "keyserver.ubuntu.com",
    "keyserver.opensuse.org",
];

/// Top-level ezgpg configuration read from `config.toml`.
///
/// Every section is optional; a missing file means defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gpg: GpgSection,
    pub keyservers: KeyserverSection,
}

/// The `[gpg]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GpgSection {
    /// Explicit binary; skips the automatic lookup when set.
    pub binary: Option<PathBuf>,
    /// Passed to gpg as `--homedir`.
    pub homedir: Option<PathBuf>,
    /// Default for `--armor` on encrypt, sign and export.
    pub armor: bool,
}

/// The `[keyservers]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyserverSection {
    pub default: String,
    pub servers: Vec<String>,
}

impl Default for KeyserverSection {
    fn default() -> Self {
        Self {
            default: "keyserver.ubuntu.com".into(),
            servers: DEFAULT_KEYSERVERS.map(String::from).to_vec(),
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/ezgpg/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ezgpg").join("config.toml"))
    }

    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default location if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(EzGpgError::InvalidConfig {
                        detail: format!("config file not found: {}", p.display()),
                    });
                }
                p.to_path_buf()
            }
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| EzGpgError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.keyservers.servers.is_empty() {
            return Err(EzGpgError::InvalidConfig {
                detail: "[keyservers] servers must list at least one keyserver".into(),
            });
        }
        if config.keyservers.default.trim().is_empty() {
            return Err(EzGpgError::InvalidConfig {
                detail: "[keyservers] default must not be empty".into(),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.keyservers.servers.len(), 4);
        assert_eq!(config.keyservers.default, "keyserver.ubuntu.com");
        assert!(config.gpg.binary.is_none());
        assert!(!config.gpg.armor);
    }

    #[test]
    fn parses_all_sections() {
        let config = AppConfig::parse(
            r#"
            [gpg]
            binary = "/opt/homebrew/bin/gpg"
            homedir = "/tmp/gnupg"
            armor = true

            [keyservers]
            default = "keys.openpgp.org"
            servers = ["keys.openpgp.org"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.gpg.binary.as_deref(),
            Some(Path::new("/opt/homebrew/bin/gpg"))
        );
        assert_eq!(config.gpg.homedir.as_deref(), Some(Path::new("/tmp/gnupg")));
        assert!(config.gpg.armor);
        assert_eq!(config.keyservers.servers, ["keys.openpgp.org"]);
    }

    #[test]
    fn empty_server_list_is_rejected() {
        let result = AppConfig::parse("[keyservers]\nservers = []\n");
        assert!(matches!(result, Err(EzGpgError::InvalidConfig { .. })));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(AppConfig::parse("[gpg\narmor = ").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(EzGpgError::InvalidConfig { .. })));
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gpg]\narmor = true\n").unwrap();
        assert!(AppConfig::load(Some(&path)).unwrap().gpg.armor);
    }
}
