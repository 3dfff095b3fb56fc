use std::ffi::OsString;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::adapters::gpg::command::GpgCommand;
use crate::core::errors::{EzGpgError, Result};
use crate::core::models::file_descriptor::FileEncryptionDescriptor;

/// Lines gpg writes to its own log channel start with this marker.
const LOG_PREFIX: &str = "gpg:";

/// A line ending in 8-16 hex characters preceded by a space names a recipient.
static KEY_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([0-9a-fA-F]{8,16})$").expect("valid key id regex"));

/// "encrypted with 1 passphrase" marks a symmetric session key.
static SYMMETRIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \d+ pass").expect("valid passphrase regex"));

#[cfg(windows)]
const EMPTY_KEYRING: &str = "NUL";
#[cfg(not(windows))]
const EMPTY_KEYRING: &str = "/dev/null";

/// Discovers who an encrypted file is encrypted for without touching the
/// user's keyring.
pub struct FileIntrospector {
    gpg: GpgCommand,
}

impl FileIntrospector {
    pub fn new(gpg: GpgCommand) -> Self {
        Self { gpg }
    }

    /// Run a list-only, verbose pass over `path` against an empty keyring.
    pub fn inspect(&self, path: &Path) -> Result<FileEncryptionDescriptor> {
        if !path.exists() {
            return Err(EzGpgError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let args: Vec<OsString> = vec![
            "--batch".into(),
            format!("--keyring={EMPTY_KEYRING}").into(),
            "--no-default-keyring".into(),
            "--list-only".into(),
            "--verbose".into(),
            "--".into(),
            path.into(),
        ];
        let output = self.gpg.run(&args, None)?;

        if !output.success() {
            tracing::debug!(path = %path.display(), diagnostics = %output.diagnostics(), "not a gpg file");
            return Err(EzGpgError::NotAGpgFile {
                path: path.to_path_buf(),
            });
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(parse_diagnostics(&text))
    }
}

/// Scrape recipient ids and the symmetric marker from gpg's log lines.
///
/// This is a best-effort read of human-oriented output: only the two
/// patterns above are relied on.
pub fn parse_diagnostics(text: &str) -> FileEncryptionDescriptor {
    let mut descriptor = FileEncryptionDescriptor::default();

    for line in text.lines().map(str::trim_end) {
        if !line.starts_with(LOG_PREFIX) {
            continue;
        }

        if let Some(found) = KEY_ID_PATTERN.captures(line) {
            descriptor.add_recipient(&found[1]);
        }

        if SYMMETRIC_PATTERN.is_match(line) {
            descriptor.is_symmetric = true;
        }
    }

    descriptor
}
