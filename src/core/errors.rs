use std::path::PathBuf;

/// All domain errors for ezgpg.
///
/// Each variant provides enough context to render a specific message
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum EzGpgError {
    #[error(
        "GnuPG binary not found: {binary}\n\n  \
         Solutions:\n    \
         → Install GnuPG (gpg or gpg2) and make sure it is on your PATH\n    \
         → Or point ezgpg at it: ezgpg --gpg /path/to/gpg <command>"
    )]
    ToolNotFound { binary: PathBuf },

    #[error("gpg {operation} failed: {detail}")]
    GpgFailed { operation: String, detail: String },

    #[error("File not found: {path}\n\n  Check that the path is correct and the file exists.")]
    FileNotFound { path: PathBuf },

    #[error(
        "No keys found in {path}\n\n  \
         The file does not contain any recognizable OpenPGP key.\n  \
         Expected an armored (-----BEGIN PGP ...) or binary key export."
    )]
    InvalidKeyFile { path: PathBuf },

    #[error(
        "Invalid key identifier '{id}'\n\n  \
         Expected 8, 16 or 40 hexadecimal characters (optionally prefixed with 0x)."
    )]
    InvalidKeyId { id: String },

    #[error("Key '{key_id}' not found in the local keyring\n\n  Run 'ezgpg keys list' to see available keys.")]
    KeyNotFound { key_id: String },

    #[error("Failed to delete key '{key_id}': {reason}")]
    DeleteFailed { key_id: String, reason: String },

    #[error("Key generation failed: {reason}")]
    KeyGenerationFailed { reason: String },

    #[error("Nothing was exported for key '{key_id}'\n\n  Run 'ezgpg keys list' to check the key identifier.")]
    ExportFailed { key_id: String },

    #[error(
        "Key '0x{key_id}' not found on {keyserver}\n\n  \
         Solutions:\n    \
         → Check the key identifier for typos\n    \
         → Try another keyserver: ezgpg keys fetch {key_id} --keyserver <server>"
    )]
    FetchNotFound { key_id: String, keyserver: String },

    #[error(
        "WARNING: {count} keys were returned for '0x{key_id}'\n\n  \
         The key identifier collides with other certificates on the keyserver.\n  \
         The duplicate/rogue certificates were fetched and removed, so your keyring is safe,\n  \
         but NO key was imported.\n\n  \
         Solutions:\n    \
         → Ask the key owner for the full 40-character fingerprint\n    \
         → Fetch again with it: ezgpg keys fetch <fingerprint>"
    )]
    FetchCollision { key_id: String, count: usize },

    #[error(
        "Could not clean up rogue certificates matching '0x{key_id}'\n\n  \
         Colliding keys were fetched and at least one is still in your local keyring.\n  \
         Do NOT use any key matching this identifier.\n  \
         Remove it manually: gpg --delete-keys <fingerprint>"
    )]
    FetchCleanupFailed { key_id: String },

    #[error("Not a GPG-encrypted file: {path}")]
    NotAGpgFile { path: PathBuf },

    #[error(
        "No local secret key can decrypt this file\n\n  \
         The file is encrypted for: {recipients}\n\n  \
         Solutions:\n    \
         → Import the matching secret key: ezgpg keys import <file>\n    \
         → Ask the sender to encrypt for one of your keys: ezgpg keys list --secret"
    )]
    NoDecryptionKey { recipients: String },

    #[error("Wrong passphrase for key '{key_id}'")]
    WrongPassphrase { key_id: String },

    #[error("No recipients provided\n\n  Use --recipient <key-id> (repeatable) or --symmetric.")]
    NoRecipients,

    #[error("Encryption of {path} failed: {reason}")]
    EncryptionFailed { path: PathBuf, reason: String },

    #[error("Decryption of {path} failed: {reason}")]
    DecryptionFailed { path: PathBuf, reason: String },

    #[error(
        "Refusing to decrypt {path}: the file name does not end in '{suffix}'\n\n  \
         The decrypted output is written next to the input with the suffix removed.\n  \
         Rename the file so it ends in '{suffix}' and try again."
    )]
    MissingEncryptedSuffix { path: PathBuf, suffix: String },

    #[error("Unable to sign {path}: {reason}")]
    SignFailed { path: PathBuf, reason: String },

    #[error("BAD SIGNATURE! The signature for {path} was checked and it is bad.")]
    SignatureInvalid { path: PathBuf },

    #[error(
        "NOT VERIFIED! The signature for {path} cannot be verified.\n\n  \
         It was either not included or the signer's trust is unknown."
    )]
    SignatureUnverifiable { path: PathBuf },

    #[error(
        "NOT TRUSTED ENOUGH! The signature for {path} is valid, but the signer is only trusted '{trust}'.\n\n  \
         At least marginal trust is required."
    )]
    SignatureUntrusted { path: PathBuf, trust: String },

    #[error("Passphrases do not match")]
    PassphraseMismatch,

    #[error("A passphrase is required for {purpose}")]
    EmptyPassphrase { purpose: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EzGpgError>;
