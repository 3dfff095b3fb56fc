pub mod commands;
pub mod context;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Friendly front end for GnuPG: keys, encryption, signing and verification.
#[derive(Parser, Debug)]
#[command(
    name = "ezgpg",
    version,
    about,
    long_about = None,
    after_help = "Set EZGPG_PASSPHRASE to supply passphrases without prompting."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GnuPG binary to use (default: found automatically)
    #[arg(long, global = true)]
    pub gpg: Option<PathBuf>,

    /// GnuPG home directory (keyring location)
    #[arg(long, global = true)]
    pub homedir: Option<PathBuf>,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the local keyring
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Encrypt files to <file>.gpg
    Encrypt {
        /// Files to encrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Recipient key id (repeatable)
        #[arg(short, long = "recipient", conflicts_with = "symmetric")]
        recipients: Vec<String>,
        /// Encrypt with a passphrase only
        #[arg(short, long)]
        symmetric: bool,
        /// ASCII-armored output
        #[arg(short, long)]
        armor: bool,
    },

    /// Decrypt a <file>.gpg, picking the right local key automatically
    Decrypt {
        /// Encrypted file
        file: PathBuf,
    },

    /// Sign a file
    Sign {
        /// File to sign
        file: PathBuf,
        /// Signing key id
        #[arg(short, long)]
        key: String,
        /// ASCII-armored signature
        #[arg(short, long)]
        armor: bool,
        /// Embed the signature instead of writing <file>.sig
        #[arg(long)]
        attached: bool,
    },

    /// Verify a signed file
    Verify {
        /// Signed file (or the data covered by a detached signature)
        file: PathBuf,
        /// Detached signature
        #[arg(short, long)]
        signature: Option<PathBuf>,
    },

    /// Show who an encrypted file is encrypted for
    Inspect {
        /// Encrypted file
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the GnuPG binary that would be used
    Which,
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// List keys
    List {
        /// List secret keys instead of public keys
        #[arg(long)]
        secret: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import keys from a file
    Import {
        /// Key file (armored or binary)
        file: PathBuf,
    },
    /// Export a public key to a file
    Export {
        /// Key id or fingerprint
        key: String,
        /// Destination file
        file: PathBuf,
        /// ASCII-armored output
        #[arg(short, long)]
        armor: bool,
    },
    /// Delete a key (secret part first, if present)
    Delete {
        /// Key id or fingerprint
        key: String,
    },
    /// Generate a new key pair
    Create {
        /// Real name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Key algorithm
        #[arg(long, default_value = "RSA")]
        key_type: String,
        /// Key size in bits
        #[arg(long, default_value_t = 4096)]
        key_length: u32,
    },
    /// Fetch a key from a keyserver
    Fetch {
        /// Key id (8 or 16 hex chars) or fingerprint
        key: String,
        /// Keyserver (default from config)
        #[arg(long)]
        keyserver: Option<String>,
    },
    /// Check a key's passphrase
    CheckPassphrase {
        /// Key id or fingerprint
        key: String,
    },
    /// List configured keyservers
    Servers,
}
