use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::errors::{EzGpgError, Result};

/// Signer trust as judged by the local keyring, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    /// Explicitly never trusted (`TRUST_NEVER`).
    Never,
    /// Trust undefined (`TRUST_UNDEFINED`).
    Unknown,
    Marginal,
    Full,
    Ultimate,
}

impl TrustLevel {
    /// Parse the keyword of a `TRUST_*` status line.
    pub fn from_status_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TRUST_NEVER" => Some(Self::Never),
            "TRUST_UNDEFINED" => Some(Self::Unknown),
            "TRUST_MARGINAL" => Some(Self::Marginal),
            "TRUST_FULLY" => Some(Self::Full),
            "TRUST_ULTIMATE" => Some(Self::Ultimate),
            _ => None,
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Never => "never",
            Self::Unknown => "unknown",
            Self::Marginal => "marginal",
            Self::Full => "full",
            Self::Ultimate => "ultimate",
        };
        f.write_str(text)
    }
}

/// Raw result of a signature check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub valid: bool,
    pub trust_level: Option<TrustLevel>,
    pub fingerprint: Option<String>,
    pub key_id: Option<String>,
    pub username: Option<String>,
}

/// How a `Verification` is judged. Only `Accepted` is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureVerdict {
    Accepted,
    /// The signature was checked and is bad (or could not be checked at all).
    Invalid,
    /// Valid, but the signer's trust is absent or unknown.
    Unverifiable,
    /// Valid, but trusted below marginal.
    Untrusted,
}

impl Verification {
    pub fn verdict(&self) -> SignatureVerdict {
        if !self.valid {
            return SignatureVerdict::Invalid;
        }
        match self.trust_level {
            None | Some(TrustLevel::Unknown) => SignatureVerdict::Unverifiable,
            Some(level) if level < TrustLevel::Marginal => SignatureVerdict::Untrusted,
            Some(_) => SignatureVerdict::Accepted,
        }
    }

    /// Turn every non-accepted verdict into its own error variant.
    pub fn accept(&self, path: &Path) -> Result<()> {
        let path = path.to_path_buf();
        match self.verdict() {
            SignatureVerdict::Accepted => Ok(()),
            SignatureVerdict::Invalid => Err(EzGpgError::SignatureInvalid { path }),
            SignatureVerdict::Unverifiable => Err(EzGpgError::SignatureUnverifiable { path }),
            SignatureVerdict::Untrusted => Err(EzGpgError::SignatureUntrusted {
                path,
                trust: self
                    .trust_level
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".into()),
            }),
        }
    }
}
