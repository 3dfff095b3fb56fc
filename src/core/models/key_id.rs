use crate::core::errors::{EzGpgError, Result};

/// Length class of an OpenPGP key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIdClass {
    /// 8 hex characters, collision-prone.
    Short,
    /// 16 hex characters.
    Long,
    /// Full 40 hex character fingerprint.
    Fingerprint,
}

impl KeyIdClass {
    /// Classify a raw identifier. Accepts an optional `0x` prefix.
    pub fn of(raw: &str) -> Option<Self> {
        let id = strip_hex_prefix(raw.trim());
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match id.len() {
            8 => Some(Self::Short),
            16 => Some(Self::Long),
            40 => Some(Self::Fingerprint),
            _ => None,
        }
    }
}

fn strip_hex_prefix(id: &str) -> &str {
    id.strip_prefix("0x")
        .or_else(|| id.strip_prefix("0X"))
        .unwrap_or(id)
}

/// Normalize an identifier to upper-case hex without a `0x` prefix.
///
/// Fails with `InvalidKeyId` when the identifier is not one of the
/// three length classes.
pub fn normalize(raw: &str) -> Result<String> {
    if KeyIdClass::of(raw).is_none() {
        return Err(EzGpgError::InvalidKeyId {
            id: raw.to_string(),
        });
    }
    Ok(strip_hex_prefix(raw.trim()).to_ascii_uppercase())
}

/// Compare two identifiers of possibly different length classes.
///
/// The shorter one must be a right-aligned suffix of the longer one.
/// Comparison ignores case and a leading `0x`; empty identifiers never match.
pub fn identifiers_match(a: &str, b: &str) -> bool {
    let a = strip_hex_prefix(a.trim()).to_ascii_uppercase();
    let b = strip_hex_prefix(b.trim()).to_ascii_uppercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.ends_with(&b) || b.ends_with(&a)
}
