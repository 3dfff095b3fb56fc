use chrono::{DateTime, Utc};

use crate::core::models::key_record::KeyRecord;

const FIELD_KEY_ID: usize = 4;
const FIELD_CREATED: usize = 5;
// Holds the user id on `uid`, the fingerprint on `fpr`, the keygrip on `grp`.
const FIELD_USER_ID: usize = 9;

#[derive(Default)]
struct PartialKey {
    key_id: String,
    fingerprint: Option<String>,
    uid: Option<String>,
    subkey_ids: Vec<String>,
    is_secret: bool,
    created: Option<DateTime<Utc>>,
    in_subkey: bool,
}

impl PartialKey {
    fn finish(self) -> KeyRecord {
        let mut record = KeyRecord::new(
            self.key_id,
            self.fingerprint.unwrap_or_default(),
            self.subkey_ids,
            self.uid.unwrap_or_default(),
            self.is_secret,
        );
        record.created = self.created;
        record
    }
}

/// Parse a `gpg --with-colons --fixed-list-mode` listing into key
/// records, in listing order.
///
/// Only the record types needed for a `KeyRecord` are read:
/// `pub`/`sec` start a key, the first `fpr` after it is the primary
/// fingerprint, the first `uid` is the primary user id, and `sub`/`ssb`
/// contribute subkey ids. Everything else is ignored.
pub fn parse_key_listing(listing: &str) -> Vec<KeyRecord> {
    let mut keys = Vec::new();
    let mut current: Option<PartialKey> = None;

    for line in listing.lines() {
        let fields: Vec<&str> = line.trim_end().split(':').collect();
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        match field(0) {
            kind @ ("pub" | "sec") => {
                if let Some(done) = current.take() {
                    keys.push(done.finish());
                }
                current = Some(PartialKey {
                    key_id: field(FIELD_KEY_ID).to_ascii_uppercase(),
                    is_secret: kind == "sec",
                    created: parse_timestamp(field(FIELD_CREATED)),
                    ..Default::default()
                });
            }
            "fpr" => {
                if let Some(key) = current.as_mut() {
                    if !key.in_subkey && key.fingerprint.is_none() {
                        key.fingerprint = Some(field(FIELD_USER_ID).to_ascii_uppercase());
                    }
                }
            }
            "uid" => {
                if let Some(key) = current.as_mut() {
                    if key.uid.is_none() {
                        key.uid = Some(unescape(field(FIELD_USER_ID)));
                    }
                }
            }
            "sub" | "ssb" => {
                if let Some(key) = current.as_mut() {
                    key.in_subkey = true;
                    key.subkey_ids.push(field(FIELD_KEY_ID).to_ascii_uppercase());
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current {
        keys.push(done.finish());
    }
    keys
}

/// Keygrips (`grp` records) of every key and subkey in a listing made
/// with `--with-keygrip`, in listing order.
pub fn parse_keygrips(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|line| line.starts_with("grp:"))
        .filter_map(|line| line.trim_end().split(':').nth(FIELD_USER_ID))
        .filter(|grip| !grip.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Creation dates are seconds since the epoch; newer gpg may emit ISO 8601.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(secs) => DateTime::from_timestamp(secs, 0),
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
    }
}

/// Undo gpg's `\xHH` escaping of user ids (`:` appears as `\x3a`).
fn unescape(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            if let Some(byte) = bytes
                .get(i + 2..i + 4)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
tru::1:1700000000:0:3:1:5
pub:u:4096:1:0123456789ABCDEF:1600000000:::u:::scESC::::::23::0:
fpr:::::::::AAAABBBBCCCCDDDDEEEE11110123456789ABCDEF:
uid:u::::1600000000::HASH::Zed Example <zed@example.com>::::::::::0:
uid:u::::1600000000::HASH::Zed Alternate <zed2@example.com>::::::::::0:
sub:u:4096:1:FEDCBA9876543210:1600000000::::::e::::::23:
fpr:::::::::99998888777766665555FEDCBA9876543210:
pub:-:255:22:1111222233334444:1650000000:::-:::scSC::::::ed25519:::0:
fpr:::::::::00000000000000000000000000001111222233334444:
uid:-::::1650000000::HASH::Time\\x3a Keeper::::::::::0:
";

    #[test]
    fn parses_keys_in_listing_order() {
        let keys = parse_key_listing(LISTING);
        assert_eq!(keys.len(), 2);

        let zed = &keys[0];
        assert_eq!(zed.key_id, "0123456789ABCDEF");
        assert_eq!(zed.fingerprint, "AAAABBBBCCCCDDDDEEEE11110123456789ABCDEF");
        assert_eq!(zed.primary_uid, "Zed Example <zed@example.com>");
        assert_eq!(zed.subkey_ids, ["FEDCBA9876543210"]);
        assert!(!zed.is_secret);
        assert_eq!(zed.created.map(|d| d.timestamp()), Some(1_600_000_000));
    }

    #[test]
    fn subkey_fingerprint_does_not_replace_primary() {
        let keys = parse_key_listing(LISTING);
        assert!(keys[0].fingerprint.ends_with("0123456789ABCDEF"));
    }

    #[test]
    fn unescapes_colons_in_user_ids() {
        let keys = parse_key_listing(LISTING);
        assert_eq!(keys[1].primary_uid, "Time: Keeper");
        assert!(keys[1].subkey_ids.is_empty());
    }

    #[test]
    fn secret_listing_marks_records_secret() {
        let listing = "sec:u:4096:1:0123456789ABCDEF:1600000000:::u:::scESC:::+:::23::0:\n\
                       fpr:::::::::AAAABBBBCCCCDDDDEEEE11110123456789ABCDEF:\n\
                       uid:u::::1600000000::HASH::Alice::::::::::0:\n\
                       ssb:u:4096:1:FEDCBA9876543210:1600000000::::::e:::+:::23:\n";
        let keys = parse_key_listing(listing);
        assert!(keys[0].is_secret);
        assert_eq!(keys[0].subkey_ids, ["FEDCBA9876543210"]);
    }

    #[test]
    fn key_without_uid_gets_empty_name() {
        let keys = parse_key_listing("pub:u:255:22:1111222233334444:::::::::::\n");
        assert_eq!(keys[0].primary_uid, "");
        assert_eq!(keys[0].fingerprint, "");
        assert_eq!(keys[0].created, None);
    }

    #[test]
    fn collects_keygrips_for_key_and_subkeys() {
        let listing = "sec:u:4096:1:0123456789ABCDEF:1600000000:::u:::scESC:::+:::23::0:\n\
                       fpr:::::::::AAAABBBBCCCCDDDDEEEE11110123456789ABCDEF:\n\
                       grp:::::::::1F2E3D4C5B6A79881F2E3D4C5B6A79881F2E3D4C:\n\
                       uid:u::::1600000000::HASH::Alice::::::::::0:\n\
                       ssb:u:4096:1:FEDCBA9876543210:1600000000::::::e:::+:::23:\n\
                       fpr:::::::::99998888777766665555FEDCBA9876543210:\n\
                       grp:::::::::a1b2c3d4e5f60718a1b2c3d4e5f60718a1b2c3d4:\n";
        assert_eq!(
            parse_keygrips(listing),
            [
                "1F2E3D4C5B6A79881F2E3D4C5B6A79881F2E3D4C",
                "A1B2C3D4E5F60718A1B2C3D4E5F60718A1B2C3D4",
            ]
        );
        assert_eq!(parse_key_listing(listing).len(), 1);
    }

    #[test]
    fn empty_listing_has_no_keys() {
        assert!(parse_key_listing("").is_empty());
    }
}
