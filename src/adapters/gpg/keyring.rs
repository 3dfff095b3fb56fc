use std::ffi::OsString;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::adapters::gpg::colons::{parse_key_listing, parse_keygrips};
use crate::adapters::gpg::command::{GpgCommand, GpgOutput};
use crate::core::errors::{EzGpgError, Result};
use crate::core::models::fetch_result::FetchResult;
use crate::core::models::key_id::{identifiers_match, normalize};
use crate::core::models::key_record::{KeyRecord, sort_by_display_name};
use crate::core::models::verification::{TrustLevel, Verification};
use crate::core::traits::keyring::Keyring;

/// Appended to encrypted (and attached-signature) output files.
pub const ENCRYPTED_SUFFIX: &str = ".gpg";

/// Appended to detached signatures.
pub const SIGNATURE_SUFFIX: &str = ".sig";

/// Data signed by the passphrase check. The signature is thrown away.
const PASSPHRASE_PROBE: &[u8] = b"check string";

/// Stateless gateway issuing one keyring or file operation per call.
///
/// Nothing is cached between calls: every listing goes back to gpg.
#[derive(Debug, Clone)]
pub struct GpgKeyring {
    gpg: GpgCommand,
}

/// Public-key or passphrase-only encryption. Exactly one drives a run.
pub enum EncryptionMode {
    /// Encrypt to these key ids. Recipients are always trusted.
    PublicKey(Vec<String>),
    Symmetric(SecretString),
}

/// Parameters for a new key pair.
#[derive(Debug, Clone)]
pub struct KeyParams {
    pub name: String,
    pub email: String,
    pub key_type: String,
    pub key_length: u32,
}

impl KeyParams {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            key_type: "RSA".into(),
            key_length: 4096,
        }
    }
}

/// Result for one file of a multi-file operation.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub result: Result<PathBuf>,
}

impl GpgKeyring {
    pub fn new(gpg: GpgCommand) -> Self {
        Self { gpg }
    }

    /// Import every key found in `path`. Returns how many gpg processed.
    ///
    /// Fails with `InvalidKeyFile` when a dry run finds no key at all.
    pub fn import_key(&self, path: &Path) -> Result<usize> {
        ensure_exists(path)?;

        let mut scan = self.gpg.batch_args();
        scan.extend(args(&["--with-colons", "--import-options", "show-only", "--import", "--"]));
        scan.push(path.into());
        let scanned = self.gpg.run(&scan, None)?;
        if parse_key_listing(&String::from_utf8_lossy(&scanned.stdout)).is_empty() {
            return Err(EzGpgError::InvalidKeyFile {
                path: path.to_path_buf(),
            });
        }

        let mut import = self.gpg.batch_args();
        import.extend(args(&["--import", "--"]));
        import.push(path.into());
        let output = self.gpg.run(&import, None)?;

        let statuses = output.status_lines();
        let count = statuses
            .iter()
            .find(|s| s.keyword == "IMPORT_RES")
            .and_then(|s| s.args.first())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or_else(|| statuses.iter().filter(|s| s.keyword == "IMPORT_OK").count());

        if count == 0 {
            return Err(failed("import", &output));
        }
        tracing::info!(path = %path.display(), count, "keys imported");
        Ok(count)
    }

    /// Export the public key `key_id` to `path`.
    pub fn export_key(&self, key_id: &str, path: &Path, armored: bool) -> Result<()> {
        let mut export = self.gpg.batch_args();
        if armored {
            export.push("--armor".into());
        }
        export.extend(args(&["--export", "--"]));
        export.push(key_id.into());

        let output = self.gpg.run(&export, None)?;
        if !output.success() || output.stdout.is_empty() {
            return Err(EzGpgError::ExportFailed {
                key_id: key_id.to_string(),
            });
        }

        std::fs::write(path, &output.stdout)?;
        Ok(())
    }

    /// Delete a key. A secret key, if present, goes first; if that fails
    /// the public key is left alone.
    ///
    /// `key_id` may be a short id, a long id or a fingerprint.
    pub fn delete_key(&self, key_id: &str) -> Result<()> {
        let wanted = normalize(key_id)?;
        let secret = find_key(self.list_keys(true)?, &wanted);
        let public = find_key(self.list_keys(false)?, &wanted).ok_or_else(|| {
            EzGpgError::KeyNotFound {
                key_id: key_id.to_string(),
            }
        })?;

        if let Some(secret) = secret {
            tracing::info!(fingerprint = %secret.fingerprint, "deleting secret key");
            let output = self.delete(&secret.fingerprint, true)?;
            if !output.success() {
                return Err(EzGpgError::DeleteFailed {
                    key_id: key_id.to_string(),
                    reason: format!("secret key: {}", output.diagnostics()),
                });
            }
        }

        tracing::info!(fingerprint = %public.fingerprint, "deleting public key");
        let output = self.delete(&public.fingerprint, false)?;
        if !output.success() {
            return Err(EzGpgError::DeleteFailed {
                key_id: key_id.to_string(),
                reason: format!("public key: {}", output.diagnostics()),
            });
        }
        Ok(())
    }

    fn delete(&self, fingerprint: &str, secret: bool) -> Result<GpgOutput> {
        let mut delete = self.gpg.batch_args();
        delete.push("--yes".into());
        delete.push(if secret { "--delete-secret-keys" } else { "--delete-keys" }.into());
        delete.push("--".into());
        delete.push(fingerprint.into());
        self.gpg.run(&delete, None)
    }

    /// Generate a key pair and return its fingerprint.
    pub fn create_key(&self, params: &KeyParams, passphrase: &SecretString) -> Result<String> {
        let fields = [
            params.name.as_str(),
            params.email.as_str(),
            params.key_type.as_str(),
            passphrase.expose_secret(),
        ];
        if fields.iter().any(|f| f.contains(['\n', '\r'])) {
            return Err(EzGpgError::KeyGenerationFailed {
                reason: "name, email, key type and passphrase must be single-line".into(),
            });
        }

        let mut script = key_script(params, passphrase).into_bytes();

        let mut generate = self.gpg.batch_args();
        generate.push("--gen-key".into());
        let result = self.gpg.run(&generate, Some(&script));
        script.fill(0);
        let output = result?;

        let fingerprint = output
            .status_lines()
            .into_iter()
            .find(|s| s.keyword == "KEY_CREATED")
            .and_then(|s| s.args.get(1).cloned())
            .unwrap_or_default();

        if fingerprint.is_empty() {
            return Err(EzGpgError::KeyGenerationFailed {
                reason: output.diagnostics(),
            });
        }
        tracing::info!(%fingerprint, "key created");
        Ok(fingerprint)
    }

    /// Sign `path` with `key_id`. Returns the signature (or signed file) path.
    pub fn sign_file(
        &self,
        path: &Path,
        key_id: &str,
        passphrase: &SecretString,
        detached: bool,
        armored: bool,
    ) -> Result<PathBuf> {
        ensure_exists(path)?;
        let output_path = with_suffix(
            path,
            if detached {
                SIGNATURE_SUFFIX
            } else {
                ENCRYPTED_SUFFIX
            },
        );

        let mut sign = self.gpg.passphrase_args();
        sign.extend(args(&["--yes", "--local-user", key_id]));
        if armored {
            sign.push("--armor".into());
        }
        sign.push(if detached { "--detach-sign" } else { "--sign" }.into());
        sign.push("--output".into());
        sign.push(output_path.as_os_str().into());
        sign.push("--".into());
        sign.push(path.into());

        let output = self.gpg.run_with_passphrase(&sign, passphrase, b"")?;
        if !output.success() || !output.has_status("SIG_CREATED") {
            return Err(EzGpgError::SignFailed {
                path: path.to_path_buf(),
                reason: output.diagnostics(),
            });
        }
        Ok(output_path)
    }

    /// Check a signature. An inline signature is read from `path` itself.
    ///
    /// Only spawn failures are errors; a bad or missing signature is
    /// reported through the returned `Verification`.
    pub fn verify_file(&self, path: &Path, signature: Option<&Path>) -> Result<Verification> {
        ensure_exists(path)?;
        let mut verify = self.gpg.batch_args();
        verify.extend(args(&["--verify", "--"]));
        if let Some(sig) = signature {
            ensure_exists(sig)?;
            verify.push(sig.into());
        }
        verify.push(path.into());

        let output = self.gpg.run(&verify, None)?;
        let verification = parse_verification(&output);
        tracing::debug!(?verification, "signature checked");
        Ok(verification)
    }

    /// Encrypt each file to `<file>.gpg`, reporting success per file.
    pub fn encrypt_files(
        &self,
        paths: &[PathBuf],
        mode: &EncryptionMode,
        armored: bool,
    ) -> Result<Vec<FileOutcome>> {
        if let EncryptionMode::PublicKey(recipients) = mode {
            if recipients.is_empty() {
                return Err(EzGpgError::NoRecipients);
            }
        }

        Ok(paths
            .iter()
            .map(|source| FileOutcome {
                source: source.clone(),
                result: self.encrypt_file(source, mode, armored),
            })
            .collect())
    }

    fn encrypt_file(&self, path: &Path, mode: &EncryptionMode, armored: bool) -> Result<PathBuf> {
        ensure_exists(path)?;
        let output_path = with_suffix(path, ENCRYPTED_SUFFIX);

        let output = match mode {
            EncryptionMode::PublicKey(recipients) => {
                let mut encrypt = self.gpg.batch_args();
                encrypt.extend(args(&["--yes", "--trust-model", "always"]));
                if armored {
                    encrypt.push("--armor".into());
                }
                for recipient in recipients {
                    encrypt.push("--recipient".into());
                    encrypt.push(recipient.into());
                }
                encrypt.push("--output".into());
                encrypt.push(output_path.as_os_str().into());
                encrypt.extend(args(&["--encrypt", "--"]));
                encrypt.push(path.into());
                self.gpg.run(&encrypt, None)?
            }
            EncryptionMode::Symmetric(passphrase) => {
                let mut encrypt = self.gpg.passphrase_args();
                encrypt.push("--yes".into());
                if armored {
                    encrypt.push("--armor".into());
                }
                encrypt.push("--output".into());
                encrypt.push(output_path.as_os_str().into());
                encrypt.extend(args(&["--symmetric", "--"]));
                encrypt.push(path.into());
                self.gpg.run_with_passphrase(&encrypt, passphrase, b"")?
            }
        };

        if !output.success() {
            return Err(EzGpgError::EncryptionFailed {
                path: path.to_path_buf(),
                reason: output.diagnostics(),
            });
        }
        Ok(output_path)
    }

    /// Decrypt `<file>.gpg` to `<file>`.
    pub fn decrypt_file(&self, path: &Path, passphrase: &SecretString) -> Result<PathBuf> {
        ensure_exists(path)?;
        let output_path = strip_encrypted_suffix(path)?;

        let mut decrypt = self.gpg.passphrase_args();
        decrypt.push("--yes".into());
        decrypt.push("--output".into());
        decrypt.push(output_path.as_os_str().into());
        decrypt.extend(args(&["--decrypt", "--"]));
        decrypt.push(path.into());

        let output = self.gpg.run_with_passphrase(&decrypt, passphrase, b"")?;
        if !output.success() || !output.has_status("DECRYPTION_OKAY") {
            let reason = if output.has_status("BAD_PASSPHRASE") {
                "bad passphrase".to_string()
            } else {
                output.diagnostics()
            };
            return Err(EzGpgError::DecryptionFailed {
                path: path.to_path_buf(),
                reason,
            });
        }
        Ok(output_path)
    }

    /// Whether `passphrase` unlocks `key_id`.
    ///
    /// gpg has no direct passphrase check, so this signs a throwaway
    /// string and looks for non-empty output. The signature is discarded.
    /// gpg-agent's cached passphrase for the key is cleared first, otherwise
    /// any passphrase would pass for a recently unlocked key.
    pub fn check_key_passphrase(&self, key_id: &str, passphrase: &SecretString) -> Result<bool> {
        self.forget_cached_passphrase(key_id)?;

        let mut sign = self.gpg.passphrase_args();
        sign.extend(args(&["--local-user", key_id, "--sign"]));

        let output = self
            .gpg
            .run_with_passphrase(&sign, passphrase, PASSPHRASE_PROBE)?;
        let valid = output.success() && !output.stdout.is_empty();
        drop(output);

        tracing::debug!(%key_id, valid, "passphrase checked");
        Ok(valid)
    }

    /// Ask gpg-agent to drop its cached passphrase for every keygrip of
    /// `key_id`. An unreachable agent has nothing cached, so that only warns.
    fn forget_cached_passphrase(&self, key_id: &str) -> Result<()> {
        let mut list = self.gpg.batch_args();
        list.extend(args(&["--with-colons", "--with-keygrip", "--list-secret-keys", "--", key_id]));
        let output = self.gpg.run(&list, None)?;

        let grips = parse_keygrips(&String::from_utf8_lossy(&output.stdout));
        if grips.is_empty() {
            tracing::debug!(%key_id, "no keygrips listed, nothing to clear");
            return Ok(());
        }

        let commands: Vec<String> = grips
            .iter()
            .map(|grip| format!("CLEAR_PASSPHRASE --mode=normal {grip}"))
            .collect();
        match self.gpg.run_agent(&commands) {
            Ok(reply) => {
                let stdout = String::from_utf8_lossy(&reply.stdout);
                if !reply.success() || stdout.lines().any(|l| l.starts_with("ERR")) {
                    tracing::warn!(%key_id, reply = %stdout.trim(), "gpg-agent refused to clear cached passphrase");
                } else {
                    tracing::debug!(%key_id, count = grips.len(), "cached passphrases cleared");
                }
            }
            Err(e) => tracing::warn!(%key_id, error = %e, "could not reach gpg-agent"),
        }
        Ok(())
    }
}

impl Keyring for GpgKeyring {
    fn list_keys(&self, secret: bool) -> Result<Vec<KeyRecord>> {
        let mut list = self.gpg.batch_args();
        list.extend(args(&["--with-colons", "--fixed-list-mode"]));
        list.push(if secret { "--list-secret-keys" } else { "--list-keys" }.into());

        let output = self.gpg.run(&list, None)?;
        if !output.success() && output.stdout.is_empty() {
            return Err(failed("key listing", &output));
        }

        let mut keys = parse_key_listing(&String::from_utf8_lossy(&output.stdout));
        sort_by_display_name(&mut keys);
        Ok(keys)
    }

    fn receive_keys(&self, keyserver: &str, key_id: &str) -> Result<FetchResult> {
        let mut receive = self.gpg.batch_args();
        receive.extend(args(&["--keyserver", keyserver, "--recv-keys", key_id]));

        let output = self.gpg.run(&receive, None)?;
        if !output.success() {
            tracing::debug!(diagnostics = %output.diagnostics(), "recv-keys reported failure");
        }

        let fingerprints = output
            .status_lines()
            .into_iter()
            .filter(|s| s.keyword == "IMPORT_OK")
            .filter_map(|s| s.args.get(1).map(|f| f.to_ascii_uppercase()));
        Ok(FetchResult::new(key_id, fingerprints))
    }

    fn delete_fingerprints(&self, fingerprints: &[String]) -> Result<()> {
        if fingerprints.is_empty() {
            return Ok(());
        }
        let mut delete = self.gpg.batch_args();
        delete.extend(args(&["--yes", "--delete-keys", "--"]));
        delete.extend(fingerprints.iter().map(OsString::from));

        let output = self.gpg.run(&delete, None)?;
        if !output.success() {
            return Err(EzGpgError::DeleteFailed {
                key_id: fingerprints.join(", "),
                reason: output.diagnostics(),
            });
        }
        Ok(())
    }
}

fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}

fn failed(operation: &str, output: &GpgOutput) -> EzGpgError {
    EzGpgError::GpgFailed {
        operation: operation.to_string(),
        detail: output.diagnostics(),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(EzGpgError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// First key whose id or fingerprint matches `key_id` in any length class.
fn find_key(keys: Vec<KeyRecord>, key_id: &str) -> Option<KeyRecord> {
    keys.into_iter()
        .find(|k| identifiers_match(&k.key_id, key_id) || identifiers_match(&k.fingerprint, key_id))
}

/// Unattended key generation parameters. The primary key only signs and
/// certifies; the subkey only encrypts.
fn key_script(params: &KeyParams, passphrase: &SecretString) -> String {
    let protection = if passphrase.expose_secret().is_empty() {
        "%no-protection".to_string()
    } else {
        format!("Passphrase: {}", passphrase.expose_secret())
    };
    format!(
        "Key-Type: {kt}\nKey-Length: {kl}\nKey-Usage: sign\n\
         Subkey-Type: {kt}\nSubkey-Length: {kl}\nSubkey-Usage: encrypt\n\
         Name-Real: {name}\nName-Email: {email}\nExpire-Date: 0\n{protection}\n%commit\n",
        kt = params.key_type,
        kl = params.key_length,
        name = params.name,
        email = params.email,
    )
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// `secret.txt.gpg` → `secret.txt`. Anything else is refused.
pub fn strip_encrypted_suffix(path: &Path) -> Result<PathBuf> {
    let refused = || EzGpgError::MissingEncryptedSuffix {
        path: path.to_path_buf(),
        suffix: ENCRYPTED_SUFFIX.to_string(),
    };
    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(refused)?;
    match name.strip_suffix(ENCRYPTED_SUFFIX) {
        Some(stem) if !stem.is_empty() => Ok(path.with_file_name(stem)),
        _ => Err(refused()),
    }
}

/// Everything after the key id on a `GOODSIG`/`BADSIG` line.
fn signer_name(args: &[String]) -> Option<String> {
    let name = args.get(1..).unwrap_or_default().join(" ");
    (!name.is_empty()).then_some(name)
}

/// Build a `Verification` from `--verify` status lines.
fn parse_verification(output: &GpgOutput) -> Verification {
    let mut verification = Verification::default();

    for status in output.status_lines() {
        match status.keyword.as_str() {
            "GOODSIG" => {
                verification.valid = true;
                verification.key_id = status.args.first().cloned();
                verification.username = signer_name(&status.args);
            }
            "BADSIG" | "EXPSIG" | "EXPKEYSIG" | "REVKEYSIG" => {
                verification.valid = false;
                verification.key_id = status.args.first().cloned();
                verification.username = signer_name(&status.args);
            }
            "ERRSIG" | "NO_PUBKEY" => {
                verification.valid = false;
                if verification.key_id.is_none() {
                    verification.key_id = status.args.first().cloned();
                }
            }
            "VALIDSIG" => {
                verification.fingerprint = status.args.first().cloned();
            }
            keyword => {
                if let Some(level) = TrustLevel::from_status_keyword(keyword) {
                    verification.trust_level = Some(level);
                }
            }
        }
    }

    if !output.success() && verification.fingerprint.is_none() {
        verification.valid = false;
    }
    verification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn output(code: i32, stderr: &str) -> GpgOutput {
        use std::os::unix::process::ExitStatusExt;
        GpgOutput {
            status: std::process::ExitStatus::from_raw(code << 8),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn strips_exact_encrypted_suffix() {
        assert_eq!(
            strip_encrypted_suffix(Path::new("/tmp/report.pdf.gpg")).unwrap(),
            PathBuf::from("/tmp/report.pdf")
        );
        // Only the exact suffix, not trailing characters from it.
        assert_eq!(
            strip_encrypted_suffix(Path::new("logging.gpg")).unwrap(),
            PathBuf::from("logging")
        );
    }

    #[test]
    fn refuses_files_without_suffix() {
        for name in ["notes.txt", ".gpg", "archive.pgp"] {
            assert!(matches!(
                strip_encrypted_suffix(Path::new(name)),
                Err(EzGpgError::MissingEncryptedSuffix { .. })
            ));
        }
    }

    #[test]
    fn output_suffixes_are_appended() {
        assert_eq!(
            with_suffix(Path::new("a/b.txt"), ENCRYPTED_SUFFIX),
            PathBuf::from("a/b.txt.gpg")
        );
        assert_eq!(
            with_suffix(Path::new("b.txt"), SIGNATURE_SUFFIX),
            PathBuf::from("b.txt.sig")
        );
    }

    #[test]
    fn find_key_accepts_every_id_length() {
        let key = KeyRecord::new(
            "1111222233334444".into(),
            "0000000000000000000000001111222233334444".into(),
            vec![],
            "Alice".into(),
            false,
        );
        assert!(find_key(vec![key.clone()], "0x1111222233334444").is_some());
        assert!(find_key(vec![key.clone()], &key.fingerprint.to_lowercase()).is_some());
        assert!(find_key(vec![key.clone()], "33334444").is_some());
        assert!(find_key(vec![key], "11112222").is_none());
    }

    #[test]
    fn key_script_splits_signing_and_encryption() {
        let script = key_script(
            &KeyParams::new("Alice", "alice@example.com"),
            &SecretString::from("pw".to_string()),
        );
        assert!(script.contains("Key-Type: RSA\nKey-Length: 4096\nKey-Usage: sign\n"));
        assert!(script.contains("Subkey-Usage: encrypt\n"));
        assert!(script.contains("Passphrase: pw\n"));
        assert!(script.ends_with("%commit\n"));
    }

    #[test]
    fn key_script_without_passphrase_is_unprotected() {
        let script = key_script(
            &KeyParams::new("Alice", "alice@example.com"),
            &SecretString::from(String::new()),
        );
        assert!(script.contains("%no-protection\n"));
        assert!(!script.contains("Passphrase:"));
    }

    #[test]
    fn encrypting_without_recipients_fails() {
        let keyring = GpgKeyring::new(GpgCommand::new("gpg".into(), None));
        let result = keyring.encrypt_files(
            &[PathBuf::from("x.txt")],
            &EncryptionMode::PublicKey(vec![]),
            false,
        );
        assert!(matches!(result, Err(EzGpgError::NoRecipients)));
    }

    #[cfg(unix)]
    #[test]
    fn good_signature_with_full_trust() {
        let out = output(
            0,
            "gpg: Good signature from \"Alice\"\n\
             [GNUPG:] NEWSIG\n\
             [GNUPG:] GOODSIG 1111222233334444 Alice <alice@example.com>\n\
             [GNUPG:] VALIDSIG AAAA000011112222333344441111222233334444 2024-01-01 1704067200 0 4 0 1 10 00 AAAA000011112222333344441111222233334444\n\
             [GNUPG:] TRUST_FULLY 0 pgp\n",
        );
        let v = parse_verification(&out);
        assert!(v.valid);
        assert_eq!(v.trust_level, Some(TrustLevel::Full));
        assert_eq!(v.key_id.as_deref(), Some("1111222233334444"));
        assert_eq!(v.username.as_deref(), Some("Alice <alice@example.com>"));
        assert_eq!(
            v.fingerprint.as_deref(),
            Some("AAAA000011112222333344441111222233334444")
        );
    }

    #[cfg(unix)]
    #[test]
    fn bad_signature_is_not_valid() {
        let out = output(1, "[GNUPG:] BADSIG 1111222233334444 Alice\n");
        let v = parse_verification(&out);
        assert!(!v.valid);
        assert_eq!(v.trust_level, None);
    }

    #[cfg(unix)]
    #[test]
    fn missing_public_key_is_not_valid() {
        let out = output(
            2,
            "[GNUPG:] ERRSIG 1111222233334444 1 10 00 1704067200 9 -\n\
             [GNUPG:] NO_PUBKEY 1111222233334444\n",
        );
        let v = parse_verification(&out);
        assert!(!v.valid);
        assert_eq!(v.key_id.as_deref(), Some("1111222233334444"));
    }

    #[cfg(unix)]
    #[test]
    fn good_signature_with_undefined_trust() {
        let out = output(
            0,
            "[GNUPG:] GOODSIG 1111222233334444 Alice\n\
             [GNUPG:] VALIDSIG AAAA000011112222333344441111222233334444\n\
             [GNUPG:] TRUST_UNDEFINED 0 pgp\n",
        );
        let v = parse_verification(&out);
        assert!(v.valid);
        assert_eq!(v.trust_level, Some(TrustLevel::Unknown));
    }
}
