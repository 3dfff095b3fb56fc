use std::path::Path;

use crate::adapters::gpg::keyring::KeyParams;
use crate::cli::KeysAction;
use crate::cli::context::Context;
use crate::cli::{output, prompt};
use crate::core::errors::{EzGpgError, Result};
use crate::core::models::key_record::KeyRecord;
use crate::core::services::fetch_reconciler::FetchReconciler;
use crate::core::traits::keyring::Keyring;

/// Execute the `ezgpg keys` command.
pub fn execute(ctx: &Context, action: &KeysAction) -> Result<()> {
    match action {
        KeysAction::List { secret, json } => execute_list(ctx, *secret, *json),
        KeysAction::Import { file } => execute_import(ctx, file),
        KeysAction::Export { key, file, armor } => execute_export(ctx, key, file, *armor),
        KeysAction::Delete { key } => execute_delete(ctx, key),
        KeysAction::Create {
            name,
            email,
            key_type,
            key_length,
        } => execute_create(ctx, name, email, key_type, *key_length),
        KeysAction::Fetch { key, keyserver } => execute_fetch(ctx, key, keyserver.as_deref()),
        KeysAction::CheckPassphrase { key } => execute_check_passphrase(ctx, key),
        KeysAction::Servers => execute_servers(ctx),
    }
}

/// List public or secret keys, sorted by name.
fn execute_list(ctx: &Context, secret: bool, json: bool) -> Result<()> {
    let keys = ctx.keyring().list_keys(secret)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    let kind = if secret { "secret" } else { "public" };
    if keys.is_empty() {
        output::warning(&format!("No {kind} keys in the keyring."));
        println!("  Run 'ezgpg keys import <file>' or 'ezgpg keys create' to add one.");
        return Ok(());
    }

    output::header(&format!("Local {kind} keys ({})", keys.len()));
    for key in &keys {
        print_key(key);
    }
    Ok(())
}

fn print_key(key: &KeyRecord) {
    println!("  • {}", key.friendly_name());
    output::detail(&format!("Fingerprint: {}", key.fingerprint));
    if let Some(created) = key.created {
        output::detail(&format!("Created: {}", created.format("%Y-%m-%d")));
    }
    if !key.subkey_ids.is_empty() {
        output::detail(&format!("Subkeys: {}", key.subkey_ids.join(", ")));
    }
}

/// Import keys from a file.
fn execute_import(ctx: &Context, file: &Path) -> Result<()> {
    let count = ctx.keyring().import_key(file)?;
    output::success(&format!("Imported {count} key(s) from {}", file.display()));
    Ok(())
}

/// Export a public key.
fn execute_export(ctx: &Context, key: &str, file: &Path, armor: bool) -> Result<()> {
    ctx.keyring().export_key(key, file, ctx.armor(armor))?;
    output::success(&format!("Exported {key} to {}", file.display()));
    Ok(())
}

/// Delete a key, secret part first.
fn execute_delete(ctx: &Context, key: &str) -> Result<()> {
    ctx.keyring().delete_key(key)?;
    output::success(&format!("Deleted key {key}"));
    Ok(())
}

/// Generate a new key pair.
fn execute_create(
    ctx: &Context,
    name: &str,
    email: &str,
    key_type: &str,
    key_length: u32,
) -> Result<()> {
    let passphrase = prompt::new_passphrase(ctx.preset_passphrase(), "the new key")?;

    let params = KeyParams {
        key_type: key_type.to_string(),
        key_length,
        ..KeyParams::new(name, email)
    };

    let spinner = prompt::spinner(&format!(
        "Generating {key_type}-{key_length} key for {name} <{email}>, this can take a while..."
    ));
    let result = ctx.keyring().create_key(&params, &passphrase);
    spinner.finish_and_clear();

    let fingerprint = result?;
    output::success(&format!("Created key {fingerprint}"));
    println!("\n  Share your public key with: ezgpg keys export {fingerprint} <file> --armor");
    Ok(())
}

/// Fetch a key from a keyserver, removing colliding certificates.
fn execute_fetch(ctx: &Context, key: &str, keyserver: Option<&str>) -> Result<()> {
    let keyserver = keyserver.unwrap_or(ctx.config.keyservers.default.as_str());
    let keyring = ctx.keyring();
    let reconciler = FetchReconciler { keyring: &keyring };

    let spinner = prompt::spinner(&format!("Fetching {key} from {keyserver}..."));
    let result = reconciler.fetch_key(keyserver, key);
    spinner.finish_and_clear();

    let fingerprint = result?;
    output::success(&format!("Imported key {fingerprint} from {keyserver}"));
    Ok(())
}

/// Check a key's passphrase without using the key for anything else.
fn execute_check_passphrase(ctx: &Context, key: &str) -> Result<()> {
    let passphrase = prompt::passphrase(ctx.preset_passphrase(), &format!("Passphrase for {key}"))?;
    if ctx.keyring().check_key_passphrase(key, &passphrase)? {
        output::success("Passphrase is valid");
        Ok(())
    } else {
        Err(EzGpgError::WrongPassphrase {
            key_id: key.to_string(),
        })
    }
}

/// List configured keyservers.
fn execute_servers(ctx: &Context) -> Result<()> {
    let servers = &ctx.config.keyservers;
    output::header(&format!("Keyservers ({})", servers.servers.len()));
    for server in &servers.servers {
        if *server == servers.default {
            println!("  • {server} (default)");
        } else {
            println!("  • {server}");
        }
    }
    Ok(())
}
