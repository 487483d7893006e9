//! Signing-key resolution.
//!
//! The HS256 secret comes from explicit configuration when set. Otherwise it
//! is read from a `SECRET_KEY=` line in a dotenv-style file, and generated
//! and appended to that file on first use.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

use crate::AuthError;

const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Resolve the signing secret.
///
/// A non-empty `explicit` value wins; otherwise falls back to
/// [`read_or_create_secret`] on `secret_file`.
pub fn resolve_secret_key(explicit: Option<&str>, secret_file: &Path) -> Result<String, AuthError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(key) => Ok(key.to_string()),
        None => read_or_create_secret(secret_file),
    }
}

/// Read `SECRET_KEY=` from `path`, generating and appending one if absent.
pub fn read_or_create_secret(path: &Path) -> Result<String, AuthError> {
    if let Some(key) = read_secret(path)? {
        return Ok(key);
    }

    let key = generate_secret();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AuthError::SecretKey(format!("cannot open {}: {e}", path.display())))?;
    writeln!(file, "\n{SECRET_KEY_VAR}={key}")
        .map_err(|e| AuthError::SecretKey(format!("cannot write {}: {e}", path.display())))?;

    log::info!("Generated new signing key in {}", path.display());
    Ok(key)
}

/// Read `SECRET_KEY=` from `path`. A missing file yields `None`.
fn read_secret(path: &Path) -> Result<Option<String>, AuthError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AuthError::SecretKey(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };

    Ok(content
        .lines()
        .filter_map(|line| line.strip_prefix(SECRET_KEY_VAR)?.strip_prefix('='))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string))
}

/// 32 bytes from two v4 UUIDs (244 random bits), base64url without padding.
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}
