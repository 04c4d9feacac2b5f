//! Session token persistence and identity resolution.
//!
//! The session token is an opaque bearer string obtained after OTP
//! verification. It is stored as a plain text file in the data directory,
//! and the stable user identifier is recovered from it on demand rather
//! than stored separately.

use std::fs;
use std::io;
use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Filename for the persisted session token.
const TOKEN_FILE: &str = "session_token";

/// Prefix for uids synthesized from tokens that do not decode.
const FALLBACK_TAG: &str = "tok_";

/// Persists the session token in the data directory.
#[derive(Clone, Debug)]
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    /// Saves the token, creating the data directory if needed.
    pub fn save_token(&self, token: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| SessionError::IoError(self.data_dir.clone(), e))?;
        let path = self.token_path();
        fs::write(&path, token).map_err(|e| SessionError::IoError(path, e))
    }

    /// Loads the stored token. Returns `Ok(None)` when none is stored.
    pub fn load_token(&self) -> Result<Option<String>, SessionError> {
        let path = self.token_path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::IoError(path, e)),
        }
    }

    /// Removes the stored token. Idempotent.
    pub fn clear_token(&self) -> Result<(), SessionError> {
        let path = self.token_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::IoError(path, e)),
        }
    }
}

/// Errors that can occur while persisting the session token.
#[derive(Debug)]
pub enum SessionError {
    /// I/O error reading or writing the token file.
    IoError(PathBuf, io::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::IoError(_, e) => Some(e),
        }
    }
}

/// Best-effort extraction of a stable user identifier from a session token.
///
/// Tokens shaped like a dot-separated JWT have their payload segment
/// base64url-decoded and searched for `user_id`, `uid`, then `sub`. Any
/// failure along the way (fewer than two segments, bad base64, bad JSON,
/// none of the keys present) maps to a deterministic fallback derived from
/// the token's first characters, so the same raw token always resolves to
/// the same uid.
pub fn resolve_user_id(token: &str) -> String {
    if let Some(uid) = decode_payload_uid(token) {
        return uid;
    }
    let head: String = token.chars().take(12).collect();
    format!("{}{}", FALLBACK_TAG, head)
}

fn decode_payload_uid(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    ["user_id", "uid", "sub"]
        .iter()
        .find_map(|key| claims.get(key).and_then(|v| v.as_str()).map(String::from))
}
