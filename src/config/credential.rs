//! Persisted Imgur credential
//!
//! The store owns a single JSON file. A credential on disk is always complete:
//! it is written in one rename and replaced wholesale on re-authorization.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CredentialError, Result};

/// Access token obtained from the implicit grant, plus its lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token
    pub access_token: String,

    /// Token type as reported by Imgur (usually `bearer`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Seconds of validity from `issued_at`
    #[serde(deserialize_with = "de_seconds")]
    pub expires_in: u64,

    /// Epoch seconds at which the handshake completed
    #[serde(rename = "time", deserialize_with = "de_epoch")]
    pub issued_at: i64,

    /// Any other fragment keys (refresh_token, account_username, account_id, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Credential {
    /// Epoch second after which the token is no longer valid
    pub fn expires_at(&self) -> i64 {
        let lifetime = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
        self.issued_at.saturating_add(lifetime)
    }

    /// Expired if and only if `now > issued_at + expires_in`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at()
    }

    /// Check expiry against the current clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Imgur account name, if the handshake returned one
    pub fn account_username(&self) -> Option<&str> {
        self.extra.get("account_username").and_then(|v| v.as_str())
    }
}

impl TryFrom<BTreeMap<String, String>> for Credential {
    type Error = String;

    /// Build a credential from parsed fragment pairs (which must include `time`).
    fn try_from(mut fields: BTreeMap<String, String>) -> std::result::Result<Self, String> {
        let access_token = fields
            .remove("access_token")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "missing access_token".to_string())?;

        let expires_in = fields
            .remove("expires_in")
            .ok_or_else(|| "missing expires_in".to_string())?;
        let expires_in = expires_in
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("expires_in is not a number: {}", expires_in))?;

        let issued_at = fields
            .remove("time")
            .ok_or_else(|| "missing time".to_string())?;
        let issued_at = issued_at
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("time is not a number: {}", issued_at))?;

        let token_type = fields.remove("token_type");

        let extra = fields
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();

        Ok(Self {
            access_token,
            token_type,
            expires_in,
            issued_at,
            extra,
        })
    }
}

/// Older files store numbers as strings; accept both, write integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
}

fn de_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match NumberOrString::<u64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid expires_in: {}", s))),
    }
}

fn de_epoch<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    match NumberOrString::<i64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid time: {}", s))),
    }
}

/// Owner of the on-disk credential file
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored credential, `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            log::debug!("No credential at {}", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read(&self.path)?;
        let credential: Credential =
            serde_json::from_slice(&contents).map_err(|e| CredentialError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if credential.access_token.is_empty() {
            return Err(CredentialError::Malformed {
                path: self.path.clone(),
                reason: "access_token is empty".to_string(),
            }
            .into());
        }

        log::debug!(
            "Loaded credential from {} (expires at {})",
            self.path.display(),
            credential.expires_at()
        );
        Ok(Some(credential))
    }

    /// Persist a credential, replacing any previous one.
    ///
    /// Writes a sibling temp file and renames it over the target so readers
    /// never see a partial file.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(credential)
            .map_err(|e| CredentialError::SaveError(e.to_string()))?;

        let tmp_path = self.temp_path();
        std::fs::write(&tmp_path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&tmp_path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&tmp_path, perms)?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            CredentialError::SaveError(format!("{}: {}", self.path.display(), e))
        })?;

        log::info!("Saved credential to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored credential. Returns whether a file was deleted.
    pub fn delete(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        log::info!("Removed credential at {}", self.path.display());
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "credential".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
