//! Runtime settings for clip2imgur
//!
//! Settings are resolved once at startup from CLI flags, environment variables
//! and built-in defaults (in that order of precedence), then carried in the
//! session value handed to every command.

use std::path::PathBuf;

use crate::error::{CredentialError, Result};

pub mod credential;

pub use credential::{Credential, CredentialStore};

/// Imgur application client id registered for clip2imgur
pub const DEFAULT_CLIENT_ID: &str = "95b05e2e3ac5624";

/// Imgur API base URL
pub const DEFAULT_API_HOST: &str = "https://api.imgur.com";

/// Directory name under the user configuration directory
const APP_DIR: &str = "clip2imgur";

/// Credential file name
const CREDENTIAL_FILE: &str = "credential.json";

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Imgur application client id, used for anonymous uploads and authorization
    pub client_id: String,

    /// API base URL without trailing slash
    pub api_host: String,

    /// Location of the persisted credential
    pub credential_path: PathBuf,
}

impl Settings {
    /// Resolve settings from optional overrides, falling back to defaults.
    pub fn resolve(
        config_path: Option<&str>,
        client_id: Option<&str>,
        api_host: Option<&str>,
    ) -> Result<Self> {
        let credential_path = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_credential_path()?,
        };

        Ok(Self {
            client_id: client_id.unwrap_or(DEFAULT_CLIENT_ID).to_string(),
            api_host: api_host
                .unwrap_or(DEFAULT_API_HOST)
                .trim_end_matches('/')
                .to_string(),
            credential_path,
        })
    }

    /// Get the default credential file path
    pub fn default_credential_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(CredentialError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(CREDENTIAL_FILE))
    }

    /// Image upload endpoint
    pub fn upload_url(&self) -> String {
        format!("{}/3/image", self.api_host)
    }

    /// Authorization page base (query string is appended by the flow)
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.api_host)
    }
}
