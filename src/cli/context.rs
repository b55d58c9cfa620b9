//! Per-invocation session
//!
//! Holds the resolved settings, the credential store and the credential that
//! is active for this run. Built once in the command handler and passed to
//! everything that needs authorization state.

use chrono::Utc;

use crate::auth::{self, Browser, Console};
use crate::cli::args::GlobalOptions;
use crate::client::Authorization;
use crate::config::{Credential, CredentialStore, Settings};
use crate::error::Result;

/// Session state for a single clip2imgur run
pub struct Session {
    /// Resolved settings
    pub settings: Settings,
    /// Owner of the on-disk credential
    pub store: CredentialStore,
    /// Credential active for this run, if any
    pub credential: Option<Credential>,
}

impl Session {
    /// Resolve settings and load the stored credential.
    ///
    /// # Errors
    /// Fails if the stored credential is malformed.
    pub fn open(opts: &GlobalOptions) -> Result<Self> {
        Self::from_settings(opts.settings()?)
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let store = CredentialStore::new(&settings.credential_path);
        let credential = store.load()?;
        Ok(Self {
            settings,
            store,
            credential,
        })
    }

    /// Session that ignores whatever is on disk (used to recover from a bad file).
    pub fn without_credential(settings: Settings) -> Self {
        let store = CredentialStore::new(&settings.credential_path);
        Self {
            settings,
            store,
            credential: None,
        }
    }

    /// Run the authorization flow; the new credential replaces the active one.
    pub fn authorize<C, B>(&mut self, console: &mut C, browser: &B) -> Result<&Credential>
    where
        C: Console + ?Sized,
        B: Browser + ?Sized,
    {
        let credential = auth::authorize(&self.settings, &self.store, console, browser)?;
        Ok(self.credential.insert(credential))
    }

    /// Header scheme for an upload made now
    pub fn authorization(&self, anonymous: bool) -> Authorization {
        Authorization::select(
            &self.settings.client_id,
            self.credential.as_ref(),
            anonymous,
            Utc::now().timestamp(),
        )
    }
}
