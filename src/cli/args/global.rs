//! Global CLI options shared across all commands
//!
//! For every option the precedence is: CLI flag > environment variable >
//! built-in default. The flag and environment layers are captured here; the
//! defaults are filled in by [`Settings::resolve`].

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Result;

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Custom credential file path
    pub config: Option<String>,

    /// Imgur application client id override
    pub client_id: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            client_id: cli.client_id.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Resolve these options into settings.
    pub fn settings(&self) -> Result<Settings> {
        Settings::resolve(
            self.config.as_deref(),
            self.client_id.as_deref(),
            self.api_host.as_deref(),
        )
    }
}
