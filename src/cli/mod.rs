//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod auth;
pub mod context;
pub mod logout;
pub mod status;
pub mod upload;

pub use args::{GlobalOptions, LinkStyle, UploadArgs};

/// clip2imgur - upload the image on your clipboard to Imgur
///
/// Run without a subcommand to upload the clipboard image and copy the link.
#[derive(Parser, Debug)]
#[command(name = "clip2imgur")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    clip2imgur                    # Upload and copy the plain link\n  \
    clip2imgur -f markdown        # Copy ![](link)\n  \
    clip2imgur -f html --no-copy  # Print <img src=\"link\"> only\n  \
    clip2imgur --anonymous        # Skip your account, upload anonymously\n  \
    clip2imgur auth               # Authorize (or re-authorize) your Imgur account")]
pub struct Cli {
    /// Subcommand to execute (defaults to uploading)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub upload: UploadArgs,

    /// Override credential file location
    #[arg(long, global = true, env = "CLIP2IMGUR_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the Imgur application client id
    #[arg(long, global = true, env = "CLIP2IMGUR_CLIENT_ID", hide_env = true)]
    pub client_id: Option<String>,

    /// Custom API host (for testing)
    #[arg(long, global = true, env = "CLIP2IMGUR_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CLIP2IMGUR_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize clip2imgur to upload to your Imgur account
    Auth,

    /// Show authorization status
    Status,

    /// Forget the stored Imgur authorization
    Logout,

    /// Keep text on the clipboard until another application replaces it
    #[command(name = "hold-clipboard", hide = true)]
    HoldClipboard {
        /// Text to serve
        text: String,
    },
}
