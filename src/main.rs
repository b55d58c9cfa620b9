//! clip2imgur - upload the image on your clipboard to Imgur

use clap::Parser;
use colored::Colorize;

mod auth;
mod cli;
mod client;
mod clipboard;
mod config;
mod error;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Some(Commands::Auth) => cli::auth::run(&opts),
        Some(Commands::Status) => cli::status::run(&opts),
        Some(Commands::Logout) => cli::logout::run(&opts),
        Some(Commands::HoldClipboard { text }) => clipboard::hold_text(&text),
        None => cli::upload::run(&opts, &cli.upload).await,
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--debug`
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
    log::debug!("Debug logging enabled");
}
