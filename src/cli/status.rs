//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::CredentialStore;
use crate::error::Result;
use crate::output::formatters::{format_epoch_local, format_span};

/// Run the status command to display authorization status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "clip2imgur Status".bold());

    let settings = opts.settings()?;
    let store = CredentialStore::new(&settings.credential_path);

    println!(
        "Credential file: {}",
        store.path().display().to_string().cyan()
    );
    println!();

    match store.load() {
        Ok(Some(credential)) => {
            if let Some(name) = credential.account_username() {
                println!("{} Authorized account: {}", "✓".green(), name.bold());
            } else {
                println!("{} Authorized", "✓".green());
            }

            let now = Utc::now().timestamp();
            if credential.is_expired_at(now) {
                println!(
                    "{} Token expired on {} (you will be asked to authorize on next upload)",
                    "⚠".yellow(),
                    format_epoch_local(credential.expires_at())
                );
            } else {
                println!(
                    "{} Token valid (expires in {})",
                    "✓".green(),
                    format_span(credential.expires_at() - now)
                );
            }
        }
        Ok(None) => {
            println!("{} Not authorized (uploads are anonymous)", "○".dimmed());
            println!("  → Run 'clip2imgur auth' to upload to your account");
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
        }
    }

    if settings.client_id != crate::config::DEFAULT_CLIENT_ID {
        println!("{} Custom client id: {}", "○".dimmed(), settings.client_id);
    }
    if settings.api_host != crate::config::DEFAULT_API_HOST {
        println!("{} Custom API host: {}", "○".dimmed(), settings.api_host.cyan());
    }

    println!();
    Ok(())
}
