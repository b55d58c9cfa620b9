//! Auth command implementation

use colored::Colorize;

use crate::auth::{SystemBrowser, TerminalConsole};
use crate::cli::args::GlobalOptions;
use crate::cli::context::Session;
use crate::error::{CredentialError, Error, Result};
use crate::output::formatters::format_span;

/// Run the auth command: authorize even if a valid credential exists
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let settings = opts.settings()?;

    // A broken credential file is exactly what re-authorizing fixes
    let mut session = match Session::from_settings(settings.clone()) {
        Ok(session) => session,
        Err(Error::Credential(err @ CredentialError::Malformed { .. })) => {
            log::warn!("{}", err);
            println!("{} Replacing a malformed stored credential.", "⚠".yellow());
            Session::without_credential(settings)
        }
        Err(err) => return Err(err),
    };

    if let Some(credential) = &session.credential {
        if !credential.is_expired() {
            let remaining = credential.expires_at() - chrono::Utc::now().timestamp();
            println!(
                "{} Already authorized (expires in {}). Continuing will replace it.",
                "○".dimmed(),
                format_span(remaining)
            );
        }
    }

    let credential = session.authorize(&mut TerminalConsole, &SystemBrowser)?;

    match credential.account_username() {
        Some(name) => println!("Uploads will now go to {}'s account.", name.bold()),
        None => println!("Uploads will now go to your Imgur account."),
    }
    println!(
        "Credential saved to: {}",
        session.store.path().display().to_string().cyan()
    );

    Ok(())
}
