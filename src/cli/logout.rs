//! Logout command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::CredentialStore;
use crate::error::Result;

/// Run the logout command to forget the stored credential
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let settings = opts.settings()?;
    let store = CredentialStore::new(&settings.credential_path);

    if store.delete()? {
        println!(
            "{} Removed stored authorization from {}",
            "✓".green(),
            store.path().display()
        );
    } else {
        println!("{} Not authorized; nothing to remove.", "○".dimmed());
    }

    Ok(())
}
