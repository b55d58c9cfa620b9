//! Imgur implicit-grant authorization
//!
//! There is no local HTTP listener. The user opens the authorization page,
//! grants access, and pastes the URL Imgur redirects to back into the
//! terminal. The access token travels in that URL's fragment.

use std::collections::BTreeMap;

use chrono::Utc;
use colored::Colorize;

use crate::config::{Credential, CredentialStore, Settings};
use crate::error::Result;

pub mod console;

pub use console::{Console, TerminalConsole, confirm};

/// Fixed `state` marker sent with the authorization request
pub const STATE_MARKER: &str = "copy-url";

/// Every valid redirect starts with this
pub const REDIRECT_PREFIX: &str = "https://imgur.com/";

/// Something that can show a URL to the user in a browser
pub trait Browser {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs in the system default browser
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// Build the authorization page URL
pub fn authorization_url(settings: &Settings) -> String {
    format!(
        "{}?client_id={}&response_type=token&state={}",
        settings.authorize_endpoint(),
        settings.client_id,
        STATE_MARKER
    )
}

/// Parse the `key=value&...` fragment of `url` and stamp it with `time = now`.
///
/// Splits on the first `#`, then on `&`, then each piece on its first `=`.
/// Pieces without `=` are skipped. A URL without a fragment yields only `time`.
pub fn parse_fragment(url: &str, now: i64) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    if let Some((_, fragment)) = url.split_once('#') {
        for piece in fragment.split('&') {
            match piece.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    fields.insert(key.to_string(), value.to_string());
                }
                _ => {
                    if !piece.is_empty() {
                        log::debug!("Skipping malformed fragment piece {:?}", piece);
                    }
                }
            }
        }
    }

    fields.insert("time".to_string(), now.to_string());
    fields
}

/// Why a pasted URL was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Does not start with the Imgur redirect prefix
    WrongPrefix,
    /// Right host but no `#` fragment
    MissingFragment,
    /// Fragment present but lacks a usable token
    Incomplete(String),
}

impl Rejection {
    fn hint(&self) -> String {
        match self {
            Rejection::WrongPrefix => format!(
                "That does not look like the Imgur redirect. It should start with {}",
                REDIRECT_PREFIX
            ),
            Rejection::MissingFragment => {
                "The URL is missing the part after '#'. Make sure you copy the full URL."
                    .to_string()
            }
            Rejection::Incomplete(reason) => format!(
                "The URL does not contain a usable token ({}). Make sure you copy the full URL.",
                reason
            ),
        }
    }
}

/// Paste-back prompt states
#[derive(Debug)]
pub enum PromptState {
    AwaitingInput,
    Reprompt(Rejection),
    Valid(Credential),
}

/// Judge one pasted line.
pub fn evaluate(input: &str, now: i64) -> PromptState {
    let url = input.trim().trim_matches(|c| c == '\'' || c == '"');

    if !url.starts_with(REDIRECT_PREFIX) {
        return PromptState::Reprompt(Rejection::WrongPrefix);
    }
    if !url.contains('#') {
        return PromptState::Reprompt(Rejection::MissingFragment);
    }

    match Credential::try_from(parse_fragment(url, now)) {
        Ok(credential) => PromptState::Valid(credential),
        Err(reason) => PromptState::Reprompt(Rejection::Incomplete(reason)),
    }
}

/// Run the interactive handshake and persist the resulting credential.
///
/// Bad pastes re-prompt forever; only a valid URL or end of input ends the
/// loop. A browser that fails to open is reported but not fatal.
pub fn authorize<C, B>(
    settings: &Settings,
    store: &CredentialStore,
    console: &mut C,
    browser: &B,
) -> Result<Credential>
where
    C: Console + ?Sized,
    B: Browser + ?Sized,
{
    let url = authorization_url(settings);

    console.show(&format!(
        "\n{}\n",
        "To upload to your account, clip2imgur needs your authorization:".bold()
    ));
    console.show("(1) The Imgur authorization page will open in your default browser.");
    console.show("(2) Authorize this app.");
    console.show(
        "(3) You will be redirected to the Imgur home page. Copy the new URL from the address bar.\n",
    );
    console.prompt("Press [Enter] to start step (1)")?;

    if let Err(e) = browser.open(&url) {
        log::warn!("Failed to open browser: {}", e);
        console.show(&format!("{} Could not open a browser.", "⚠".yellow()));
    }
    console.show(&format!("Authorization page: {}\n", url.cyan()));
    console.show(&format!(
        "The new URL looks like {}#access_token=...",
        format!("{}?state={}", REDIRECT_PREFIX, STATE_MARKER).dimmed()
    ));

    let mut state = PromptState::AwaitingInput;
    loop {
        state = match state {
            PromptState::AwaitingInput => {
                let line = console.prompt("(4) Paste the full URL here")?;
                evaluate(&line, Utc::now().timestamp())
            }
            PromptState::Reprompt(rejection) => {
                log::debug!("Rejected pasted URL: {:?}", rejection);
                console.show(&format!("{} {}", "✗".red(), rejection.hint()));
                PromptState::AwaitingInput
            }
            PromptState::Valid(credential) => {
                store.save(&credential)?;
                console.show(&format!("{} Authorization successful!", "✓".green()));
                return Ok(credential);
            }
        };
    }
}

/// Test browser that records what it was asked to open
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    pub opened: std::cell::RefCell<Vec<String>>,
    pub fail: bool,
}

#[cfg(test)]
impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            Err(std::io::Error::other("no browser available"))
        } else {
            Ok(())
        }
    }
}
