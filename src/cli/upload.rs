//! Default action: upload the clipboard image
//!
//! Sequence: settle authorization, read the clipboard, upload once, format
//! the link and copy it back.

use colored::Colorize;

use crate::auth::{Browser, Console, SystemBrowser, TerminalConsole, confirm};
use crate::cli::args::{GlobalOptions, UploadArgs};
use crate::cli::context::Session;
use crate::client::{ImageHost, ImgurClient};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::error::Result;
use crate::output::{format_link, spinner};

/// Shown when the clipboard has nothing to upload
pub const NO_IMAGE_HINT: &str = "No image found on your clipboard. Copy an image (or take a screenshot to the clipboard) and try again.";

/// Result of an upload run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Clipboard held no image; nothing was uploaded
    NoImage,
    Uploaded {
        /// Raw image link
        link: String,
        /// Link rendered in the requested style
        formatted: String,
        /// Whether the anonymous pool was used
        anonymous: bool,
        /// Whether the formatted link was put on the clipboard
        copied: bool,
    },
}

/// Collaborators for one upload run
pub struct Io<'a> {
    pub host: &'a dyn ImageHost,
    pub clipboard: &'a mut dyn Clipboard,
    pub console: &'a mut dyn Console,
    pub browser: &'a dyn Browser,
}

/// Run the upload command against the real terminal, clipboard and Imgur
pub async fn run(opts: &GlobalOptions, args: &UploadArgs) -> Result<()> {
    let mut session = Session::open(opts)?;
    let client = ImgurClient::new(&session.settings)?;
    let mut clipboard = SystemClipboard::new()?;
    let mut console = TerminalConsole;

    let io = Io {
        host: &client,
        clipboard: &mut clipboard,
        console: &mut console,
        browser: &SystemBrowser,
    };

    match execute(&mut session, args, io).await? {
        Outcome::NoImage => {}
        Outcome::Uploaded {
            link,
            formatted,
            anonymous,
            copied,
        } => {
            log::debug!("Image link: {}", link);
            println!("{}", formatted);
            let target = if anonymous {
                "anonymously".to_string()
            } else {
                match session.credential.as_ref().and_then(|c| c.account_username()) {
                    Some(name) => format!("to {}'s account", name.bold()),
                    None => "to your account".to_string(),
                }
            };
            if copied {
                eprintln!(
                    "{} Uploaded {}; the link is copied to your clipboard.",
                    "✓".green(),
                    target
                );
            } else {
                eprintln!("{} Uploaded {}.", "✓".green(), target);
            }
        }
    }

    Ok(())
}

/// Orchestrate one upload.
pub async fn execute(session: &mut Session, args: &UploadArgs, io: Io<'_>) -> Result<Outcome> {
    let Io {
        host,
        clipboard,
        console,
        browser,
    } = io;

    if !args.anonymous {
        settle_authorization(session, console, browser)?;
    }

    let Some(image) = clipboard.read_image()? else {
        console.show(NO_IMAGE_HINT);
        return Ok(Outcome::NoImage);
    };

    if let Some(path) = &args.save {
        std::fs::write(path, &image)?;
        log::info!("Saved clipboard image to {}", path.display());
    }

    let auth = session.authorization(args.anonymous);
    let progress = spinner("Uploading to Imgur...");
    let uploaded = host.upload(&image, &auth).await;
    progress.finish_and_clear();
    let link = uploaded?;

    let formatted = format_link(&link, args.format);
    let copied = !args.no_copy;
    if copied {
        clipboard.copy_text(&formatted)?;
    }

    Ok(Outcome::Uploaded {
        link,
        formatted,
        anonymous: auth.is_anonymous(),
        copied,
    })
}

/// Re-authorize an expired credential, or offer authorization when none exists.
fn settle_authorization(
    session: &mut Session,
    console: &mut dyn Console,
    browser: &dyn Browser,
) -> Result<()> {
    match session.credential.as_ref().map(|c| c.is_expired()) {
        Some(true) => {
            console.show(&format!(
                "{} Your Imgur authorization has expired. Please authorize again.",
                "⚠".yellow()
            ));
            session.authorize(console, browser)?;
        }
        Some(false) => {}
        None => {
            console.show(
                "To upload images to your own Imgur collection, clip2imgur needs your authorization.",
            );
            if confirm(console, "Authorize now? [yes/no] (no uploads anonymously)")? {
                session.authorize(console, browser)?;
            } else {
                log::debug!("User chose an anonymous upload");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::Utc;
    use tempfile::{TempDir, tempdir};

    use crate::auth::RecordingBrowser;
    use crate::auth::console::ScriptedConsole;
    use crate::cli::LinkStyle;
    use crate::client::{Authorization, MockImageHost};
    use crate::clipboard::MemoryClipboard;
    use crate::config::{Credential, Settings};
    use crate::error::{Error, UploadError};

    const PNG: &[u8] = b"\x89PNG fake image";
    const REDIRECT: &str =
        "https://imgur.com/?state=copy-url#access_token=FRESH&expires_in=3600&token_type=bearer";

    fn session(temp: &TempDir, credential: Option<Credential>) -> Session {
        let path = temp.path().join("credential.json");
        let settings = Settings::resolve(path.to_str(), Some("app"), None).unwrap();
        let mut session = Session::without_credential(settings);
        if let Some(cred) = credential {
            session.store.save(&cred).unwrap();
            session.credential = Some(cred);
        }
        session
    }

    fn credential(issued_at: i64) -> Credential {
        Credential {
            access_token: "XYZ".to_string(),
            token_type: Some("bearer".to_string()),
            expires_in: 3600,
            issued_at,
            extra: BTreeMap::new(),
        }
    }

    fn args(format: LinkStyle, anonymous: bool, no_copy: bool) -> UploadArgs {
        UploadArgs {
            format,
            no_copy,
            anonymous,
            save: None,
        }
    }

    #[tokio::test]
    async fn test_empty_clipboard_makes_no_upload() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::default();
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let outcome = execute(&mut session, &args(LinkStyle::Plain, true, false), io)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoImage);
        assert_eq!(host.call_count().await, 0);
        assert!(clipboard.copied.is_empty());
        assert!(console.transcript().contains(NO_IMAGE_HINT));
    }

    #[tokio::test]
    async fn test_anonymous_upload_ignores_valid_credential() {
        let temp = tempdir().unwrap();
        let now = Utc::now().timestamp();
        let mut session = session(&temp, Some(credential(now)));
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let outcome = execute(&mut session, &args(LinkStyle::Plain, true, false), io)
            .await
            .unwrap();

        let calls = host.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].auth, Authorization::ClientId("app".to_string()));
        assert_eq!(calls[0].image, PNG);
        assert!(matches!(outcome, Outcome::Uploaded { anonymous: true, .. }));
    }

    #[tokio::test]
    async fn test_valid_credential_uses_bearer_without_prompting() {
        let temp = tempdir().unwrap();
        let now = Utc::now().timestamp();
        let mut session = session(&temp, Some(credential(now)));
        let host = MockImageHost::new().with_link("https://i.imgur.com/mine.png");
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let outcome = execute(&mut session, &args(LinkStyle::Plain, false, false), io)
            .await
            .unwrap();

        let calls = host.calls().await;
        assert_eq!(calls[0].auth, Authorization::Bearer("XYZ".to_string()));
        assert!(console.prompts.is_empty());
        assert!(matches!(
            outcome,
            Outcome::Uploaded { ref link, anonymous: false, .. } if link == "https://i.imgur.com/mine.png"
        ));
        assert_eq!(clipboard.copied, vec!["https://i.imgur.com/mine.png".to_string()]);
    }

    #[tokio::test]
    async fn test_declining_authorization_uploads_anonymously() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(["'No'"]);

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let outcome = execute(&mut session, &args(LinkStyle::Markdown, false, false), io)
            .await
            .unwrap();

        let calls = host.calls().await;
        assert_eq!(calls[0].auth, Authorization::ClientId("app".to_string()));
        assert_eq!(
            outcome,
            Outcome::Uploaded {
                link: "https://i.imgur.com/abc.png".to_string(),
                formatted: "![](https://i.imgur.com/abc.png)".to_string(),
                anonymous: true,
                copied: true,
            }
        );
        assert_eq!(clipboard.copied, vec!["![](https://i.imgur.com/abc.png)".to_string()]);
        assert!(session.store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_accepting_authorization_runs_flow_then_uploads_with_bearer() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        // Empty answer means yes, then Enter to open browser, then the redirect
        let mut console = ScriptedConsole::new(["", "", REDIRECT]);
        let browser = RecordingBrowser::default();

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &browser,
        };
        execute(&mut session, &args(LinkStyle::Plain, false, false), io)
            .await
            .unwrap();

        let calls = host.calls().await;
        assert_eq!(calls[0].auth, Authorization::Bearer("FRESH".to_string()));
        assert_eq!(browser.opened.borrow().len(), 1);
        assert_eq!(
            session.store.load().unwrap().unwrap().access_token,
            "FRESH"
        );
    }

    #[tokio::test]
    async fn test_expired_credential_triggers_reauthorization() {
        let temp = tempdir().unwrap();
        let stale = credential(Utc::now().timestamp() - 7_200);
        let mut session = session(&temp, Some(stale));
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(["", REDIRECT]);

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        execute(&mut session, &args(LinkStyle::Plain, false, false), io)
            .await
            .unwrap();

        assert!(console.transcript().contains("expired"));
        let calls = host.calls().await;
        assert_eq!(calls[0].auth, Authorization::Bearer("FRESH".to_string()));
    }

    #[tokio::test]
    async fn test_no_copy_leaves_clipboard_alone() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let outcome = execute(&mut session, &args(LinkStyle::Html, true, true), io)
            .await
            .unwrap();

        assert!(clipboard.copied.is_empty());
        match outcome {
            Outcome::Uploaded {
                formatted, copied, ..
            } => {
                assert_eq!(formatted, "<img src=\"https://i.imgur.com/abc.png\">");
                assert!(!copied);
            }
            other => panic!("Expected upload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_writes_png_file() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new();
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let target = temp.path().join("shot.png");

        let mut upload_args = args(LinkStyle::Plain, true, true);
        upload_args.save = Some(target.clone());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        execute(&mut session, &upload_args, io).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), PNG);
    }

    #[tokio::test]
    async fn test_rejection_propagates_without_copy() {
        let temp = tempdir().unwrap();
        let mut session = session(&temp, None);
        let host = MockImageHost::new().with_error(UploadError::Rejected {
            status: 400,
            body: serde_json::json!({"data": {"error": "bad request"}, "success": false}),
        });
        let mut clipboard = MemoryClipboard::with_image(PNG);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        let io = Io {
            host: &host,
            clipboard: &mut clipboard,
            console: &mut console,
            browser: &RecordingBrowser::default(),
        };
        let err = execute(&mut session, &args(LinkStyle::Plain, true, false), io)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Upload(UploadError::Rejected { status: 400, .. })
        ));
        assert_eq!(host.call_count().await, 1);
        assert!(clipboard.copied.is_empty());
    }
}
