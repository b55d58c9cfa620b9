//! Output formatting for CLI results

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::LinkStyle;

pub mod formatters;

/// Render an image link in the requested style
pub fn format_link(url: &str, style: LinkStyle) -> String {
    match style {
        LinkStyle::Plain => url.to_string(),
        LinkStyle::Markdown => format!("![]({})", url),
        LinkStyle::Html => format!("<img src=\"{}\">", url),
    }
}

/// Spinner on stderr while a request is in flight (hidden when not a terminal)
pub fn spinner(message: &str) -> ProgressBar {
    spinner_for(message, std::io::stderr().is_terminal())
}

fn spinner_for(message: &str, interactive: bool) -> ProgressBar {
    if !interactive {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
