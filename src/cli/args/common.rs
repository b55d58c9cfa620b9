//! Common CLI types shared across commands

use std::path::PathBuf;

use clap::Args;

/// How the uploaded link is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LinkStyle {
    /// The bare image URL
    #[default]
    Plain,
    /// Markdown image embed: ![](URL)
    Markdown,
    /// HTML image tag: <img src="URL">
    Html,
}

/// Options for the default upload action
#[derive(Debug, Clone, Default, Args)]
pub struct UploadArgs {
    /// Link format to print and copy (plain, markdown, html)
    #[arg(long, short = 'f', default_value = "plain")]
    pub format: LinkStyle,

    /// Do not copy the link back to the clipboard
    #[arg(long, short = 'n')]
    pub no_copy: bool,

    /// Upload anonymously even if an authorized account is available
    #[arg(long, short = 'a')]
    pub anonymous: bool,

    /// Also save the clipboard image as a PNG file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}
