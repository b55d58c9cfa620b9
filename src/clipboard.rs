//! System clipboard access
//!
//! Uses arboard for cross-platform clipboard support. Images come out of
//! arboard as raw RGBA pixels and are re-encoded as PNG before upload.

use std::ffi::OsStr;
use std::io::Cursor;
use std::process::{Command, Stdio};

use image::{ImageFormat, RgbaImage};

use crate::error::{ClipboardError, Result};

/// Hidden subcommand that keeps copied text on the Linux clipboard
pub const HOLD_SUBCOMMAND: &str = "hold-clipboard";

/// Clipboard capabilities clip2imgur needs
pub trait Clipboard {
    /// PNG bytes of the image on the clipboard, `None` when there is no image.
    fn read_image(&mut self) -> Result<Option<Vec<u8>>>;

    /// Replace the clipboard contents with `text`.
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The real system clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn read_image(&mut self) -> Result<Option<Vec<u8>>> {
        match self.inner.get_image() {
            Ok(image) => {
                log::debug!("Clipboard image {}x{}", image.width, image.height);
                if image.width == 0 || image.height == 0 {
                    return Ok(None);
                }
                encode_png(image.width, image.height, image.bytes.into_owned()).map(Some)
            }
            Err(arboard::Error::ContentNotAvailable) => {
                log::debug!("Clipboard holds no image");
                Ok(None)
            }
            Err(arboard::Error::ConversionFailure) => {
                log::debug!("Clipboard content could not be read as an image");
                Ok(None)
            }
            Err(e) => Err(ClipboardError::Unavailable(e.to_string()).into()),
        }
    }

    // X11 and Wayland drop the selection when its owner exits, so a detached
    // copy of this binary takes ownership and serves it until replaced.
    #[cfg(target_os = "linux")]
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let exe = std::env::current_exe().map_err(|e| ClipboardError::Copy(e.to_string()))?;
        let child = holder_command(exe.as_os_str(), text)
            .spawn()
            .map_err(|e| ClipboardError::Copy(e.to_string()))?;
        log::debug!("Clipboard holder started (pid {})", child.id());
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn copy_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Copy(e.to_string()))?;
        Ok(())
    }
}

/// Command that re-runs `exe` as a detached clipboard holder for `text`
pub fn holder_command(exe: &OsStr, text: &str) -> Command {
    let mut command = Command::new(exe);
    command
        .arg(HOLD_SUBCOMMAND)
        .arg(text)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Own the clipboard with `text` until another application replaces it.
#[cfg(target_os = "linux")]
pub fn hold_text(text: &str) -> Result<()> {
    use arboard::SetExtLinux;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set()
        .wait()
        .text(text.to_string())
        .map_err(|e| ClipboardError::Copy(e.to_string()))?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn hold_text(text: &str) -> Result<()> {
    SystemClipboard::new()?.copy_text(text)
}

/// Encode raw RGBA pixels as a PNG file
pub fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Vec<u8>> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ClipboardError::Encode(format!(
                "image too large: {}x{}",
                width, height
            ))
            .into());
        }
    };

    let buffer = RgbaImage::from_raw(w, h, rgba).ok_or_else(|| {
        ClipboardError::Encode(format!("pixel buffer does not match {}x{}", w, h))
    })?;

    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ClipboardError::Encode(e.to_string()))?;
    Ok(png)
}

/// In-memory clipboard for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub image: Option<Vec<u8>>,
    pub copied: Vec<String>,
    pub reads: usize,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn with_image(image: &[u8]) -> Self {
        Self {
            image: Some(image.to_vec()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn read_image(&mut self) -> Result<Option<Vec<u8>>> {
        self.reads += 1;
        Ok(self.image.clone())
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        self.copied.push(text.to_string());
        Ok(())
    }
}
