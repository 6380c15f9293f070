//! Clipboard helper for the `y` copy keys
//!
//! Uses `arboard` for cross-platform support. A fresh clipboard handle is
//! opened per copy so nothing is held between key presses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.to_owned())
        .context("Failed to set clipboard text")?;
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}
