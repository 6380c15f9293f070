//! Copyable trait for components that provide clipboard content

use super::Component;

/// Trait for components that can provide content for the clipboard
///
/// # Two Copy Modes
///
/// - **Text**: Human-readable format for pasting into docs, chat, etc.
/// - **Data**: Machine-readable format (JSON) for scripting
pub trait Copyable: Component {
    /// Human-readable text, `None` if there's nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// Machine-readable data; default is nothing
    fn copy_data(&self) -> Option<String> {
        None
    }

    /// Description of what will be copied (for toast messages)
    fn copy_description(&self) -> String {
        "content".to_string()
    }
}
