//! Interactive trait for components that handle input
//!
//! The host routes keys to the focused component and mouse presses to
//! whichever component owns the point under the pointer.

use super::Component;
use crossterm::event::{KeyEvent, MouseEvent};

/// Result of handling an input event
///
/// Tells the host whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Host (modal first, then global: ?, q, y, Tab)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
///    │
///    │ returns Handled::Yes or Handled::No
///    ▼
/// Host (fallback handlers)
/// ```
pub trait Interactive: Component {
    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Handle a mouse event; default ignores it
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Handled {
        Handled::No
    }

    /// Whether this component can receive focus
    fn focusable(&self) -> bool {
        true
    }

    /// Hint text for status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Common scroll key handling for components that are both
/// [`Interactive`] and [`Scrollable`](super::Scrollable)
pub trait ScrollableInteractive: Interactive + super::Scrollable {
    /// Returns `Handled::Yes` for: Up, Down, k, j, Home, End, PageUp, PageDown
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

// Blanket implementation: anything that implements both traits gets this for free
impl<T: Interactive + super::Scrollable> ScrollableInteractive for T {}
