//! Core component trait

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Context passed to components during rendering
///
/// Components see the theme, whether they own focus, and how far they may
/// draw. Nothing here gives access to the host's mutable state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Whether this component currently has focus
    pub focused: bool,

    /// Area the component may paint into (for inline overlays)
    pub clip: Rect,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focused: bool, clip: Rect) -> Self {
        Self {
            theme,
            focused,
            clip,
        }
    }

    /// Same context with a different focus flag
    pub fn with_focus(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
/// Rendering takes `&mut self` because components record what they drew
/// (hit regions, viewport sizes) for the next round of input.
pub trait Component {
    /// Render the component to the given area
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
