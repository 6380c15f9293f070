//! Scrollbar rendering helper
//!
//! Draws straight into a [`Buffer`] so the same helper works for panels
//! rendered through a `Frame` and for menus drawn into a scratch buffer.

use crate::scroll::ScrollState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget},
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom (↑ ↓)
    Arrows,
    /// Minimal style - no arrows, just the thumb
    #[default]
    Minimal,
}

/// Render a vertical scrollbar on the right edge of `area`
///
/// Only renders if content exceeds viewport.
pub fn render_scrollbar(
    buf: &mut Buffer,
    area: Rect,
    scroll: &ScrollState,
    style: ScrollbarStyle,
    thumb: Style,
) {
    if !scroll.needs_scrollbar() || area.height == 0 {
        return;
    }

    let scrollbar = match style {
        ScrollbarStyle::Arrows => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓")),
        ScrollbarStyle::Minimal => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
    }
    .thumb_style(thumb);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut state = ScrollbarState::new(content_length).position(scroll.offset());

    scrollbar.render(area, buf, &mut state);
}
