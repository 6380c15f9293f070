// Scroll state shared by the dropdown menu and the demo panels
//
// Each component owns its scroll state; hosts only render and route input.
//
// Two modes:
// 1. Auto-follow (log-style): new content keeps the view at the bottom
// 2. Manual (list-style): offset only moves on request or to reveal an item

/// Scroll state for a single list or panel
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (item index at top of viewport)
    offset: usize,

    /// Total number of items/lines in content
    total: usize,

    /// Number of items/lines visible in viewport
    viewport: usize,

    /// Whether to auto-follow new content (scroll to bottom)
    /// User scrolling up disables this; scrolling to bottom re-enables
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one unit
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one unit
    /// Re-enables auto-follow if we reach the bottom
    pub fn scroll_down(&mut self) {
        // Dimensions unknown until first render; render clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }

        if self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());

        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (and enable auto-follow)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Move the viewport the least amount needed to show `index`
    pub fn scroll_into_view(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Get total content size
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get viewport size
    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_manual_scroll_mode() {
        let mut scroll = ScrollState::manual();

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(7, 3);

        scroll.scroll_into_view(4);
        assert_eq!(scroll.visible_range(), (2, 5));

        // Already visible: no movement
        scroll.scroll_into_view(3);
        assert_eq!(scroll.offset(), 2);

        scroll.scroll_into_view(0);
        assert_eq!(scroll.visible_range(), (0, 3));

        scroll.scroll_into_view(6);
        assert_eq!(scroll.visible_range(), (4, 7));
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(20, 5);
        scroll.scroll_into_view(19);
        assert_eq!(scroll.offset(), 15);

        scroll.update_dimensions(3, 5);
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.needs_scrollbar());
    }
}
