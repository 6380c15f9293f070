//! Menu placement
//!
//! Pure geometry: given where the anchor sits in the viewport, how much
//! room there is, and how far the page is scrolled, decide whether the
//! menu opens below or above the anchor and where its top-left corner goes
//! in page coordinates.

use ratatui::layout::Rect;

/// Anchor bounds relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl AnchorRect {
    pub fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

impl From<Rect> for AnchorRect {
    fn from(r: Rect) -> Self {
        Self::new(r.y as i32, r.x as i32, r.width as i32, r.height as i32)
    }
}

/// How far the surrounding page is scrolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

/// Flip threshold and anchor gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Below this much free space under the anchor, consider opening upward
    pub flip_threshold: i32,
    /// Distance between anchor and menu
    pub gap: i32,
}

impl Default for Placement {
    /// Layout-unit constants (260 / 4)
    fn default() -> Self {
        Self {
            flip_threshold: 260,
            gap: 4,
        }
    }
}

impl Placement {
    /// Constants scaled for terminal rows
    pub fn terminal() -> Self {
        Self {
            flip_threshold: 10,
            gap: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
}

/// Computed menu placement, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuPosition {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub direction: Direction,
}

/// Place the menu relative to its anchor
///
/// `menu_height` is the menu's own height when known; `None` (nothing
/// measured yet) counts as zero.
pub fn compute_menu_position(
    anchor: AnchorRect,
    viewport_height: i32,
    scroll: ScrollOffset,
    menu_height: Option<i32>,
    placement: Placement,
) -> MenuPosition {
    let space_below = viewport_height - anchor.bottom();
    let space_above = anchor.top;
    let open_upward = space_below < placement.flip_threshold && space_above > space_below;

    let top = if open_upward {
        anchor.top + scroll.y - menu_height.unwrap_or(0) - placement.gap
    } else {
        anchor.bottom() + scroll.y + placement.gap
    };

    MenuPosition {
        top,
        left: anchor.left + scroll.x,
        width: anchor.width,
        direction: if open_upward {
            Direction::Up
        } else {
            Direction::Down
        },
    }
}

impl MenuPosition {
    /// Drawable area for a menu of `height` rows, kept inside `bounds`
    ///
    /// Page coordinates are shifted back by `scroll`. The menu is slid
    /// (not shrunk) to stay on screen when possible; it is only truncated
    /// when taller than `bounds`.
    pub fn to_rect(&self, height: u16, scroll: ScrollOffset, bounds: Rect) -> Rect {
        let b_top = bounds.y as i32;
        let b_left = bounds.x as i32;
        let b_bottom = bounds.bottom() as i32;
        let b_right = bounds.right() as i32;

        let height = (height as i32).min(bounds.height as i32).max(0);
        let width = self.width.min(bounds.width as i32).max(0);

        let mut top = self.top - scroll.y;
        if top + height > b_bottom {
            top = b_bottom - height;
        }
        top = top.max(b_top);

        let mut left = self.left - scroll.x;
        if left + width > b_right {
            left = b_right - width;
        }
        left = left.max(b_left);

        Rect::new(left as u16, top as u16, width as u16, height as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_downward_with_room() {
        let anchor = AnchorRect::new(40, 16, 300, 42);
        let pos = compute_menu_position(
            anchor,
            800,
            ScrollOffset::default(),
            Some(200),
            Placement::default(),
        );
        assert_eq!(pos.direction, Direction::Down);
        assert_eq!(pos.top, 82 + 4);
        assert_eq!(pos.left, 16);
        assert_eq!(pos.width, 300);
    }

    #[test]
    fn test_opens_upward_near_bottom() {
        // 400-tall viewport, anchor bottom at 342: 58 below, 300 above
        let anchor = AnchorRect::new(300, 16, 300, 42);
        let pos = compute_menu_position(
            anchor,
            400,
            ScrollOffset::default(),
            Some(180),
            Placement::default(),
        );
        assert_eq!(pos.direction, Direction::Up);
        assert_eq!(pos.top, 300 - 180 - 4);
    }

    #[test]
    fn test_unmeasured_menu_height_counts_as_zero() {
        let anchor = AnchorRect::new(300, 0, 100, 42);
        let pos =
            compute_menu_position(anchor, 400, ScrollOffset::default(), None, Placement::default());
        assert_eq!(pos.top, 296);
    }

    #[test]
    fn test_stays_down_when_above_is_not_larger() {
        // Little room both ways: below 30, above 20
        let anchor = AnchorRect::new(20, 0, 100, 50);
        let pos = compute_menu_position(
            anchor,
            100,
            ScrollOffset::default(),
            Some(120),
            Placement::default(),
        );
        assert_eq!(pos.direction, Direction::Down);
        assert_eq!(pos.top, 74);
    }

    #[test]
    fn test_scroll_offset_moves_into_page_space() {
        let anchor = AnchorRect::new(10, 5, 40, 3);
        let scroll = ScrollOffset { x: 2, y: 30 };
        let pos = compute_menu_position(anchor, 60, scroll, Some(8), Placement::terminal());
        assert_eq!(pos.top, 13 + 30);
        assert_eq!(pos.left, 7);
    }

    #[test]
    fn test_to_rect_slides_into_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let pos = MenuPosition {
            top: 20,
            left: 70,
            width: 20,
            direction: Direction::Down,
        };
        let rect = pos.to_rect(8, ScrollOffset::default(), bounds);
        assert_eq!(rect, Rect::new(60, 16, 20, 8));
    }

    #[test]
    fn test_to_rect_undoes_scroll_and_truncates() {
        let bounds = Rect::new(0, 0, 40, 5);
        let pos = MenuPosition {
            top: 12,
            left: 0,
            width: 10,
            direction: Direction::Up,
        };
        let rect = pos.to_rect(9, ScrollOffset { x: 0, y: 10 }, bounds);
        assert_eq!(rect, Rect::new(0, 0, 10, 5));
    }
}
