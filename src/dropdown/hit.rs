//! Hit testing for mouse input
//!
//! The renderer records every interactive region it draws. Regions are
//! registered outer-first, so the last region containing a point is the
//! innermost one: a chip's remove button wins over the control body it
//! sits on, which is how a removal avoids also toggling the menu.

use ratatui::layout::{Position, Rect};

/// What a mouse press landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The always-visible control (opens/closes the menu)
    ControlBody,
    /// Remove affordance of the chip for this identifier
    ChipRemove(String),
    /// Menu background, borders, separator
    MenuBody,
    /// Search input
    SearchInput,
    /// Clear-search affordance
    SearchClear,
    /// Option row, by index into the filtered list
    Row(usize),
}

impl HitTarget {
    /// Part of the floating menu rather than the anchor
    pub fn in_menu(&self) -> bool {
        matches!(
            self,
            HitTarget::MenuBody | HitTarget::SearchInput | HitTarget::SearchClear | HitTarget::Row(_)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Only drop menu regions (menu is drawn in a later pass)
    pub fn clear_menu(&mut self) {
        self.regions.retain(|(_, t)| !t.in_menu());
    }

    pub fn register(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Innermost target under (column, row)
    pub fn hit(&self, column: u16, row: u16) -> Option<&HitTarget> {
        let point = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(point))
            .map(|(_, target)| target)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Append another map's regions, cut down to what is visible in `clip`
    pub fn merge_clipped(&mut self, other: HitMap, clip: Rect) {
        for (area, target) in other.regions {
            self.register(area.intersection(clip), target);
        }
    }

    /// Whether any menu region contains (column, row)
    pub fn hits_menu(&self, column: u16, row: u16) -> bool {
        self.hit(column, row).is_some_and(HitTarget::in_menu)
    }
}
