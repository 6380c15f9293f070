/// Layout helpers for the gallery.
///
/// Width breakpoints and the vertical page of story cards live here so the
/// render code has no magic numbers.
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Actions panel below the gallery
    Compact,
    /// 60-99 cols: Side by side, narrow Actions panel
    Normal,
    /// 100+ cols: Side by side
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// Rows between two cards
pub const CARD_GAP: u16 = 1;

/// Cards stacked top to bottom in page coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Page row of each card's first line
    pub tops: Vec<u16>,
    pub heights: Vec<u16>,
    /// Total page rows
    pub height: u16,
}

impl PageLayout {
    pub fn stack(heights: &[u16]) -> Self {
        let mut tops = Vec::with_capacity(heights.len());
        let mut y: u16 = 0;
        for (i, h) in heights.iter().enumerate() {
            if i > 0 {
                y = y.saturating_add(CARD_GAP);
            }
            tops.push(y);
            y = y.saturating_add(*h);
        }

        Self {
            tops,
            heights: heights.to_vec(),
            height: y,
        }
    }

    /// Largest useful scroll offset for a viewport of `viewport` rows
    pub fn max_scroll(&self, viewport: u16) -> u16 {
        self.height.saturating_sub(viewport)
    }

    /// Screen area of card `index`, only if it is fully inside `viewport`
    pub fn card_area(&self, index: usize, scroll: u16, viewport: Rect) -> Option<Rect> {
        let top = *self.tops.get(index)?;
        let height = *self.heights.get(index)?;
        if top < scroll || top + height > scroll + viewport.height {
            return None;
        }

        Some(Rect {
            x: viewport.x,
            y: viewport.y + (top - scroll),
            width: viewport.width,
            height,
        })
    }

    /// Smallest scroll change that brings card `index` fully into view
    pub fn reveal(&self, index: usize, scroll: u16, viewport: u16) -> u16 {
        let (Some(&top), Some(&height)) = (self.tops.get(index), self.heights.get(index)) else {
            return scroll;
        };

        if top < scroll {
            top
        } else if top + height > scroll + viewport {
            (top + height).saturating_sub(viewport).min(top)
        } else {
            scroll
        }
    }
}
