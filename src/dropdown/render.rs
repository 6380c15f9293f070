//! Drawing the control and the menu
//!
//! Everything here paints into a [`Buffer`] and records what it drew in a
//! [`HitMap`]. State lives in the component; these functions only read it.
//!
//! ```text
//!  Label       ╭──────────────────────────────────╮
//!              │  Jakarta ✕   Bandung ✕         ▼ │   control
//!              ╰──────────────────────────────────╯
//!              ╭──────────────────────────────────╮
//!              │ ⌕ ban                          ✕ │   search row
//!              │──────────────────────────────────│
//!              │ ✓ Bandung                        │   option rows
//!              ╰──────────────────────────────────╯
//! ```

use super::filter::highlight;
use super::hit::{HitMap, HitTarget};
use super::option::DropdownOption;
use crate::scroll::ScrollState;
use crate::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::theme::{StyleClass, Theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest label column
pub const LABEL_MIN_WIDTH: u16 = 12;
/// Columns reserved for the open/closed indicator
const INDICATOR_WIDTH: u16 = 2;
const CHIP_GAP: u16 = 1;
const CHIP_REMOVE: &str = "✕";
const SEARCH_ICON: &str = "⌕";
const SELECTED_MARKER: &str = " ✓ ";
const UNSELECTED_MARKER: &str = "   ";

/// What a row renderer knows about the row it is drawing
#[derive(Debug, Clone, Copy)]
pub struct RowState<'a> {
    /// Option is part of the current value
    pub selected: bool,
    /// Keyboard cursor is on this row
    pub active: bool,
    /// Current search term (may be empty)
    pub search_term: &'a str,
    /// Display text from the configured label field
    pub label: &'a str,
    pub theme: &'a Theme,
}

/// Custom option rows
///
/// `render_row` replaces the default row content. Row background for the
/// selected and active states is still applied by the menu.
///
/// `on_activate` runs when the row is clicked or activated from the
/// keyboard. The widget does not select on its own for custom rows: the
/// option is committed only if the implementation calls `select`.
pub trait OptionRenderer {
    fn render_row(&self, option: &DropdownOption, state: RowState<'_>) -> Line<'static>;

    fn on_activate(&self, _option: &DropdownOption, select: &mut dyn FnMut()) {
        select();
    }
}

/// Truncate to at most `max` display columns, ending with `…` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Longest suffix of `text` fitting in `max` columns (search input scrolls left)
fn tail_to_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

// ─────────────────────────────────────────────────────────────
// Control
// ─────────────────────────────────────────────────────────────

/// Width of the label column for a component `total` columns wide
pub fn label_width(label: Option<&str>, total: u16) -> u16 {
    match label {
        Some(text) => (text.width() as u16 + 2).max(LABEL_MIN_WIDTH).min(total / 2),
        None => 0,
    }
}

/// Columns available for chips inside a control box `control_width` wide
pub fn content_width(control_width: u16) -> u16 {
    // borders + left padding + indicator
    control_width.saturating_sub(3 + INDICATOR_WIDTH)
}

/// Placement of one chip inside the control content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipSlot {
    /// Index into the chip list
    pub index: usize,
    pub row: u16,
    pub col: u16,
    pub width: u16,
    /// Label, truncated to fit a single row
    pub text: String,
}

/// Flow chips left to right, wrapping onto a new row when one does not fit
///
/// A chip renders as ` label ✕ `, i.e. label width + 4 columns.
pub fn layout_chips(labels: &[String], width: u16) -> Vec<ChipSlot> {
    let mut slots = Vec::with_capacity(labels.len());
    if width == 0 {
        return slots;
    }

    let max_label = (width as usize).saturating_sub(4);
    let (mut row, mut col) = (0u16, 0u16);
    for (index, label) in labels.iter().enumerate() {
        let text = truncate(label, max_label);
        let chip = (text.width() as u16 + 4).min(width);
        if col > 0 && col + chip > width {
            row += 1;
            col = 0;
        }
        slots.push(ChipSlot {
            index,
            row,
            col,
            width: chip,
            text,
        });
        col += chip + CHIP_GAP;
    }
    slots
}

/// Rows the chips occupy (at least one, for the placeholder)
pub fn chip_rows(slots: &[ChipSlot]) -> u16 {
    slots.last().map_or(1, |s| s.row + 1)
}

/// Everything needed to paint the always-visible control
#[derive(Debug, Clone)]
pub struct ControlView<'a> {
    pub label: Option<&'a str>,
    pub placeholder: &'a str,
    /// (identifier, display text) per selected option
    pub chips: Vec<(String, String)>,
    pub open: bool,
    pub focused: bool,
    pub class: StyleClass,
}

/// Paint label and control box; returns the control box (the menu anchor)
pub fn draw_control(
    buf: &mut Buffer,
    area: Rect,
    view: &ControlView,
    theme: &Theme,
    hits: &mut HitMap,
) -> Rect {
    let lw = label_width(view.label, area.width);
    if let (Some(label), true) = (view.label, lw > 1) {
        let label_y = if area.height >= 3 { area.y + 1 } else { area.y };
        Line::from(Span::styled(
            truncate(label, lw as usize - 1),
            Style::default()
                .fg(theme.label)
                .add_modifier(Modifier::BOLD),
        ))
        .render(Rect::new(area.x, label_y, lw, 1), buf);
    }

    let control = Rect {
        x: area.x + lw,
        width: area.width - lw,
        ..area
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.control_border(&view.class, view.focused || view.open)))
        .style(theme.control_style(&view.class));
    let inner = block.inner(control);
    block.render(control, buf);
    hits.register(control, HitTarget::ControlBody);

    let content = Rect {
        x: inner.x + 1.min(inner.width),
        width: content_width(control.width),
        ..inner
    };

    if view.chips.is_empty() {
        Line::from(Span::styled(
            truncate(view.placeholder, content.width as usize),
            Style::default().fg(theme.placeholder),
        ))
        .render(Rect { height: content.height.min(1), ..content }, buf);
    } else {
        let labels: Vec<String> = view.chips.iter().map(|(_, label)| label.clone()).collect();
        let chip_style = Style::default().bg(theme.chip_bg).fg(theme.chip_fg);

        for slot in layout_chips(&labels, content.width) {
            if slot.row >= content.height {
                break;
            }
            let chip = Rect::new(content.x + slot.col, content.y + slot.row, slot.width, 1);
            Line::from(vec![
                Span::styled(format!(" {} ", slot.text), chip_style),
                Span::styled(CHIP_REMOVE, chip_style.fg(theme.chip_remove)),
                Span::styled(" ", chip_style),
            ])
            .render(chip, buf);

            let remove_width = chip.width.min(2);
            hits.register(
                Rect::new(chip.right() - remove_width, chip.y, remove_width, 1),
                HitTarget::ChipRemove(view.chips[slot.index].0.clone()),
            );
        }
    }

    if inner.width >= INDICATOR_WIDTH && inner.height > 0 {
        let symbol = if view.open { "▲" } else { "▼" };
        buf.set_string(
            inner.right() - INDICATOR_WIDTH,
            inner.y,
            symbol,
            Style::default().fg(theme.indicator),
        );
    }

    control
}

// ─────────────────────────────────────────────────────────────
// Menu
// ─────────────────────────────────────────────────────────────

/// Total menu height: borders, optional search row + separator, list
pub fn menu_height(with_search: bool, filtered: usize, max_visible_rows: usize) -> u16 {
    let list = filtered.min(max_visible_rows.max(1)).max(1);
    let search = if with_search { 2 } else { 0 };
    (2 + search + list) as u16
}

/// Default row content: selected marker plus highlighted label
pub fn default_row(state: RowState<'_>) -> Line<'static> {
    let marker = if state.selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    };
    let match_style = Style::default()
        .bg(state.theme.match_bg)
        .fg(state.theme.match_fg);

    let mut spans = vec![Span::raw(marker)];
    spans.extend(highlight(state.label, state.search_term).into_iter().map(|seg| {
        if seg.matched {
            Span::styled(seg.text.to_string(), match_style)
        } else {
            Span::raw(seg.text.to_string())
        }
    }));
    Line::from(spans)
}

/// One visible menu row, already rendered to a line
#[derive(Debug, Clone)]
pub struct MenuRow {
    pub line: Line<'static>,
    pub selected: bool,
    pub active: bool,
}

#[derive(Debug)]
pub struct MenuView<'a> {
    pub with_search: bool,
    pub search_term: &'a str,
    pub search_placeholder: &'a str,
    pub search_focused: bool,
    pub empty_text: &'a str,
    /// Visible rows only
    pub rows: Vec<MenuRow>,
    /// Filtered index of `rows[0]`
    pub first_row: usize,
    pub scroll: &'a ScrollState,
}

fn row_style(row: &MenuRow, theme: &Theme) -> Style {
    let mut style = Style::default();
    if row.selected {
        style = style
            .bg(theme.selected_bg)
            .fg(theme.selected_fg)
            .add_modifier(Modifier::BOLD);
    }
    if row.active {
        style = style.bg(theme.active_bg).fg(theme.active_fg);
    }
    style
}

/// Paint the menu panel; returns where the search cursor belongs
pub fn draw_menu(
    buf: &mut Buffer,
    area: Rect,
    view: &MenuView,
    theme: &Theme,
    hits: &mut HitMap,
) -> Option<Position> {
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.menu_bg).fg(theme.foreground));
    let inner = block.inner(area);
    block.render(area, buf);
    hits.register(area, HitTarget::MenuBody);

    let mut list = inner;
    let mut cursor = None;

    if view.with_search && inner.height >= 2 && inner.width >= 6 {
        let search = Rect { height: 1, ..inner };
        hits.register(search, HitTarget::SearchInput);

        buf.set_string(
            search.x + 1,
            search.y,
            SEARCH_ICON,
            Style::default().fg(theme.search_icon),
        );

        let text_x = search.x + 3;
        let text_width = search.width.saturating_sub(6) as usize;
        if view.search_term.is_empty() {
            buf.set_stringn(
                text_x,
                search.y,
                view.search_placeholder,
                text_width,
                Style::default().fg(theme.placeholder),
            );
            if view.search_focused {
                cursor = Some(Position::new(text_x, search.y));
            }
        } else {
            let shown = tail_to_width(view.search_term, text_width);
            buf.set_string(text_x, search.y, shown, Style::default().fg(theme.foreground));
            if view.search_focused {
                cursor = Some(Position::new(text_x + shown.width() as u16, search.y));
            }

            buf.set_string(
                search.right() - 2,
                search.y,
                CHIP_REMOVE,
                Style::default().fg(theme.muted),
            );
            hits.register(
                Rect::new(search.right() - 3, search.y, 3, 1),
                HitTarget::SearchClear,
            );
        }

        buf.set_string(
            inner.x,
            inner.y + 1,
            "─".repeat(inner.width as usize),
            Style::default().fg(theme.border),
        );
        list = Rect {
            y: inner.y + 2,
            height: inner.height - 2,
            ..inner
        };
    }

    if list.height == 0 {
        return cursor;
    }

    if view.rows.is_empty() {
        Line::from(Span::styled(
            format!(" {}", view.empty_text),
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ))
        .render(Rect { height: 1, ..list }, buf);
        return cursor;
    }

    let needs_bar = view.scroll.needs_scrollbar();
    let row_width = if needs_bar {
        list.width.saturating_sub(1)
    } else {
        list.width
    };

    for (i, row) in view.rows.iter().enumerate().take(list.height as usize) {
        let row_area = Rect::new(list.x, list.y + i as u16, row_width, 1);
        buf.set_style(row_area, row_style(row, theme));
        row.line.clone().render(row_area, buf);
        hits.register(row_area, HitTarget::Row(view.first_row + i));
    }

    if needs_bar {
        render_scrollbar(
            buf,
            list,
            view.scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border_focused),
        );
    }

    cursor
}
