//! Actions panel component
//!
//! Shows what the gallery logged: every `Value changed: ...` from a story's
//! `on_change`, refused selections, and any warnings. Entries stream in at
//! the bottom; moving the selection up pauses auto-follow.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tui_dropdown::scroll::ScrollState;
use tui_dropdown::scrollbar::{render_scrollbar, ScrollbarStyle};
use tui_dropdown::theme::Theme;
use tui_dropdown::traits::{
    Component, Copyable, Handled, Interactive, RenderContext, ScrollableInteractive, Scrollable,
};

pub struct ActionsPanel {
    buffer: LogBuffer,
    scroll: ScrollState,
    /// Selected entry index (None = auto-follow mode)
    pub selected: Option<usize>,
    /// Entry count at the last sync
    entry_count: usize,
    /// List area (inside borders) from the last render
    list_area: Rect,
}

impl ActionsPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            scroll: ScrollState::new(),
            selected: None,
            entry_count: 0,
            list_area: Rect::default(),
        }
    }

    /// Refresh dimensions from the shared buffer
    fn sync(&mut self, viewport_height: usize) -> Vec<LogEntry> {
        let entries = self.buffer.get_all();
        self.entry_count = entries.len();
        self.scroll.update_dimensions(entries.len(), viewport_height);

        if let Some(idx) = self.selected {
            if idx >= entries.len() {
                self.selected = entries.len().checked_sub(1);
            }
        }
        entries
    }

    /// Formatted text of the selected entry
    pub fn selected_entry_text(&self) -> Option<String> {
        let idx = self.selected?;
        self.buffer.get_all().get(idx).map(format_log_entry)
    }

    /// Multi-line view of the selected entry for the detail modal
    pub fn selected_entry_detail(&self) -> Option<String> {
        let idx = self.selected?;
        self.buffer.get_all().get(idx).map(|entry| {
            format!(
                "{}\n\nLevel:  {}\nTarget: {}\nTime:   {}",
                entry.message,
                entry.level.as_str(),
                entry.target,
                entry.timestamp.to_rfc3339()
            )
        })
    }

    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => {
                self.selected = Some(idx - 1);
                self.scroll.auto_follow = false;
                self.scroll.scroll_into_view(idx - 1);
            }
            None if self.entry_count > 0 => {
                // First selection starts from the most recent entry
                self.selected = Some(self.entry_count - 1);
            }
            _ => {}
        }
    }

    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.entry_count => {
                self.selected = Some(idx + 1);
                self.scroll.scroll_into_view(idx + 1);
            }
            None if self.entry_count > 0 => {
                self.selected = Some(self.entry_count - 1);
            }
            _ => {}
        }
    }

    /// Entry index under a screen position, if any
    fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.list_area.contains(Position::new(column, row)) {
            return None;
        }
        let idx = self.scroll.offset() + (row - self.list_area.y) as usize;
        (idx < self.entry_count).then_some(idx)
    }
}

impl Component for ActionsPanel {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(if ctx.focused {
                theme.border_focused
            } else {
                theme.border
            }))
            .title(if self.selected.is_some() && ctx.focused {
                " Actions [select] "
            } else if self.scroll.auto_follow {
                " Actions "
            } else {
                " Actions [scroll] "
            });
        self.list_area = block.inner(area);

        let entries = self.sync(self.list_area.height as usize);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(idx, entry)| {
                let style = if ctx.focused && self.selected == Some(idx) {
                    Style::default()
                        .fg(theme.selected_fg)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    log_level_style(&entry.level, theme)
                };
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
        render_scrollbar(
            f.buffer_mut(),
            area,
            &self.scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.muted),
        );
    }
}

impl Scrollable for ActionsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for ActionsPanel {
    fn copy_text(&self) -> Option<String> {
        self.selected_entry_text()
    }

    fn copy_description(&self) -> String {
        "action".to_string()
    }
}

impl Interactive for ActionsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Char('c') => {
                self.buffer.clear();
                self.selected = None;
                self.scroll.auto_follow = true;
                Handled::Yes
            }
            KeyCode::Esc if self.selected.is_some() => {
                self.selected = None;
                self.scroll.auto_follow = true;
                Handled::Yes
            }
            _ => self.handle_scroll_keys(key),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Handled {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.entry_at(mouse.column, mouse.row) {
                    Some(idx) => {
                        self.selected = Some(idx);
                        Handled::Yes
                    }
                    None => Handled::No,
                }
            }
            MouseEventKind::ScrollUp => {
                self.scroll_up();
                Handled::Yes
            }
            MouseEventKind::ScrollDown => {
                self.scroll_down();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focusable(&self) -> bool {
        true
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  Enter:detail  y:copy  c:clear  Esc:follow")
    }
}

/// Format a log entry for display
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.log_debug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_with(messages: &[&str]) -> LogBuffer {
        let buffer = LogBuffer::new();
        for message in messages {
            buffer.add(LogEntry {
                timestamp: Local::now(),
                level: LogLevel::Info,
                target: "dropdown_demo".into(),
                message: message.to_string(),
            });
        }
        buffer
    }

    fn draw(panel: &mut ActionsPanel, focused: bool) -> Terminal<TestBackend> {
        let theme = Theme::default();
        let mut term = Terminal::new(TestBackend::new(40, 6)).unwrap();
        term.draw(|f| {
            let area = f.area();
            panel.render(f, area, &RenderContext::new(&theme, focused, area));
        })
        .unwrap();
        term
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_follows_latest_entries() {
        let mut panel = ActionsPanel::new(buffer_with(&["a", "b", "c", "d", "e", "f"]));
        let term = draw(&mut panel, false);

        // 4 list rows: the last four entries
        assert_eq!(panel.visible_range(), (2, 6));
        let row: String = (1..39)
            .map(|x| term.backend().buffer()[(x, 4)].symbol().to_string())
            .collect();
        assert!(row.contains("INFO  f"), "row was {row:?}");
    }

    #[test]
    fn test_selection_starts_at_latest_and_copies() {
        let mut panel = ActionsPanel::new(buffer_with(&["first", "Value changed: \"2\""]));
        draw(&mut panel, true);

        assert_eq!(panel.handle_key(key(KeyCode::Up)), Handled::Yes);
        assert_eq!(panel.selected, Some(1));
        assert!(panel.copy_text().unwrap().ends_with("Value changed: \"2\""));

        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected, Some(0));

        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::Yes);
        assert_eq!(panel.selected, None);
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn test_detail_and_clear() {
        let mut panel = ActionsPanel::new(buffer_with(&["Value changed: []"]));
        draw(&mut panel, true);
        panel.handle_key(key(KeyCode::Up));

        let detail = panel.selected_entry_detail().unwrap();
        assert!(detail.starts_with("Value changed: []"));
        assert!(detail.contains("Target: dropdown_demo"));

        panel.handle_key(key(KeyCode::Char('c')));
        assert_eq!(panel.selected, None);
        assert_eq!(panel.selected_entry_detail(), None);
    }

    #[test]
    fn test_click_selects_entry_under_pointer() {
        let mut panel = ActionsPanel::new(buffer_with(&["a", "b"]));
        draw(&mut panel, true);

        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(panel.handle_mouse(click(2)), Handled::Yes);
        assert_eq!(panel.selected, Some(1));
        // Below the last entry
        assert_eq!(panel.handle_mouse(click(4)), Handled::No);
    }
}
