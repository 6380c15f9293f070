// TUI application state
//
// The gallery: one card per story, an Actions panel, and the shell around
// them. App routes input to whoever owns it and feeds every story's value
// back into its dropdown after each event.

use super::components::{ActionsPanel, Toast};
use super::layout::PageLayout;
use super::modal::Modal;
use super::stories::Story;
use crate::config::Config;
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tui_dropdown::dropdown::{PointerListeners, ScrollOffset};
use tui_dropdown::theme::{Theme, ThemeConfig};
use tui_dropdown::traits::{Copyable, Handled, Interactive};
use tui_dropdown::{Dropdown, DropdownOption, DropdownValue};

/// Rows scrolled per mouse wheel notch over the gallery
const WHEEL_ROWS: i32 = 3;

/// What receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Story(usize),
    Actions,
}

/// One story on the gallery page
pub struct StoryCard {
    pub story: Story,
    pub dropdown: Dropdown,
    /// Host-owned value; `on_change` writes here
    pub value: Rc<RefCell<DropdownValue>>,
}

/// Main application state for the TUI
pub struct App {
    pub theme: Theme,
    pub config: Config,
    pub log_buffer: LogBuffer,
    pub cards: Vec<StoryCard>,
    pub actions_panel: ActionsPanel,
    pub focus: Focus,

    /// Gallery rows scrolled off the top
    pub page_scroll: u16,
    /// Card positions from the last render
    pub page: PageLayout,
    /// Gallery viewport from the last render
    pub gallery_area: Rect,
    /// Actions panel area from the last render
    pub actions_area: Rect,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    start_time: Instant,
    listeners: PointerListeners,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer, options: Vec<DropdownOption>) -> Self {
        let theme = Theme::by_name_with_config(
            &config.theme,
            &ThemeConfig {
                use_theme_background: config.use_theme_background,
            },
        );

        let listeners = PointerListeners::new();
        let cards = Story::ALL
            .iter()
            .map(|story| {
                let (dropdown, value) = story.build(&options, &config.dropdown, &listeners);
                StoryCard {
                    story: *story,
                    dropdown,
                    value,
                }
            })
            .collect();

        let mut app = Self {
            theme,
            actions_panel: ActionsPanel::new(log_buffer.clone()),
            log_buffer,
            cards,
            focus: Focus::Story(0),
            page_scroll: 0,
            page: PageLayout::default(),
            gallery_area: Rect::default(),
            actions_area: Rect::default(),
            modal: None,
            toast: None,
            should_quit: false,
            start_time: Instant::now(),
            listeners,
            config,
        };

        if let Some(slug) = app.config.story.clone() {
            match Story::from_slug(&slug) {
                Some(story) => app.focus_story(story),
                None => tracing::warn!("Unknown story '{}', starting on the first", slug),
            }
        }
        app.set_focus(app.focus);
        app
    }

    // ─────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────

    pub fn focus_story(&mut self, story: Story) {
        if let Some(i) = self.cards.iter().position(|c| c.story == story) {
            self.set_focus(Focus::Story(i));
        }
    }

    /// Move focus; a dropdown losing focus treats it as an outside press
    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            if let Focus::Story(i) = self.focus {
                if let Some(card) = self.cards.get_mut(i) {
                    if card.dropdown.wants_outside_clicks() {
                        card.dropdown.dismiss_outside();
                    }
                }
            }
        }

        self.focus = focus;
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.dropdown.set_focused(focus == Focus::Story(i));
        }
        self.reveal_focused();
    }

    /// Stories in order, then the Actions panel, wrapping around
    pub fn focus_next(&mut self) {
        let next = match self.focus {
            Focus::Story(i) if i + 1 < self.cards.len() => Focus::Story(i + 1),
            Focus::Story(_) => Focus::Actions,
            Focus::Actions => Focus::Story(0),
        };
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = match self.focus {
            Focus::Story(0) => Focus::Actions,
            Focus::Story(i) => Focus::Story(i - 1),
            Focus::Actions => Focus::Story(self.cards.len().saturating_sub(1)),
        };
        self.set_focus(prev);
    }

    /// Any story has its menu open
    pub fn any_open(&self) -> bool {
        self.cards.iter().any(|c| c.dropdown.is_open())
    }

    /// Whether the focused story's menu is open
    pub fn focused_open(&self) -> bool {
        match self.focus {
            Focus::Story(i) => self.cards.get(i).is_some_and(|c| c.dropdown.is_open()),
            Focus::Actions => false,
        }
    }

    /// Outside-click subscriptions currently held
    pub fn live_listeners(&self) -> usize {
        self.listeners.active()
    }

    /// Cards subscribed to outside presses, minus the one pressed on
    fn outside_subscribers(&self, owner: Option<usize>) -> Vec<usize> {
        let subscribed = self.listeners.subscribers();
        self.cards
            .iter()
            .enumerate()
            .filter(|(i, _)| owner != Some(*i))
            .filter(|(_, c)| {
                c.dropdown
                    .listener_id()
                    .is_some_and(|id| subscribed.contains(&id))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Close menus whose card is no longer fully on the page
    fn dismiss_off_page(&mut self) {
        if self.gallery_area.is_empty() {
            return;
        }
        for i in self.outside_subscribers(None) {
            if self
                .page
                .card_area(i, self.page_scroll, self.gallery_area)
                .is_none()
            {
                tracing::debug!(story = self.cards[i].story.slug(), "menu scrolled off page");
                self.cards[i].dropdown.dismiss_outside();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Controlled values
    // ─────────────────────────────────────────────────────────────

    /// Push each host value into its dropdown
    pub fn sync_values(&mut self) {
        for card in &mut self.cards {
            let value = card.value.borrow().clone();
            card.dropdown.set_value(value);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Page scrolling
    // ─────────────────────────────────────────────────────────────

    pub fn scroll_page(&mut self, delta: i32) {
        let max = self.page.max_scroll(self.gallery_area.height) as i32;
        let next = (self.page_scroll as i32 + delta).clamp(0, max.max(0));
        self.set_page_scroll(next as u16);
    }

    fn set_page_scroll(&mut self, scroll: u16) {
        if scroll == self.page_scroll {
            return;
        }
        self.page_scroll = scroll;
        let offset = ScrollOffset {
            x: 0,
            y: scroll as i32,
        };
        for card in &mut self.cards {
            card.dropdown.set_scroll_offset(offset);
        }
        self.dismiss_off_page();
    }

    /// Record this frame's layout and clamp the scroll to it
    pub fn update_page(&mut self, page: PageLayout, viewport: Rect) {
        self.page = page;
        self.gallery_area = viewport;
        let max = self.page.max_scroll(viewport.height);
        if self.page_scroll > max {
            self.set_page_scroll(max);
        }
        self.dismiss_off_page();
    }

    fn reveal_focused(&mut self) {
        if let Focus::Story(i) = self.focus {
            let scroll = self
                .page
                .reveal(i, self.page_scroll, self.gallery_area.height);
            self.set_page_scroll(scroll);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Input routing
    // ─────────────────────────────────────────────────────────────

    /// Keys for whatever has focus
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            Focus::Story(i) => {
                let Some(card) = self.cards.get_mut(i) else {
                    return Handled::No;
                };
                if card.dropdown.handle_key(key).was_handled() {
                    return Handled::Yes;
                }
                let rows = self.gallery_area.height.max(1) as i32;
                match key.code {
                    KeyCode::PageUp => self.scroll_page(-rows),
                    KeyCode::PageDown => self.scroll_page(rows),
                    _ => return Handled::No,
                }
                Handled::Yes
            }
            Focus::Actions => self.actions_panel.handle_key(key),
        }
    }

    /// Topmost open menu under the pointer
    ///
    /// Menus paint over controls; among overlapping menus the highest
    /// z-index wins, then the focused one.
    fn menu_owner(&self, column: u16, row: u16) -> Option<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.dropdown.menu_contains(column, row))
            .max_by_key(|(i, c)| (c.dropdown.props().z_index, self.focus == Focus::Story(*i)))
            .map(|(i, _)| i)
    }

    fn control_owner(&self, column: u16, row: u16) -> Option<usize> {
        self.cards
            .iter()
            .position(|c| c.dropdown.hit_test(column, row).is_some())
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.modal.is_some() {
            return;
        }

        let (column, row) = (mouse.column, mouse.row);
        let owner = self
            .menu_owner(column, row)
            .or_else(|| self.control_owner(column, row));
        let point = Position::new(column, row);

        match mouse.kind {
            MouseEventKind::Down(button) => {
                // Subscribed menus other than the owner see an outside press
                for i in self.outside_subscribers(owner) {
                    self.cards[i].dropdown.dismiss_outside();
                }

                if button != MouseButton::Left {
                    return;
                }
                if let Some(i) = owner {
                    self.set_focus(Focus::Story(i));
                    self.cards[i].dropdown.handle_mouse(mouse);
                } else if self.actions_area.contains(point) {
                    self.set_focus(Focus::Actions);
                    self.actions_panel.handle_mouse(mouse);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(i) = owner {
                    if self.cards[i].dropdown.handle_mouse(mouse).was_handled() {
                        return;
                    }
                }
                if self.actions_area.contains(point) {
                    self.actions_panel.handle_mouse(mouse);
                } else if self.gallery_area.contains(point) {
                    let delta = if mouse.kind == MouseEventKind::ScrollUp {
                        -WHEEL_ROWS
                    } else {
                        WHEEL_ROWS
                    };
                    self.scroll_page(delta);
                }
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────

    /// Clipboard content for `y`: the focused value as JSON, or the
    /// selected action
    pub fn copy_focused(&self) -> Option<(String, String)> {
        match self.focus {
            Focus::Story(i) => {
                let card = self.cards.get(i)?;
                let json = card.dropdown.copy_data()?;
                Some((json, card.dropdown.copy_description()))
            }
            Focus::Actions => {
                let text = self.actions_panel.copy_text()?;
                Some((text, self.actions_panel.copy_description()))
            }
        }
    }

    /// Clipboard content for `Y`: the focused story's selected labels
    pub fn copy_focused_labels(&self) -> Option<(String, String)> {
        let Focus::Story(i) = self.focus else {
            return None;
        };
        let card = self.cards.get(i)?;
        Some((card.dropdown.copy_text()?, "labels".to_string()))
    }

    // ─────────────────────────────────────────────────────────────
    // Shell
    // ─────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::stories::cities;
    use crossterm::event::KeyModifiers;
    use tui_dropdown::dropdown::HitTarget;

    fn app() -> App {
        App::new(Config::default(), LogBuffer::new(), cities())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(button: MouseButton, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_focus_cycles_through_actions() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Story(0));
        assert!(app.cards[0].dropdown.is_focused());

        app.focus_prev();
        assert_eq!(app.focus, Focus::Actions);
        assert!(app.cards.iter().all(|c| !c.dropdown.is_focused()));

        app.focus_next();
        assert_eq!(app.focus, Focus::Story(0));
    }

    #[test]
    fn test_configured_story_gets_focus() {
        let mut config = Config::default();
        config.story = Some("no-search".into());
        let app = App::new(config, LogBuffer::new(), cities());
        assert_eq!(app.focus, Focus::Story(5));
    }

    #[test]
    fn test_focus_change_dismisses_open_menu() {
        let mut app = app();
        app.dispatch_to_focused(key(KeyCode::Enter));
        app.cards[0].dropdown.set_search("ban");
        assert!(app.focused_open());
        assert_eq!(app.live_listeners(), 1);

        app.focus_next();
        assert!(!app.cards[0].dropdown.is_open());
        assert_eq!(app.cards[0].dropdown.search_term(), "");
        assert_eq!(app.live_listeners(), 0);
    }

    #[test]
    fn test_value_reaches_dropdown_only_after_sync() {
        let mut app = app();
        app.dispatch_to_focused(key(KeyCode::Enter));
        app.dispatch_to_focused(key(KeyCode::Down));
        app.dispatch_to_focused(key(KeyCode::Enter));

        assert_eq!(*app.cards[0].value.borrow(), DropdownValue::from("2"));
        assert!(app.cards[0].dropdown.value().is_empty());

        app.sync_values();
        assert_eq!(app.cards[0].dropdown.value(), &DropdownValue::from("2"));
        assert_eq!(app.copy_focused().unwrap().0, "\"2\"");
        assert_eq!(app.copy_focused_labels().unwrap().0, "Surabaya");
    }

    #[test]
    fn test_page_keys_scroll_closed_story() {
        let mut app = app();
        app.update_page(PageLayout::stack(&[5; 8]), Rect::new(0, 3, 40, 20));

        assert_eq!(app.dispatch_to_focused(key(KeyCode::PageDown)), Handled::Yes);
        assert_eq!(app.page_scroll, 20);
        app.scroll_page(100);
        assert_eq!(app.page_scroll, app.page.max_scroll(20));

        // Shrinking content clamps the offset
        app.update_page(PageLayout::stack(&[5; 4]), Rect::new(0, 3, 40, 20));
        assert_eq!(app.page_scroll, 0);
    }

    #[test]
    fn test_click_outside_closes_every_menu() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = app();
        let mut term = Terminal::new(TestBackend::new(100, 60)).unwrap();
        term.draw(|f| super::super::views::draw(f, &mut app)).unwrap();

        app.cards[0].dropdown.open();
        app.cards[7].dropdown.open();
        assert_eq!(app.live_listeners(), 2);
        term.draw(|f| super::super::views::draw(f, &mut app)).unwrap();

        // Click the last story's control body (not a chip): it toggles
        // closed, story 0 receives an outside press
        let body = app.gallery_area;
        let target = (body.x..body.right())
            .flat_map(|x| (body.y..body.bottom()).map(move |y| (x, y)))
            .find(|&(x, y)| {
                !app.cards[0].dropdown.menu_contains(x, y)
                    && app.cards[7].dropdown.hit_test(x, y) == Some(&HitTarget::ControlBody)
            })
            .unwrap();

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.0,
            row: target.1,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(app.focus, Focus::Story(7));
        assert!(!app.cards[0].dropdown.is_open());
        assert!(!app.cards[7].dropdown.is_open());
        assert_eq!(app.live_listeners(), 0);
    }

    #[test]
    fn test_right_press_outside_dismisses_without_refocusing() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = app();
        let mut term = Terminal::new(TestBackend::new(100, 60)).unwrap();
        term.draw(|f| super::super::views::draw(f, &mut app)).unwrap();

        app.cards[0].dropdown.open();
        app.cards[0].dropdown.set_search("ja");
        term.draw(|f| super::super::views::draw(f, &mut app)).unwrap();

        // Title bar: no card, no menu, not the Actions panel
        app.handle_mouse(press(MouseButton::Right, 1, 1));

        assert!(!app.cards[0].dropdown.is_open());
        assert_eq!(app.cards[0].dropdown.search_term(), "");
        assert_eq!(app.live_listeners(), 0);
        assert_eq!(app.focus, Focus::Story(0));
    }

    #[test]
    fn test_outside_press_reaches_only_subscribers() {
        let mut app = app();
        app.cards[0].dropdown.open();
        app.cards[7].dropdown.open();
        assert_eq!(app.outside_subscribers(None), vec![0, 7]);
        assert_eq!(app.outside_subscribers(Some(7)), vec![0]);

        // Closing drops the guard: the card is no longer a recipient
        app.cards[7].dropdown.close();
        assert_eq!(app.outside_subscribers(None), vec![0]);

        // A dropdown subscribed to some other registry is not ours to notify
        let foreign = PointerListeners::new();
        let (dropdown, _) = Story::ALL[3].build(&cities(), &app.config.dropdown, &foreign);
        app.cards[3].dropdown = dropdown;
        app.cards[3].dropdown.open();
        assert_eq!(foreign.active(), 1);
        assert_eq!(app.outside_subscribers(None), vec![0]);

        app.handle_mouse(press(MouseButton::Middle, 0, 0));
        assert!(!app.cards[0].dropdown.is_open());
        assert!(app.cards[3].dropdown.is_open());
        assert_eq!(app.live_listeners(), 0);
    }

    #[test]
    fn test_scrolling_a_menu_off_page_closes_it() {
        let mut app = app();
        app.update_page(PageLayout::stack(&[5; 8]), Rect::new(0, 3, 40, 20));

        app.cards[0].dropdown.open();
        app.cards[4].dropdown.open();
        assert_eq!(app.live_listeners(), 2);

        // Card 0 leaves the top, card 4 (rows 24..29) comes fully into view
        app.scroll_page(10);
        assert!(!app.cards[0].dropdown.is_open());
        assert!(app.cards[4].dropdown.is_open());
        assert_eq!(app.live_listeners(), 1);
    }
}
