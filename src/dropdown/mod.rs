//! Searchable, optionally multi-select dropdown
//!
//! The component is controlled: the host owns the value, hands a copy in
//! with [`Dropdown::set_value`], and receives every change through the
//! `on_change` callback as a complete new value.
//!
//! ```text
//! key / mouse ──▶ Dropdown::handle_* ──▶ transition ──▶ on_change(value)
//!                                                         │
//!            next frame: render ◀── set_value ◀── host ◀──┘
//! ```
//!
//! Menus are drawn in one of two ways:
//! - portal (default): `render` draws only the control, the host calls
//!   `render_overlay` after everything else so the menu floats on top
//! - inline: `render` draws the menu too, clipped to the caller's clip area

pub mod controller;
pub mod filter;
pub mod hit;
pub mod option;
pub mod pointer;
pub mod position;
pub mod render;
pub mod selection;
pub mod value;

pub use controller::{CloseReason, MenuFocus, Transition};
pub use hit::HitTarget;
pub use option::{options_from_json, DropdownOption};
pub use pointer::{ListenerId, PointerListeners};
pub use position::{Direction, MenuPosition, Placement, ScrollOffset};
pub use render::{OptionRenderer, RowState};
pub use value::DropdownValue;

use crate::scroll::ScrollState;
use crate::theme::Theme;
use crate::traits::{Component, Copyable, Handled, Interactive, RenderContext};
use controller::Controller;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use hit::HitMap;
use position::compute_menu_position;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;
use render::{ControlView, MenuRow, MenuView};
use std::fmt;

/// Static configuration of one dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownProps {
    pub id: String,
    pub label: Option<String>,
    /// Option field shown to the user
    pub option_label: String,
    pub multiple: bool,
    pub with_search: bool,
    /// Draw the menu in the host's overlay pass instead of inline
    pub with_portal: bool,
    /// Overlay ordering among portal menus (higher draws on top)
    pub z_index: i32,
    /// Space-separated theme style classes applied to the control
    pub class_name: String,
    pub placeholder: String,
    pub search_placeholder: String,
    pub empty_text: String,
    pub max_visible_rows: usize,
    pub placement: Placement,
}

impl Default for DropdownProps {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: None,
            option_label: "label".to_string(),
            multiple: false,
            with_search: true,
            with_portal: true,
            z_index: 1000,
            class_name: String::new(),
            placeholder: "Select...".to_string(),
            search_placeholder: "Search...".to_string(),
            empty_text: "No options found".to_string(),
            max_visible_rows: 6,
            placement: Placement::default(),
        }
    }
}

impl DropdownProps {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn option_label(mut self, field: impl Into<String>) -> Self {
        self.option_label = field.into();
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_search(mut self, with_search: bool) -> Self {
        self.with_search = with_search;
        self
    }

    pub fn with_portal(mut self, with_portal: bool) -> Self {
        self.with_portal = with_portal;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

type ChangeHandler = Box<dyn FnMut(DropdownValue)>;

/// The dropdown component
pub struct Dropdown {
    props: DropdownProps,
    options: Vec<DropdownOption>,
    value: DropdownValue,
    on_change: Option<ChangeHandler>,
    renderer: Option<Box<dyn OptionRenderer>>,
    controller: Controller,
    search: String,
    /// Keyboard cursor, index into the filtered list
    active: Option<usize>,
    list_scroll: ScrollState,
    focused: bool,
    page_scroll: ScrollOffset,
    /// Control box from the last render (menu anchor)
    anchor: Option<Rect>,
    /// Menu area from the last render, before clipping
    menu_area: Option<Rect>,
    hits: HitMap,
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("props", &self.props)
            .field("value", &self.value)
            .field("open", &self.is_open())
            .field("search", &self.search)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    pub fn new(props: DropdownProps, options: Vec<DropdownOption>, value: DropdownValue) -> Self {
        Self {
            props,
            options,
            value,
            on_change: None,
            renderer: None,
            controller: Controller::new(PointerListeners::new()),
            search: String::new(),
            active: None,
            list_scroll: ScrollState::manual(),
            focused: false,
            page_scroll: ScrollOffset::default(),
            anchor: None,
            menu_area: None,
            hits: HitMap::new(),
        }
    }

    /// Register the change callback
    pub fn on_change(mut self, handler: impl FnMut(DropdownValue) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Replace the default option rows
    pub fn option_renderer(mut self, renderer: impl OptionRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Share an outside-click registry with other dropdowns
    pub fn listeners(mut self, listeners: PointerListeners) -> Self {
        self.controller = Controller::new(listeners);
        self
    }

    pub fn props(&self) -> &DropdownProps {
        &self.props
    }

    pub fn id(&self) -> &str {
        &self.props.id
    }

    pub fn value(&self) -> &DropdownValue {
        &self.value
    }

    /// Accept the host's current value
    pub fn set_value(&mut self, value: DropdownValue) {
        if self.value != value {
            tracing::trace!(dropdown = %self.props.id, value = %value, "value synced");
            self.value = value;
        }
    }

    pub fn set_options(&mut self, options: Vec<DropdownOption>) {
        self.options = options;
        self.sync_list_scroll();
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// How far the page hosting this dropdown is scrolled
    pub fn set_scroll_offset(&mut self, scroll: ScrollOffset) {
        self.page_scroll = scroll;
    }

    // ─────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────

    /// Selected options in option order
    pub fn selected_options(&self) -> Vec<&DropdownOption> {
        selection::selected_options(&self.options, &self.value, self.props.multiple)
    }

    /// Options matching the current search term
    pub fn filtered_options(&self) -> Vec<&DropdownOption> {
        filter::filter_options(&self.options, &self.props.option_label, &self.search)
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Last computed menu placement, `None` while closed
    pub fn menu_position(&self) -> Option<MenuPosition> {
        self.controller.open_menu().and_then(|m| m.position)
    }

    pub fn menu_focus(&self) -> Option<MenuFocus> {
        self.controller.open_menu().map(|m| m.focus)
    }

    /// Keyboard cursor row (index into `filtered_options`)
    pub fn active_row(&self) -> Option<usize> {
        self.active
    }

    /// Holding a live outside-click subscription
    pub fn wants_outside_clicks(&self) -> bool {
        self.controller.wants_outside_clicks()
    }

    /// Subscription to match against [`PointerListeners::subscribers`]
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.controller.listener_id()
    }

    /// Innermost region drawn at (column, row) during the last render
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&HitTarget> {
        self.hits.hit(column, row)
    }

    /// Whether (column, row) falls on this dropdown's visible menu
    pub fn menu_contains(&self, column: u16, row: u16) -> bool {
        self.is_open() && self.hits.hits_menu(column, row)
    }

    /// Rows needed to show every chip at `width` columns
    pub fn desired_height(&self, width: u16) -> u16 {
        let label_width = render::label_width(self.props.label.as_deref(), width);
        let labels = self.chip_labels();
        if labels.is_empty() {
            return 3;
        }
        let content = render::content_width(width.saturating_sub(label_width));
        render::chip_rows(&render::layout_chips(&labels, content)) + 2
    }

    fn chip_labels(&self) -> Vec<String> {
        self.selected_options()
            .iter()
            .map(|o| o.display_text(&self.props.option_label))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────

    pub fn open(&mut self) -> Transition {
        let focus = if self.props.with_search {
            MenuFocus::Search
        } else {
            MenuFocus::List
        };

        let transition = self.controller.open(focus);
        if transition == Transition::Opened {
            self.sync_list_scroll();
            let active = {
                let filtered = self.filtered_options();
                filtered
                    .iter()
                    .position(|o| selection::is_selected(o, &self.value, self.props.multiple))
                    .or((!filtered.is_empty()).then_some(0))
            };
            self.active = active;
            self.list_scroll.scroll_to_top();
            if let Some(index) = active {
                self.list_scroll.scroll_into_view(index);
            }
            tracing::debug!(dropdown = %self.props.id, "menu opened");
        }
        transition
    }

    /// Close without resetting the search term
    pub fn close(&mut self) -> Transition {
        self.close_with(CloseReason::Toggle)
    }

    pub fn toggle(&mut self) -> Transition {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    fn close_with(&mut self, reason: CloseReason) -> Transition {
        let transition = self.controller.close(reason);
        if let Transition::Closed(reason) = transition {
            if reason.clears_search() {
                self.search.clear();
            }
            self.menu_area = None;
            self.hits.clear_menu();
            tracing::debug!(dropdown = %self.props.id, ?reason, "menu closed");
        }
        transition
    }

    /// Pointer-down or focus change elsewhere; closes and clears search
    pub fn dismiss_outside(&mut self) -> bool {
        matches!(
            self.close_with(CloseReason::OutsideClick),
            Transition::Closed(_)
        )
    }

    /// Pick an option by identifier
    ///
    /// Multi-select toggles membership and keeps the menu open;
    /// single-select replaces the value, closes the menu and resets search.
    pub fn select(&mut self, id: &str) {
        let outcome = selection::toggle(&self.value, id, self.props.multiple);
        if outcome.close_menu {
            self.close_with(CloseReason::Committed);
        }
        if outcome.clear_search {
            self.search.clear();
        }
        self.emit(outcome.value);
    }

    /// Drop one identifier from the value (chip removal)
    pub fn remove(&mut self, id: &str) {
        let value = selection::remove(&self.value, id, self.props.multiple);
        self.emit(value);
    }

    fn emit(&mut self, value: DropdownValue) {
        tracing::debug!(dropdown = %self.props.id, value = %value, "change requested");
        if let Some(handler) = self.on_change.as_mut() {
            handler(value);
        }
    }

    /// Activate a filtered row, deferring to a custom renderer if present
    fn activate_row(&mut self, index: usize) {
        let Some(option) = self.filtered_options().get(index).map(|o| (*o).clone()) else {
            return;
        };

        let mut chosen = self.renderer.is_none();
        if let Some(renderer) = &self.renderer {
            renderer.on_activate(&option, &mut || chosen = true);
        }

        if chosen {
            self.select(&option.value);
        } else {
            tracing::debug!(dropdown = %self.props.id, option = %option.value, "row activation declined");
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.reset_active();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.reset_active();
    }

    pub fn pop_search_char(&mut self) -> bool {
        let popped = self.search.pop().is_some();
        if popped {
            self.reset_active();
        }
        popped
    }

    /// Reset the term; the menu stays open with the search input focused
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.reset_active();
        self.set_menu_focus(MenuFocus::Search);
    }

    fn set_menu_focus(&mut self, focus: MenuFocus) {
        if let Some(menu) = self.controller.open_menu_mut() {
            menu.focus = focus;
        }
    }

    fn reset_active(&mut self) {
        let len = self.sync_list_scroll();
        self.active = (len > 0).then_some(0);
        self.list_scroll.scroll_to_top();
    }

    /// Refresh list dimensions; returns the filtered length
    fn sync_list_scroll(&mut self) -> usize {
        let len = self.filtered_options().len();
        self.list_scroll
            .update_dimensions(len, self.props.max_visible_rows.max(1));
        self.active = match self.active {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
        len
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.sync_list_scroll();
        if len == 0 {
            self.active = None;
            return;
        }

        let last = len as isize - 1;
        let next = match self.active {
            Some(i) => (i as isize + delta).clamp(0, last),
            None if delta < 0 => last,
            None => 0,
        } as usize;

        self.active = Some(next);
        self.list_scroll.scroll_into_view(next);
    }

    // ─────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────

    /// Draw the control (and the menu, when inline) into `area`
    ///
    /// `clip` bounds an inline menu; it is ignored in portal mode.
    pub fn render(&mut self, f: &mut Frame, area: Rect, clip: Rect, theme: &Theme) {
        let frame = f.area();
        let area = area.intersection(frame);
        self.hits.clear();
        self.anchor = None;
        if area.is_empty() {
            return;
        }

        let view = ControlView {
            label: self.props.label.as_deref(),
            placeholder: &self.props.placeholder,
            chips: self
                .selected_options()
                .iter()
                .map(|o| (o.value.clone(), o.display_text(&self.props.option_label)))
                .collect(),
            open: self.controller.is_open(),
            focused: self.focused,
            class: theme.resolve_classes(&self.props.class_name),
        };
        let anchor = render::draw_control(f.buffer_mut(), area, &view, theme, &mut self.hits);
        self.anchor = Some(anchor);

        if self.is_open() && !self.props.with_portal {
            let height = self.update_menu_position(anchor, frame.height);
            self.paint_menu(f, clip.intersection(frame), theme, height);
        }
    }

    /// Draw a portal menu above everything rendered so far
    pub fn render_overlay(&mut self, f: &mut Frame, theme: &Theme) {
        if !self.props.with_portal || !self.is_open() {
            return;
        }
        // Anchor not drawn this frame (scrolled away): nothing to attach to
        let Some(anchor) = self.anchor else {
            return;
        };

        let frame = f.area();
        let height = self.update_menu_position(anchor, frame.height);
        self.paint_menu(f, frame, theme, height);
    }

    /// Recompute placement from the current anchor; returns menu height
    fn update_menu_position(&mut self, anchor: Rect, viewport_height: u16) -> u16 {
        let len = self.sync_list_scroll();
        let height =
            render::menu_height(self.props.with_search, len, self.props.max_visible_rows);
        let position = compute_menu_position(
            anchor.into(),
            viewport_height as i32,
            self.page_scroll,
            Some(height as i32),
            self.props.placement,
        );
        if let Some(menu) = self.controller.open_menu_mut() {
            menu.position = Some(position);
        }
        height
    }

    fn menu_view<'a>(&'a self, theme: &'a Theme) -> MenuView<'a> {
        let filtered = self.filtered_options();
        let (start, end) = self.list_scroll.visible_range();

        let rows = filtered
            .iter()
            .enumerate()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(index, option)| {
                let label = option.display_text(&self.props.option_label);
                let state = RowState {
                    selected: selection::is_selected(option, &self.value, self.props.multiple),
                    active: self.active == Some(index),
                    search_term: &self.search,
                    label: &label,
                    theme,
                };
                let line = match &self.renderer {
                    Some(renderer) => renderer.render_row(option, state),
                    None => render::default_row(state),
                };
                MenuRow {
                    line,
                    selected: state.selected,
                    active: state.active,
                }
            })
            .collect();

        MenuView {
            with_search: self.props.with_search,
            search_term: &self.search,
            search_placeholder: &self.props.search_placeholder,
            search_focused: self.focused && self.menu_focus() == Some(MenuFocus::Search),
            empty_text: &self.props.empty_text,
            rows,
            first_row: start,
            scroll: &self.list_scroll,
        }
    }

    /// Draw the menu off-screen, then copy the part inside `clip`
    fn paint_menu(&mut self, f: &mut Frame, clip: Rect, theme: &Theme, height: u16) {
        self.hits.clear_menu();
        let Some(position) = self.menu_position() else {
            return;
        };

        let area = position.to_rect(height, self.page_scroll, f.area());
        self.menu_area = Some(area);
        if area.is_empty() {
            return;
        }

        let mut scratch = Buffer::empty(area);
        let mut menu_hits = HitMap::new();
        let cursor = render::draw_menu(
            &mut scratch,
            area,
            &self.menu_view(theme),
            theme,
            &mut menu_hits,
        );

        let visible = area.intersection(clip);
        let buf = f.buffer_mut();
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                buf[(x, y)] = scratch[(x, y)].clone();
            }
        }
        self.hits.merge_clipped(menu_hits, visible);

        if let Some(cursor) = cursor.filter(|c| visible.contains(*c)) {
            f.set_cursor_position(cursor);
        }
    }

    /// Menu area drawn in the last frame (unclipped)
    pub fn menu_area(&self) -> Option<Rect> {
        self.menu_area
    }
}

impl Component for Dropdown {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        self.focused = ctx.focused;
        Dropdown::render(self, f, area, ctx.clip, ctx.theme);
    }
}

impl Interactive for Dropdown {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press {
            return Handled::No;
        }

        if !self.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.open();
                    Handled::Yes
                }
                _ => Handled::No,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = self.props.max_visible_rows.max(1) as isize;
        match key.code {
            KeyCode::Esc => {
                self.close_with(CloseReason::Escape);
            }
            KeyCode::Up => self.move_active(-1),
            KeyCode::Down => self.move_active(1),
            KeyCode::PageUp => self.move_active(-page),
            KeyCode::PageDown => self.move_active(page),
            KeyCode::Home => self.move_active(isize::MIN / 2),
            KeyCode::End => self.move_active(isize::MAX / 2),
            KeyCode::Enter => {
                if let Some(index) = self.active {
                    self.activate_row(index);
                }
            }
            KeyCode::Backspace if self.props.with_search => {
                self.pop_search_char();
                self.set_menu_focus(MenuFocus::Search);
            }
            KeyCode::Char('u') if ctrl && self.props.with_search => self.clear_search(),
            KeyCode::Char(' ') if !self.props.with_search || self.search.is_empty() => {
                if let Some(index) = self.active {
                    self.activate_row(index);
                }
            }
            KeyCode::Char(c) if self.props.with_search && !ctrl => {
                self.push_search_char(c);
                self.set_menu_focus(MenuFocus::Search);
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Handled {
        let button = match mouse.kind {
            MouseEventKind::Down(button) => button,
            MouseEventKind::ScrollDown if self.menu_contains(mouse.column, mouse.row) => {
                self.list_scroll.scroll_down();
                return Handled::Yes;
            }
            MouseEventKind::ScrollUp if self.menu_contains(mouse.column, mouse.row) => {
                self.list_scroll.scroll_up();
                return Handled::Yes;
            }
            _ => return Handled::No,
        };

        // Any button pressed elsewhere dismisses; only the left one activates
        let Some(target) = self.hits.hit(mouse.column, mouse.row).cloned() else {
            if self.wants_outside_clicks() {
                self.dismiss_outside();
            }
            return Handled::No;
        };
        if button != MouseButton::Left {
            return Handled::Yes;
        }

        match target {
            HitTarget::ControlBody => {
                self.toggle();
            }
            HitTarget::ChipRemove(id) => self.remove(&id),
            HitTarget::SearchInput => self.set_menu_focus(MenuFocus::Search),
            HitTarget::SearchClear => self.clear_search(),
            HitTarget::Row(index) => {
                self.active = Some(index);
                self.set_menu_focus(MenuFocus::List);
                self.activate_row(index);
            }
            HitTarget::MenuBody => {}
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        if !self.is_open() {
            Some("Enter:open  Tab:next")
        } else if self.props.with_search {
            Some("type:search  ↑↓:move  Enter:select  ^U:clear  Esc:close")
        } else {
            Some("↑↓:move  Enter/Space:select  Esc:close")
        }
    }
}

impl Copyable for Dropdown {
    fn copy_text(&self) -> Option<String> {
        let labels = self.chip_labels();
        (!labels.is_empty()).then(|| labels.join(", "))
    }

    fn copy_data(&self) -> Option<String> {
        Some(self.value.normalized(self.props.multiple).to_json())
    }

    fn copy_description(&self) -> String {
        format!("value of {}", self.props.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::text::Line;
    use ratatui::Terminal;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CONTROL: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 3,
    };

    fn cities() -> Vec<DropdownOption> {
        [
            ("1", "Jakarta"),
            ("2", "Surabaya"),
            ("3", "Bandung"),
            ("4", "Medan"),
            ("5", "Semarang"),
            ("6", "Palembang"),
            ("7", "Makassar"),
        ]
        .into_iter()
        .map(|(v, l)| DropdownOption::labeled(v, l))
        .collect()
    }

    /// Dropdown wired to a change log, plus the shared listener registry
    fn harness(
        props: DropdownProps,
        value: DropdownValue,
    ) -> (Dropdown, Rc<RefCell<Vec<DropdownValue>>>, PointerListeners) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let listeners = PointerListeners::new();
        let dropdown = Dropdown::new(props.placement(Placement::terminal()), cities(), value)
            .listeners(listeners.clone())
            .on_change(move |v| sink.borrow_mut().push(v));
        (dropdown, changes, listeners)
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        dropdown: &mut Dropdown,
        area: Rect,
        clip: Option<Rect>,
    ) {
        let theme = Theme::by_name("Slate Dark");
        terminal
            .draw(|f| {
                let clip = clip.unwrap_or(f.area());
                dropdown.render(f, area, clip, &theme);
                dropdown.render_overlay(f, &theme);
            })
            .unwrap();
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(60, 20)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        press(MouseButton::Left, column, row)
    }

    fn press(button: MouseButton, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn screen_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_props_defaults() {
        let props = DropdownProps::new("city");
        assert_eq!(props.option_label, "label");
        assert!(!props.multiple);
        assert!(props.with_search);
        assert!(props.with_portal);
        assert_eq!(props.z_index, 1000);
        assert_eq!(props.placeholder, "Select...");
        assert_eq!(props.empty_text, "No options found");
    }

    #[test]
    fn test_search_then_single_select() {
        let (mut dd, changes, listeners) = harness(DropdownProps::new("city"), "".into());

        dd.handle_key(key(KeyCode::Enter));
        assert!(dd.is_open());
        assert_eq!(listeners.active(), 1);

        for c in "jak".chars() {
            dd.handle_key(key(KeyCode::Char(c)));
        }
        let filtered: Vec<_> = dd.filtered_options().iter().map(|o| o.value.clone()).collect();
        assert_eq!(filtered, vec!["1"]);

        dd.handle_key(key(KeyCode::Enter));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("1")]);
        assert!(!dd.is_open());
        assert_eq!(dd.search_term(), "");
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_multi_select_stays_open() {
        let props = DropdownProps::new("cities").multiple(true);
        let (mut dd, changes, _) = harness(props, DropdownValue::empty(true));

        dd.open();
        dd.select("1");
        dd.set_value(changes.borrow().last().cloned().unwrap());
        dd.select("3");
        dd.set_value(changes.borrow().last().cloned().unwrap());

        assert!(dd.is_open());
        assert_eq!(dd.value(), &DropdownValue::from(vec!["1", "3"]));

        dd.select("1");
        assert_eq!(
            changes.borrow().last(),
            Some(&DropdownValue::from(vec!["3"]))
        );
        assert_eq!(changes.borrow().len(), 3);
    }

    #[test]
    fn test_value_is_not_edited_in_place() {
        let (mut dd, changes, _) = harness(DropdownProps::new("city"), "2".into());
        dd.select("4");
        assert_eq!(dd.value(), &DropdownValue::from("2"));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("4")]);
    }

    #[test]
    fn test_malformed_and_unknown_values() {
        let (dd, _, _) = harness(DropdownProps::new("city"), vec!["1"].into());
        assert!(dd.selected_options().is_empty());

        let props = DropdownProps::new("cities").multiple(true);
        let (dd, _, _) = harness(props, vec!["404", "2"].into());
        let selected: Vec<_> = dd.selected_options().iter().map(|o| o.value.clone()).collect();
        assert_eq!(selected, vec!["2"]);
    }

    #[test]
    fn test_chip_remove_does_not_toggle_menu() {
        let props = DropdownProps::new("cities").multiple(true);
        let (mut dd, changes, _) = harness(props, vec!["1", "2"].into());
        let mut term = terminal();
        draw(&mut term, &mut dd, CONTROL, None);

        // " Jakarta ✕ " starts at x=2, so ✕ lands on x=11
        assert_eq!(dd.hit_test(11, 1), Some(&HitTarget::ChipRemove("1".into())));
        assert_eq!(dd.handle_mouse(click(11, 1)), Handled::Yes);

        assert!(!dd.is_open());
        assert_eq!(*changes.borrow(), vec![DropdownValue::from(vec!["2"])]);
    }

    #[test]
    fn test_single_chip_remove_clears() {
        let (mut dd, changes, _) = harness(DropdownProps::new("city"), "1".into());
        let mut term = terminal();
        draw(&mut term, &mut dd, CONTROL, None);

        dd.handle_mouse(click(11, 1));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("")]);
    }

    #[test]
    fn test_control_click_toggles() {
        let (mut dd, _, listeners) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        draw(&mut term, &mut dd, CONTROL, None);

        dd.handle_mouse(click(20, 1));
        assert!(dd.is_open());
        draw(&mut term, &mut dd, CONTROL, None);

        dd.set_search("sem");
        dd.handle_mouse(click(20, 1));
        assert!(!dd.is_open());
        // Toggling closed keeps the term
        assert_eq!(dd.search_term(), "sem");
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_outside_click_closes_and_clears_search() {
        let (mut dd, changes, listeners) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        dd.open();
        dd.set_search("ban");
        draw(&mut term, &mut dd, CONTROL, None);

        assert_eq!(dd.handle_mouse(click(55, 18)), Handled::No);
        assert!(!dd.is_open());
        assert_eq!(dd.search_term(), "");
        assert_eq!(listeners.active(), 0);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_any_button_outside_dismisses() {
        for button in [MouseButton::Right, MouseButton::Middle] {
            let (mut dd, _, listeners) = harness(DropdownProps::new("city"), "".into());
            let mut term = terminal();
            dd.open();
            dd.set_search("ja");
            draw(&mut term, &mut dd, CONTROL, None);

            assert_eq!(dd.handle_mouse(press(button, 55, 18)), Handled::No);
            assert!(!dd.is_open(), "{:?} press left the menu open", button);
            assert_eq!(dd.search_term(), "");
            assert_eq!(listeners.active(), 0);
        }
    }

    #[test]
    fn test_right_press_inside_does_not_activate() {
        let (mut dd, changes, listeners) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        dd.open();
        draw(&mut term, &mut dd, CONTROL, None);

        // Row 2 (Bandung) and the control body
        assert_eq!(dd.handle_mouse(press(MouseButton::Right, 5, 8)), Handled::Yes);
        assert_eq!(dd.handle_mouse(press(MouseButton::Right, 20, 1)), Handled::Yes);

        assert!(dd.is_open());
        assert!(changes.borrow().is_empty());
        assert_eq!(listeners.active(), 1);
    }

    #[test]
    fn test_multi_select_then_chip_removal() {
        let props = DropdownProps::new("cities").multiple(true);
        let (mut dd, changes, _) = harness(props, vec!["1"].into());
        let mut term = terminal();

        dd.handle_key(key(KeyCode::Enter));
        for c in "sur".chars() {
            dd.handle_key(key(KeyCode::Char(c)));
        }
        dd.handle_key(key(KeyCode::Enter));
        assert_eq!(
            changes.borrow().last(),
            Some(&DropdownValue::from(vec!["1", "2"]))
        );
        assert!(dd.is_open());

        dd.set_value(DropdownValue::from(vec!["1", "2"]));
        draw(&mut term, &mut dd, CONTROL, None);
        assert_eq!(dd.hit_test(11, 1), Some(&HitTarget::ChipRemove("1".into())));
        dd.handle_mouse(click(11, 1));

        assert_eq!(
            *changes.borrow(),
            vec![
                DropdownValue::from(vec!["1", "2"]),
                DropdownValue::from(vec!["2"])
            ]
        );
        assert!(dd.is_open());
    }

    #[test]
    fn test_escape_closes_and_clears_search() {
        let (mut dd, _, listeners) = harness(DropdownProps::new("city"), "".into());
        dd.open();
        dd.handle_key(key(KeyCode::Char('m')));
        dd.handle_key(key(KeyCode::Esc));
        assert!(!dd.is_open());
        assert_eq!(dd.search_term(), "");
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_dropping_open_dropdown_releases_listener() {
        let (mut dd, _, listeners) = harness(DropdownProps::new("city"), "".into());
        dd.open();
        assert_eq!(listeners.active(), 1);
        drop(dd);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_portal_menu_layout_and_row_click() {
        let (mut dd, changes, _) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        dd.open();
        draw(&mut term, &mut dd, CONTROL, None);

        let pos = dd.menu_position().unwrap();
        assert_eq!(pos.direction, Direction::Down);
        assert_eq!((pos.top, pos.left, pos.width), (3, 0, 40));
        // 2 borders + search + separator + 6 rows
        assert_eq!(dd.menu_area(), Some(Rect::new(0, 3, 40, 10)));

        assert!(screen_row(&term, 6).contains("Jakarta"));
        assert_eq!(dd.hit_test(5, 8), Some(&HitTarget::Row(2)));

        dd.handle_mouse(click(5, 8));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("3")]);
        assert!(!dd.is_open());
    }

    #[test]
    fn test_portal_render_defers_menu_to_overlay() {
        let (mut dd, _, _) = harness(DropdownProps::new("city"), "".into());
        let theme = Theme::by_name("Slate Dark");
        let mut term = terminal();
        dd.open();

        term.draw(|f| {
            let clip = f.area();
            dd.render(f, CONTROL, clip, &theme);
        })
        .unwrap();
        assert!(!screen_row(&term, 6).contains("Jakarta"));
        assert_eq!(dd.hit_test(5, 6), None);
    }

    #[test]
    fn test_clear_search_affordance_keeps_menu_open() {
        let (mut dd, _, _) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        dd.open();
        dd.set_search("zzz");
        draw(&mut term, &mut dd, CONTROL, None);
        assert!(screen_row(&term, 6).contains("No options found"));

        // Search row y=4; ✕ two columns in from the right border
        assert_eq!(dd.hit_test(37, 4), Some(&HitTarget::SearchClear));
        dd.handle_mouse(click(37, 4));

        assert!(dd.is_open());
        assert_eq!(dd.search_term(), "");
        assert_eq!(dd.menu_focus(), Some(MenuFocus::Search));
        assert_eq!(dd.filtered_options().len(), 7);
    }

    #[test]
    fn test_menu_opens_upward_near_bottom() {
        let (mut dd, _, _) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        let area = Rect::new(0, 15, 40, 3);
        dd.open();
        draw(&mut term, &mut dd, area, None);

        let pos = dd.menu_position().unwrap();
        assert_eq!(pos.direction, Direction::Up);
        assert_eq!(pos.top, 15 - 10);
        assert_eq!(dd.menu_area(), Some(Rect::new(0, 5, 40, 10)));
    }

    #[test]
    fn test_page_scroll_moves_into_page_space() {
        let (mut dd, _, _) = harness(DropdownProps::new("city"), "".into());
        let mut term = terminal();
        dd.set_scroll_offset(ScrollOffset { x: 0, y: 12 });
        dd.open();
        draw(&mut term, &mut dd, CONTROL, None);

        assert_eq!(dd.menu_position().unwrap().top, 3 + 12);
        // Drawn back in screen space
        assert_eq!(dd.menu_area(), Some(Rect::new(0, 3, 40, 10)));
    }

    #[test]
    fn test_inline_menu_is_clipped() {
        let props = DropdownProps::new("city").with_portal(false);
        let (mut dd, _, _) = harness(props, "".into());
        let mut term = terminal();
        dd.open();
        draw(&mut term, &mut dd, CONTROL, Some(Rect::new(0, 0, 60, 8)));

        assert!(screen_row(&term, 6).contains("Jakarta"));
        assert!(screen_row(&term, 7).contains("Surabaya"));
        assert!(!screen_row(&term, 8).contains("Bandung"));
        assert_eq!(dd.hit_test(5, 7), Some(&HitTarget::Row(1)));
        assert_eq!(dd.hit_test(5, 8), None);
    }

    #[test]
    fn test_keyboard_navigation_selects_active_row() {
        let (mut dd, changes, _) = harness(DropdownProps::new("city"), "2".into());
        dd.handle_key(key(KeyCode::Down));
        // Cursor starts on the selected option
        assert_eq!(dd.active_row(), Some(1));

        dd.handle_key(key(KeyCode::Down));
        dd.handle_key(key(KeyCode::Down));
        dd.handle_key(key(KeyCode::Up));
        assert_eq!(dd.active_row(), Some(2));

        dd.handle_key(key(KeyCode::End));
        assert_eq!(dd.active_row(), Some(6));

        dd.handle_key(key(KeyCode::Enter));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("7")]);
    }

    #[test]
    fn test_space_selects_without_search() {
        let props = DropdownProps::new("city").with_search(false);
        let (mut dd, changes, _) = harness(props, "".into());
        dd.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dd.menu_focus(), Some(MenuFocus::List));
        dd.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("1")]);
        // Unhandled chars bubble up to the host
        dd.open();
        assert_eq!(dd.handle_key(key(KeyCode::Char('q'))), Handled::No);
    }

    struct Veto;

    impl OptionRenderer for Veto {
        fn render_row(&self, option: &DropdownOption, state: RowState<'_>) -> Line<'static> {
            Line::from(format!("» {} ({})", state.label, option.value))
        }

        fn on_activate(&self, option: &DropdownOption, select: &mut dyn FnMut()) {
            if option.value != "3" {
                select();
            }
        }
    }

    #[test]
    fn test_custom_renderer_controls_selection() {
        let (dd, changes, _) = harness(DropdownProps::new("city"), "".into());
        let mut dd = dd.option_renderer(Veto);
        let mut term = terminal();
        dd.open();
        draw(&mut term, &mut dd, CONTROL, None);
        assert!(screen_row(&term, 6).contains("» Jakarta (1)"));

        // Bandung is vetoed
        dd.handle_mouse(click(5, 8));
        assert!(changes.borrow().is_empty());
        assert!(dd.is_open());

        dd.handle_mouse(click(5, 7));
        assert_eq!(*changes.borrow(), vec![DropdownValue::from("2")]);
    }

    #[test]
    fn test_desired_height_grows_with_chips() {
        let props = DropdownProps::new("cities").multiple(true);
        let (dd, _, _) = harness(props, vec!["1", "2", "3", "4", "5", "6", "7"].into());
        assert_eq!(dd.desired_height(80), 4);
        assert!(dd.desired_height(30) > 4);

        let (empty, _, _) = harness(DropdownProps::new("city"), "".into());
        assert_eq!(empty.desired_height(30), 3);
    }

    #[test]
    fn test_copy_value() {
        let props = DropdownProps::new("cities").multiple(true);
        let (dd, _, _) = harness(props, vec!["3", "1"].into());
        assert_eq!(dd.copy_text().as_deref(), Some("Jakarta, Bandung"));
        assert_eq!(dd.copy_data().as_deref(), Some(r#"["3","1"]"#));
    }
}
