// Views module - screen-level rendering
//
// One screen: title bar, the story gallery beside the Actions panel, status
// bar. Portal menus, the modal and the toast are painted last, in that order.

mod gallery;
mod modal;

use super::app::{App, Focus};
use super::layout::Breakpoint;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use tui_dropdown::traits::{Component, RenderContext};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    let bp = Breakpoint::from_width(chunks[1].width);
    let body = if bp.at_least(Breakpoint::Normal) {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(8)])
            .split(chunks[1])
    };

    gallery::render(f, body[0], app);

    app.actions_area = body[1];
    let ctx = RenderContext::new(&app.theme, app.focus == Focus::Actions, body[1]);
    app.actions_panel.render(f, body[1], &ctx);

    components::render_title(f, chunks[0], app);
    components::render_status(f, chunks[2], app);

    render_menus(f, app);

    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
    app.clear_expired_toast();
}

/// Portal menus over everything else: lowest z-index first, focused last
fn render_menus(f: &mut Frame, app: &mut App) {
    let focus = app.focus;
    let mut order: Vec<usize> = (0..app.cards.len()).collect();
    order.sort_by_key(|&i| {
        (
            app.cards[i].dropdown.props().z_index,
            focus == Focus::Story(i),
        )
    });

    for i in order {
        app.cards[i].dropdown.render_overlay(f, &app.theme);
    }
}
