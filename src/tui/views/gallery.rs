// Gallery view
//
// Story cards stacked in a scrollable page. A card is a heading line and
// the dropdown control; the inline story also reserves a container below
// its control that clips the menu.

use crate::tui::app::{App, Focus, StoryCard};
use crate::tui::layout::PageLayout;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dropdown::theme::Theme;
use tui_dropdown::traits::{Component, RenderContext};

/// Widest a control gets, however wide the gallery is
const CONTROL_MAX_WIDTH: u16 = 64;

/// Rows below an inline control that still belong to its container
const INLINE_CONTAINER_ROWS: u16 = 5;

fn card_height(card: &StoryCard, control_width: u16) -> u16 {
    let mut height = 1 + card.dropdown.desired_height(control_width);
    if !card.dropdown.props().with_portal {
        // container rows plus the edge marker
        height += INLINE_CONTAINER_ROWS + 1;
    }
    height
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let viewport = block.inner(area);

    let control_width = viewport.width.saturating_sub(2).min(CONTROL_MAX_WIDTH);
    let heights: Vec<u16> = app
        .cards
        .iter()
        .map(|c| card_height(c, control_width))
        .collect();
    app.update_page(PageLayout::stack(&heights), viewport);

    let more_above = app.page_scroll > 0;
    let more_below = app.page_scroll < app.page.max_scroll(viewport.height);
    let title = match (more_above, more_below) {
        (true, true) => " Stories ▲▼ ",
        (true, false) => " Stories ▲ ",
        (false, true) => " Stories ▼ ",
        (false, false) => " Stories ",
    };
    f.render_widget(block.title(title), area);

    let App {
        cards,
        page,
        page_scroll,
        theme,
        focus,
        ..
    } = app;

    for (i, card) in cards.iter_mut().enumerate() {
        match page.card_area(i, *page_scroll, viewport) {
            Some(card_area) => {
                let focused = *focus == Focus::Story(i);
                render_card(f, card_area, card, theme, focused, viewport, control_width);
            }
            // Off-page: forget last frame's anchor and hit regions
            None => card.dropdown.render(f, Rect::default(), viewport, theme),
        }
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    card: &mut StoryCard,
    theme: &Theme,
    focused: bool,
    viewport: Rect,
    control_width: u16,
) {
    let heading_style = if focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.title)
    };
    let heading = Line::from(vec![
        Span::styled(card.story.slug(), heading_style),
        Span::styled(
            format!("  {}", card.story.description()),
            Style::default().fg(theme.muted),
        ),
    ]);
    f.render_widget(
        Paragraph::new(heading),
        Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            height: 1,
            ..area
        },
    );

    let control = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: control_width,
        height: card.dropdown.desired_height(control_width),
    };

    let clip = if card.dropdown.props().with_portal {
        viewport
    } else {
        let container = Rect {
            x: area.x,
            y: control.y,
            width: area.width,
            height: control.height + INLINE_CONTAINER_ROWS,
        };
        render_container_edge(f, container, theme);
        container
    };

    let ctx = RenderContext::new(theme, focused, clip);
    Component::render(&mut card.dropdown, f, control, &ctx);
}

/// Dashed line just under an inline container
fn render_container_edge(f: &mut Frame, container: Rect, theme: &Theme) {
    let width = container.width as usize;
    let label = " container edge ";
    let dashes = width.saturating_sub(label.len() + 2);
    let line = format!("╌╌{}{}", label, "╌".repeat(dashes));

    f.render_widget(
        Paragraph::new(line).style(Style::default().fg(theme.muted)),
        Rect {
            y: container.bottom(),
            height: 1,
            ..container
        },
    );
}
