// Title bar component
//
// App name plus the focused story and its description.

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        " ▾ tui-dropdown gallery",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];
    match app.focus {
        Focus::Story(i) => {
            if let Some(card) = app.cards.get(i) {
                spans.push(Span::styled(" ──── ", Style::default().fg(theme.border)));
                spans.push(Span::styled(
                    card.story.slug(),
                    Style::default().fg(theme.foreground),
                ));
                spans.push(Span::styled(
                    format!("  {}", card.story.description()),
                    Style::default().fg(theme.muted),
                ));
            }
        }
        Focus::Actions => {
            spans.push(Span::styled(" ──── ", Style::default().fg(theme.border)));
            spans.push(Span::styled("actions", Style::default().fg(theme.foreground)));
        }
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}
