// Status bar component
//
// Focus hint for whatever has focus, the focused story's value, uptime.

use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dropdown::traits::Interactive;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let hint = match app.focus {
        Focus::Story(i) => app.cards.get(i).and_then(|c| c.dropdown.focus_hint()),
        Focus::Actions => app.actions_panel.focus_hint(),
    }
    .unwrap_or("");

    let value = match app.focus {
        Focus::Story(i) => app
            .cards
            .get(i)
            .map(|c| c.value.borrow().to_json())
            .unwrap_or_default(),
        Focus::Actions => format!("{} actions", app.log_buffer.len()),
    };

    let status_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ value {} │ listeners {} │ Tab:focus  ?:help  q:quit │ {}",
            app.uptime(),
            value,
            app.live_listeners(),
            hint
        )
    } else {
        format!(" {} │ {} │ {}", app.uptime(), value, hint)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(app.theme.border)),
        );

    f.render_widget(status, area);
}
