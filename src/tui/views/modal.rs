// Modal overlay rendering
//
// - Help modal: keyboard and mouse reference plus current theme
// - Log detail modal: one Actions entry, wrapped

use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::LogDetail(text) => render_log_detail(f, app, text),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.border_focused);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(theme.border);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Gallery", header_style)),
        kb("Tab", "Next story / Actions"),
        kb("Shift+Tab", "Previous story"),
        kb("PgUp/PgDn", "Scroll the page"),
        kb("y", "Copy value as JSON"),
        kb("Y", "Copy selected labels"),
        Line::raw(""),
        Line::from(Span::styled("  Closed dropdown", header_style)),
        kb("Enter/Space/↓", "Open"),
        Line::raw(""),
        Line::from(Span::styled("  Open dropdown", header_style)),
        kb("type", "Filter options"),
        kb("↑/↓ Home/End", "Move the cursor"),
        kb("Enter", "Select (toggle in multi)"),
        kb("Space", "Select when search is empty"),
        kb("Backspace", "Delete search char"),
        kb("Ctrl+U", "Clear search"),
        kb("Esc", "Close"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        kb("Click", "Toggle, select, remove chip"),
        kb("Click outside", "Close"),
        kb("Wheel", "Scroll menu / page"),
        Line::raw(""),
        kb("?", "Toggle this help"),
        kb("q", "Quit (no menu open)"),
        Line::from(Span::styled(
            "  ──────────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.name.as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(48, 33, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .border_type(theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_log_detail(f: &mut Frame, app: &App, text: &str) {
    let theme = &app.theme;
    let full = f.area();
    let area = centered_rect(full.width * 7 / 10, 9, full);
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .border_type(theme.border_type)
                .title(" Action ")
                .title_bottom(Line::from(" y:copy  Esc:close ").centered()),
        );

    f.render_widget(paragraph, area);
}
