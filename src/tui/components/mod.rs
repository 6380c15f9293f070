// Components module - UI building blocks for the gallery shell
//
// - Title bar: App name and the focused story
// - Status bar: Focus hint, current value, uptime
// - Actions panel: Everything the stories logged
// - Toast: Short-lived confirmation overlay

pub mod actions_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use actions_panel::ActionsPanel;
pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
