// TUI module - the dropdown gallery
//
// Terminal setup and cleanup, the event loop, and layered input dispatch.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod stories;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Focus};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tui_dropdown::traits::Handled;
use tui_dropdown::DropdownOption;

/// Run the gallery until the user quits
pub async fn run_tui(
    log_buffer: LogBuffer,
    config: Config,
    options: Vec<DropdownOption>,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config, log_buffer, options);
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input and a redraw tick with `tokio::select!`. After
/// every input event the host values are fed back into the dropdowns
/// before the next draw.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Redraw tick keeps the Actions panel and toast current
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => app.handle_mouse(mouse_event),
                        _ => {}
                    }
                    app.sync_values();
                }
            } => {}

            _ = tick_interval.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Open menu → Global → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if handle_open_menu(app, key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    if app.dispatch_to_focused(key_event) == Handled::No
        && key_event.code == KeyCode::Enter
        && app.focus == Focus::Actions
    {
        if let Some(text) = app.actions_panel.selected_entry_detail() {
            app.modal = Some(Modal::log_detail(text));
        }
    }
}

/// An open menu sees keys before the global bindings (so typing `q` or
/// `y` searches); Tab still moves focus
fn handle_open_menu(app: &mut App, key_event: KeyEvent) -> bool {
    if !app.focused_open() || matches!(key_event.code, KeyCode::Tab | KeyCode::BackTab) {
        return false;
    }
    app.dispatch_to_focused(key_event).was_handled()
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Copy => {
            if let Some(text) = modal.copy_text().map(str::to_owned) {
                copy_with_toast(app, &text, "action");
            }
        }
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('q') | KeyCode::Char('Q') if !app.any_open() => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab => {
            app.focus_next();
            true
        }
        KeyCode::BackTab => {
            app.focus_prev();
            true
        }
        KeyCode::Char('?') => {
            app.modal = Some(Modal::help());
            true
        }
        KeyCode::Char('y') => {
            match app.copy_focused() {
                Some((text, what)) => copy_with_toast(app, &text, &what),
                None => app.show_toast("Nothing to copy"),
            }
            true
        }
        KeyCode::Char('Y') => {
            if let Some((text, what)) = app.copy_focused_labels() {
                copy_with_toast(app, &text, &what);
            }
            true
        }
        _ => false,
    }
}

fn copy_with_toast(app: &mut App, text: &str, what: &str) {
    match clipboard::copy_to_clipboard(text) {
        Ok(()) => app.show_toast(format!("✓ Copied {}", what)),
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            app.show_toast("✗ Failed to copy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::stories::cities;

    fn app() -> App {
        App::new(Config::default(), LogBuffer::new(), cities())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
        app.sync_values();
    }

    #[test]
    fn test_typing_q_searches_while_open() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));

        assert!(!app.should_quit);
        assert_eq!(app.cards[0].dropdown.search_term(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_moves_focus_out_of_open_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.focus, Focus::Story(1));
        assert!(!app.any_open());
        assert_eq!(app.live_listeners(), 0);
    }

    #[test]
    fn test_multi_select_flow_through_key_layers() {
        let mut app = app();
        press(&mut app, KeyCode::Tab); // multi-select story
        press(&mut app, KeyCode::Enter);
        for c in "band".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let card = &app.cards[1];
        assert!(card.dropdown.is_open());
        assert_eq!(card.dropdown.search_term(), "band");
        assert_eq!(card.dropdown.value().to_json(), "[\"3\"]");
    }

    #[test]
    fn test_help_modal_absorbs_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modal, Some(Modal::Help));

        press(&mut app, KeyCode::Enter);
        assert!(!app.any_open());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modal, None);
    }
}
