// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Copy the modal's content
    Copy,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard and mouse reference
    Help,
    /// One Actions panel entry, pre-formatted
    LogDetail(String),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn log_detail(text: impl Into<String>) -> Self {
        Modal::LogDetail(text.into())
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::LogDetail(_) => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
        }
    }

    /// Text placed on the clipboard by `ModalAction::Copy`
    pub fn copy_text(&self) -> Option<&str> {
        match self {
            Modal::LogDetail(text) => Some(text),
            Modal::Help => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_its_own_key() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::None);
        assert_eq!(modal.copy_text(), None);
    }

    #[test]
    fn log_detail_copies_its_text() {
        let mut modal = Modal::log_detail("INFO Value changed: \"3\"");
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::Copy);
        assert_eq!(modal.copy_text(), Some("INFO Value changed: \"3\""));
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
