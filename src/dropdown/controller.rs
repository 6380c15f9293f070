//! Open/close controller
//!
//! ```text
//!            toggle / open
//!   Closed ─────────────────▶ Open(OpenMenu { listener, .. })
//!     ▲                           │
//!     └───────────────────────────┘
//!      toggle | outside click | single commit | Esc
//! ```
//!
//! `OpenMenu` owns the outside-click [`ListenerGuard`], so leaving the
//! `Open` state (for any reason) unregisters the listener.

use super::pointer::{ListenerGuard, ListenerId, PointerListeners};
use super::position::MenuPosition;

/// Which part of the open menu receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFocus {
    /// Search input (cursor shown)
    Search,
    /// Option list
    List,
}

/// Why the menu closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Control body activated while open
    Toggle,
    /// Pointer-down outside anchor and menu, or focus moved away
    OutsideClick,
    /// Single-select choice committed
    Committed,
    /// Escape key
    Escape,
}

impl CloseReason {
    /// Whether this close also resets the search term
    pub fn clears_search(self) -> bool {
        !matches!(self, CloseReason::Toggle)
    }
}

/// State carried only while the menu is visible
#[derive(Debug)]
pub struct OpenMenu {
    listener: ListenerGuard,
    pub focus: MenuFocus,
    /// Last computed placement (page coordinates)
    pub position: Option<MenuPosition>,
}

#[derive(Debug)]
pub enum MenuState {
    Closed,
    Open(OpenMenu),
}

/// Outcome of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed(CloseReason),
    Unchanged,
}

/// Menu visibility state machine
#[derive(Debug)]
pub struct Controller {
    state: MenuState,
    listeners: PointerListeners,
}

impl Controller {
    pub fn new(listeners: PointerListeners) -> Self {
        Self {
            state: MenuState::Closed,
            listeners,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open(_))
    }

    pub fn open_menu(&self) -> Option<&OpenMenu> {
        match &self.state {
            MenuState::Open(menu) => Some(menu),
            MenuState::Closed => None,
        }
    }

    pub fn open_menu_mut(&mut self) -> Option<&mut OpenMenu> {
        match &mut self.state {
            MenuState::Open(menu) => Some(menu),
            MenuState::Closed => None,
        }
    }

    /// Open the menu, subscribing to outside clicks
    pub fn open(&mut self, focus: MenuFocus) -> Transition {
        if self.is_open() {
            return Transition::Unchanged;
        }

        self.state = MenuState::Open(OpenMenu {
            listener: self.listeners.subscribe(),
            focus,
            position: None,
        });
        Transition::Opened
    }

    /// Close the menu; the listener is released with the old state
    pub fn close(&mut self, reason: CloseReason) -> Transition {
        if !self.is_open() {
            return Transition::Unchanged;
        }

        self.state = MenuState::Closed;
        Transition::Closed(reason)
    }

    /// Control body activation
    pub fn toggle(&mut self, focus: MenuFocus) -> Transition {
        if self.is_open() {
            self.close(CloseReason::Toggle)
        } else {
            self.open(focus)
        }
    }

    /// Whether pointer-downs elsewhere should reach this controller
    pub fn wants_outside_clicks(&self) -> bool {
        self.open_menu().is_some_and(|m| m.listener.is_live())
    }

    /// Live subscription held by the open menu
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.open_menu()
            .filter(|m| m.listener.is_live())
            .map(|m| m.listener.id())
    }
}
