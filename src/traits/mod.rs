//! Component trait system
//!
//! Hosts route events and rendering through these contracts instead of
//! knowing each widget's internals. The dropdown implements them, and so
//! do the demo gallery's panels.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Host                               │
//! │   (orchestrator: routes keys/mouse, owns focus, draws)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Dropdown │   │ Dropdown │   │ Actions  │
//!        │ (portal) │   │ (inline) │   │  Panel   │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`Component`] - Base trait: render
//! - [`Scrollable`] - Components with scrollable content
//! - [`Copyable`] - Components that provide clipboard content
//! - [`Interactive`] - Components that handle keyboard and mouse input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive, ScrollableInteractive};
pub use scrollable::Scrollable;
