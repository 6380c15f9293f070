// tui-dropdown - searchable, optionally multi-select dropdown for ratatui
//
// Architecture:
// - dropdown: the widget (selection, filtering, open/close, placement, drawing)
// - theme: colors and style classes the widget and hosts render with
// - traits: component contracts hosts use to route input and rendering
// - scroll / scrollbar: list scrolling shared by the menu and host panels
//
// The `dropdown-demo` binary hosts a gallery of stories on top of this.

pub mod dropdown;
pub mod scroll;
pub mod scrollbar;
pub mod theme;
pub mod traits;

pub use dropdown::{Dropdown, DropdownOption, DropdownProps, DropdownValue};
