//! Selection state
//!
//! Pure functions over (options, value, mode). Nothing here mutates the
//! caller's value; every change is returned as a complete new value.

use super::option::DropdownOption;
use super::value::DropdownValue;

/// Result of picking an option from the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Fully updated value to hand to `on_change`
    pub value: DropdownValue,
    /// Menu should close (single-select commit)
    pub close_menu: bool,
    /// Search term should reset (single-select commit)
    pub clear_search: bool,
}

/// Options currently selected, in option order
///
/// Identifiers in `value` that match no option are ignored. In
/// single-select mode at most one option is returned.
pub fn selected_options<'a>(
    options: &'a [DropdownOption],
    value: &DropdownValue,
    multiple: bool,
) -> Vec<&'a DropdownOption> {
    let value = value.normalized(multiple);

    if multiple {
        options
            .iter()
            .filter(|o| value.contains(&o.value, true))
            .collect()
    } else {
        options
            .iter()
            .find(|o| value.contains(&o.value, false))
            .into_iter()
            .collect()
    }
}

/// Whether a single option renders as selected
pub fn is_selected(option: &DropdownOption, value: &DropdownValue, multiple: bool) -> bool {
    value.contains(&option.value, multiple)
}

/// Apply a menu pick
///
/// Multi-select toggles membership (append on, remove off) and leaves the
/// menu open. Single-select replaces the value and asks the caller to
/// close the menu and reset the search.
pub fn toggle(value: &DropdownValue, id: &str, multiple: bool) -> SelectOutcome {
    if multiple {
        let mut ids = match value.normalized(true) {
            DropdownValue::Multiple(ids) => ids,
            DropdownValue::Single(_) => Vec::new(),
        };

        if let Some(pos) = ids.iter().position(|v| v == id) {
            ids.remove(pos);
        } else {
            ids.push(id.to_string());
        }

        SelectOutcome {
            value: DropdownValue::Multiple(ids),
            close_menu: false,
            clear_search: false,
        }
    } else {
        SelectOutcome {
            value: DropdownValue::Single(id.to_string()),
            close_menu: true,
            clear_search: true,
        }
    }
}

/// Apply a chip removal
///
/// Multi-select drops just that identifier; single-select clears.
pub fn remove(value: &DropdownValue, id: &str, multiple: bool) -> DropdownValue {
    if multiple {
        match value.normalized(true) {
            DropdownValue::Multiple(ids) => {
                DropdownValue::Multiple(ids.into_iter().filter(|v| v != id).collect())
            }
            DropdownValue::Single(_) => DropdownValue::Multiple(Vec::new()),
        }
    } else {
        DropdownValue::Single(String::new())
    }
}
