//! Dropdown defaults: list height and menu placement

use serde::Deserialize;
use tui_dropdown::dropdown::Placement;

/// Settings applied to every dropdown the gallery builds
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownDefaults {
    /// Option rows shown before the list scrolls
    pub max_visible_rows: usize,
    /// Rows of free space below the anchor under which the menu may flip up
    pub flip_threshold: i32,
    /// Rows between control and menu
    pub gap: i32,
}

impl Default for DropdownDefaults {
    fn default() -> Self {
        let placement = Placement::terminal();
        Self {
            max_visible_rows: 6,
            flip_threshold: placement.flip_threshold,
            gap: placement.gap,
        }
    }
}

/// [dropdown] section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDropdown {
    pub max_visible_rows: Option<usize>,
    pub flip_threshold: Option<i32>,
    pub gap: Option<i32>,
}

impl DropdownDefaults {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDropdown>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            max_visible_rows: file
                .max_visible_rows
                .unwrap_or(defaults.max_visible_rows)
                .max(1),
            flip_threshold: file.flip_threshold.unwrap_or(defaults.flip_threshold),
            gap: file.gap.unwrap_or(defaults.gap).max(0),
        }
    }

    pub fn placement(&self) -> Placement {
        Placement {
            flip_threshold: self.flip_threshold,
            gap: self.gap,
        }
    }
}
