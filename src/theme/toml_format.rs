// TOML theme format parser
//
// Native theme format for tui-dropdown. Each theme explicitly defines the
// colors the dropdown and the demo gallery use; optional [classes.<name>]
// tables define style classes a dropdown can opt into via `class_name`.
//
// Format version: 1

use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;

/// Root structure for TOML theme files
#[derive(Debug, Clone, Deserialize)]
pub struct TomlTheme {
    pub meta: ThemeMeta,
    pub ui: UiColors,
    pub dropdown: DropdownColors,
    /// Optional action log colors (fall back to ui colors)
    pub logs: Option<LogColors>,
    /// Named style classes
    #[serde(default)]
    pub classes: HashMap<String, ClassColors>,
}

/// Theme metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    #[allow(dead_code)] // For future schema evolution
    pub version: u32,
    #[serde(default)]
    #[allow(dead_code)] // Metadata for theme attribution
    pub author: Option<String>,
}

/// Base UI chrome colors
#[derive(Debug, Clone, Deserialize)]
pub struct UiColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub border_focused: String,
    pub title: String,
    pub status_bar: String,
    /// Optional muted/secondary text color (falls back to border)
    pub muted: Option<String>,
    /// Optional border style: "plain", "rounded", "double", "thick" (default: plain)
    pub border_type: Option<String>,
}

/// Colors for the dropdown control and its menu
#[derive(Debug, Clone, Deserialize)]
pub struct DropdownColors {
    pub label: String,
    pub placeholder: String,
    pub indicator: String,
    pub chip_bg: String,
    pub chip_fg: String,
    pub chip_remove: String,
    pub menu_bg: String,
    pub search_icon: String,
    pub match_bg: String,
    pub match_fg: String,
    pub selected_bg: String,
    pub selected_fg: String,
    pub active_bg: String,
    pub active_fg: String,
}

/// Action log level colors
#[derive(Debug, Clone, Deserialize)]
pub struct LogColors {
    pub error: String,
    pub warn: String,
    pub info: String,
    pub debug: String,
}

/// A style class: every color is optional, unset colors inherit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassColors {
    pub border: Option<String>,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

impl TomlTheme {
    /// Parse a TOML theme from string
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse a color string to ratatui Color
    /// Supports:
    /// - Hex format: #RRGGBB
    /// - ANSI format: ansi:0-15, ansi:fg, ansi:bg (for terminal-native colors)
    pub fn parse_color(value: &str) -> Color {
        if let Some(ansi) = value.strip_prefix("ansi:") {
            return match ansi {
                "0" => Color::Black,
                "1" => Color::Red,
                "2" => Color::Green,
                "3" => Color::Yellow,
                "4" => Color::Blue,
                "5" => Color::Magenta,
                "6" => Color::Cyan,
                "7" => Color::White,
                "8" => Color::DarkGray,
                "9" => Color::LightRed,
                "10" => Color::LightGreen,
                "11" => Color::LightYellow,
                "12" => Color::LightBlue,
                "13" => Color::LightMagenta,
                "14" => Color::LightCyan,
                "15" => Color::Gray,
                "fg" | "bg" => Color::Reset,
                _ => Color::White,
            };
        }

        let hex = value.trim_start_matches('#');
        if hex.len() != 6 {
            return Color::White; // fallback
        }
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    }
}
