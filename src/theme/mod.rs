// Theme system
//
// - TomlTheme: on-disk format with explicit colors per role
// - Theme: resolved colors ready for rendering
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/tui-dropdown/themes/*.toml
// 2. Bundled themes (compiled in, extracted on first run)
// 3. Fallback to the hardcoded default

mod bundled;
mod toml_format;

pub use toml_format::TomlTheme;

use ratatui::style::{Color, Style};
use ratatui::widgets::BorderType;
use std::collections::HashMap;
use std::path::PathBuf;

/// Name of the theme used when nothing else is configured
pub const DEFAULT_THEME: &str = "Slate Dark";

/// Theme configuration options
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Resolved style class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleClass {
    pub border: Option<Color>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

/// Complete resolved theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Chrome ──────────────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,
    pub title: Color,
    pub status_bar: Color,

    // ─── Dropdown ────────────────────────────────────────────
    pub label: Color,
    pub placeholder: Color,
    pub indicator: Color,
    pub chip_bg: Color,
    pub chip_fg: Color,
    pub chip_remove: Color,
    pub menu_bg: Color,
    pub search_icon: Color,
    pub match_bg: Color,
    pub match_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub active_bg: Color,
    pub active_fg: Color,

    // ─── Action log ──────────────────────────────────────────
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,

    pub classes: HashMap<String, StyleClass>,
}

impl Theme {
    /// Load theme by name with default configuration
    pub fn by_name(name: &str) -> Self {
        Self::by_name_with_config(name, &ThemeConfig::default())
    }

    /// Load theme by name with custom configuration
    pub fn by_name_with_config(name: &str, config: &ThemeConfig) -> Self {
        if let Some(theme) = Self::load_toml(name, config) {
            return theme;
        }

        tracing::warn!("Theme '{}' not found, using {}", name, DEFAULT_THEME);
        Self::hardcoded_default(config)
    }

    /// Load from TOML theme file or bundled theme
    fn load_toml(name: &str, config: &ThemeConfig) -> Option<Self> {
        let normalized = name.replace(' ', "_");

        if let Some(dir) = Self::themes_dir() {
            for candidate in [name, normalized.as_str()] {
                let path = dir.join(format!("{}.toml", candidate));
                let Ok(contents) = std::fs::read_to_string(&path) else {
                    continue;
                };
                match TomlTheme::from_str(&contents) {
                    Ok(toml_theme) => return Some(Self::from_toml(toml_theme, config)),
                    Err(e) => {
                        tracing::warn!("Ignoring theme file {}: {}", path.display(), e);
                    }
                }
            }
        }

        let filename = format!("{}.toml", normalized);
        bundled::BUNDLED_THEMES
            .iter()
            .find(|t| t.filename.eq_ignore_ascii_case(&filename))
            .and_then(|t| TomlTheme::from_str(t.content).ok())
            .map(|toml_theme| Self::from_toml(toml_theme, config))
    }

    /// Get themes directory path
    fn themes_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("tui-dropdown").join("themes"))
    }

    /// Parse border type string to BorderType enum
    fn parse_border_type(value: Option<&str>) -> BorderType {
        match value {
            Some("rounded") => BorderType::Rounded,
            Some("double") => BorderType::Double,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    /// Create theme from native TOML format
    pub fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;
        let ui = &toml.ui;
        let dd = &toml.dropdown;

        let background = if config.use_theme_background {
            parse(&ui.background)
        } else {
            Color::Reset
        };
        let muted = ui.muted.as_deref().map(parse).unwrap_or(parse(&ui.border));

        let (log_error, log_warn, log_info, log_debug) = match &toml.logs {
            Some(logs) => (
                parse(&logs.error),
                parse(&logs.warn),
                parse(&logs.info),
                parse(&logs.debug),
            ),
            None => (Color::Red, Color::Yellow, parse(&ui.foreground), muted),
        };

        let classes = toml
            .classes
            .iter()
            .map(|(name, c)| {
                (
                    name.clone(),
                    StyleClass {
                        border: c.border.as_deref().map(parse),
                        foreground: c.foreground.as_deref().map(parse),
                        background: c.background.as_deref().map(parse),
                    },
                )
            })
            .collect();

        Self {
            name: toml.meta.name.clone(),
            background,
            foreground: parse(&ui.foreground),
            muted,
            border: parse(&ui.border),
            border_focused: parse(&ui.border_focused),
            border_type: Self::parse_border_type(ui.border_type.as_deref()),
            title: parse(&ui.title),
            status_bar: parse(&ui.status_bar),
            label: parse(&dd.label),
            placeholder: parse(&dd.placeholder),
            indicator: parse(&dd.indicator),
            chip_bg: parse(&dd.chip_bg),
            chip_fg: parse(&dd.chip_fg),
            chip_remove: parse(&dd.chip_remove),
            menu_bg: if config.use_theme_background {
                parse(&dd.menu_bg)
            } else {
                Color::Reset
            },
            search_icon: parse(&dd.search_icon),
            match_bg: parse(&dd.match_bg),
            match_fg: parse(&dd.match_fg),
            selected_bg: parse(&dd.selected_bg),
            selected_fg: parse(&dd.selected_fg),
            active_bg: parse(&dd.active_bg),
            active_fg: parse(&dd.active_fg),
            log_error,
            log_warn,
            log_info,
            log_debug,
            classes,
        }
    }

    /// Hardcoded fallback (named ANSI colors, no file access)
    fn hardcoded_default(config: &ThemeConfig) -> Self {
        let background = if config.use_theme_background {
            Color::Black
        } else {
            Color::Reset
        };

        Self {
            name: "Default".to_string(),
            background,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            border_type: BorderType::Rounded,
            title: Color::Cyan,
            status_bar: Color::Gray,
            label: Color::Gray,
            placeholder: Color::DarkGray,
            indicator: Color::DarkGray,
            chip_bg: Color::DarkGray,
            chip_fg: Color::White,
            chip_remove: Color::Gray,
            menu_bg: background,
            search_icon: Color::DarkGray,
            match_bg: Color::Green,
            match_fg: Color::Black,
            selected_bg: Color::LightGreen,
            selected_fg: Color::Black,
            active_bg: Color::DarkGray,
            active_fg: Color::White,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::DarkGray,
            classes: HashMap::new(),
        }
    }

    /// Merge every class named in a space-separated `class_name`
    ///
    /// Later classes override earlier ones; unknown names are skipped.
    pub fn resolve_classes(&self, class_name: &str) -> StyleClass {
        class_name
            .split_whitespace()
            .filter_map(|name| self.classes.get(name))
            .fold(StyleClass::default(), |acc, c| StyleClass {
                border: c.border.or(acc.border),
                foreground: c.foreground.or(acc.foreground),
                background: c.background.or(acc.background),
            })
    }

    /// Border color for a control, honoring focus and style classes
    pub fn control_border(&self, class: &StyleClass, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            class.border.unwrap_or(self.border)
        }
    }

    /// Base text style for a control, honoring style classes
    pub fn control_style(&self, class: &StyleClass) -> Style {
        let mut style = Style::default().fg(class.foreground.unwrap_or(self.foreground));
        if let Some(bg) = class.background {
            style = style.bg(bg);
        }
        style
    }

    /// List all available themes (bundled + external)
    pub fn list_available() -> Vec<String> {
        let mut themes = bundled::list_bundled_themes();

        if let Some(themes_dir) = Self::themes_dir() {
            if let Ok(entries) = std::fs::read_dir(themes_dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "toml") {
                        if let Some(stem) = path.file_stem() {
                            let display_name = stem.to_string_lossy().replace('_', " ");
                            if !themes.iter().any(|t| t.eq_ignore_ascii_case(&display_name)) {
                                themes.push(display_name);
                            }
                        }
                    }
                }
            }
        }

        themes
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::by_name(DEFAULT_THEME)
    }
}

/// Ensure themes directory exists and extract bundled themes on first run
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = Theme::themes_dir() else {
        return;
    };

    if std::fs::create_dir_all(&themes_dir).is_err() {
        return;
    }

    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Only write if file doesn't exist (don't overwrite user modifications)
        if !path.exists() {
            let _ = std::fs::write(&path, theme.content);
        }
    }

    let _ = std::fs::write(&marker, "1");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled(name: &str) -> Theme {
        let filename = format!("{}.toml", name.replace(' ', "_"));
        let content = bundled::BUNDLED_THEMES
            .iter()
            .find(|t| t.filename == filename)
            .map(|t| t.content)
            .unwrap();
        Theme::from_toml(TomlTheme::from_str(content).unwrap(), &ThemeConfig::default())
    }

    #[test]
    fn test_bundled_theme_resolves() {
        let theme = bundled("Paper Light");
        assert_eq!(theme.name, "Paper Light");
        assert_eq!(theme.match_bg, Color::Rgb(0xbb, 0xf7, 0xd0));
        assert_eq!(theme.border_type, BorderType::Rounded);
    }

    #[test]
    fn test_terminal_background_option() {
        let content = bundled::BUNDLED_THEMES[0].content;
        let theme = Theme::from_toml(
            TomlTheme::from_str(content).unwrap(),
            &ThemeConfig {
                use_theme_background: false,
            },
        );
        assert_eq!(theme.background, Color::Reset);
        assert_eq!(theme.menu_bg, Color::Reset);
    }

    #[test]
    fn test_class_resolution_merges_in_order() {
        let mut theme = bundled("Slate Dark");
        theme.classes.insert(
            "loud".into(),
            StyleClass {
                border: Some(Color::Yellow),
                foreground: Some(Color::White),
                background: None,
            },
        );

        let class = theme.resolve_classes("danger loud missing");
        assert_eq!(class.border, Some(Color::Yellow));
        assert_eq!(class.foreground, Some(Color::White));

        assert_eq!(theme.resolve_classes(""), StyleClass::default());
    }

    #[test]
    fn test_focus_overrides_class_border() {
        let theme = bundled("Slate Dark");
        let class = theme.resolve_classes("danger");
        assert_eq!(theme.control_border(&class, true), theme.border_focused);
        assert_ne!(theme.control_border(&class, false), theme.border);
    }
}
