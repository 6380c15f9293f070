//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let story = match &self.story {
            Some(story) => format!("story = \"{}\"", story),
            None => "# story = \"multi-select\"".to_string(),
        };

        format!(
            r#"# tui-dropdown demo configuration

# Theme: Slate Dark, Paper Light, Terminal ANSI, or any file in
# ~/.config/tui-dropdown/themes/ (TUI_DROPDOWN_THEME overrides)
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Story focused at startup (TUI_DROPDOWN_STORY overrides)
{story}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the Actions panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"

# Dropdown defaults
[dropdown]
max_visible_rows = {max_rows}
# Open upward when fewer rows than this remain below the control
flip_threshold = {flip}
gap = {gap}
"#,
            theme = self.theme,
            use_bg = self.use_theme_background,
            story = story,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            max_rows = self.dropdown.max_visible_rows,
            flip = self.dropdown.flip_threshold,
            gap = self.dropdown.gap,
        )
    }
}
