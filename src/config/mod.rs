//! Configuration for the demo gallery
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/tui-dropdown/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod dropdown;
mod logging;
mod serialization;


pub use dropdown::{DropdownDefaults, FileDropdown};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Theme used when neither env nor file names one
const DEFAULT_THEME: &str = tui_dropdown::theme::DEFAULT_THEME;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name (bundled or ~/.config/tui-dropdown/themes/*.toml)
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Story focused at startup (`None` = first story)
    pub story: Option<String>,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Defaults applied to every dropdown in the gallery
    pub dropdown: DropdownDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            use_theme_background: true,
            story: None,
            logging: LoggingConfig::default(),
            dropdown: DropdownDefaults::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub story: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [dropdown] section
    pub dropdown: Option<FileDropdown>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/tui-dropdown/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("tui-dropdown").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the file exists but cannot be read or parsed.
    /// A broken config should fail with a clear error rather than silently
    /// fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run: dropdown-demo config --reset\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Resolve a parsed file over the defaults (no environment)
    pub(crate) fn from_file(file: FileConfig) -> Self {
        Self {
            theme: file.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            use_theme_background: file.use_theme_background.unwrap_or(true),
            story: file.story.filter(|s| !s.is_empty()),
            logging: LoggingConfig::from_file(file.logging),
            dropdown: DropdownDefaults::from_file(file.dropdown),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let mut config = Self::from_file(Self::load_file_config());

        if let Ok(theme) = std::env::var("TUI_DROPDOWN_THEME") {
            config.theme = theme;
        }
        if let Ok(story) = std::env::var("TUI_DROPDOWN_STORY") {
            config.story = Some(story).filter(|s| !s.is_empty());
        }

        config
    }
}
