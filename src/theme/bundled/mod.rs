//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/tui-dropdown/themes/ on first run.
//! Users can then modify them freely.

mod paper_light;
mod slate_dark;
mod terminal_ansi;

pub use paper_light::THEME as PAPER_LIGHT;
pub use slate_dark::THEME as SLATE_DARK;
pub use terminal_ansi::THEME as TERMINAL_ANSI;

/// Bundled theme: name and TOML content
pub struct BundledTheme {
    pub filename: &'static str,
    pub content: &'static str,
}

/// All bundled themes
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        filename: "Slate_Dark.toml",
        content: SLATE_DARK,
    },
    BundledTheme {
        filename: "Paper_Light.toml",
        content: PAPER_LIGHT,
    },
    BundledTheme {
        filename: "Terminal_ANSI.toml",
        content: TERMINAL_ANSI,
    },
];

/// Display names of bundled themes
pub fn list_bundled_themes() -> Vec<String> {
    BUNDLED_THEMES
        .iter()
        .map(|t| t.filename.trim_end_matches(".toml").replace('_', " "))
        .collect()
}
