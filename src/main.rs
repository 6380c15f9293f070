// dropdown-demo - interactive gallery for the tui-dropdown widget
//
// Architecture:
// - tui_dropdown (lib): the dropdown widget, themes, component traits
// - Config: env > ~/.config/tui-dropdown/config.toml > defaults
// - Logging: tracing into an in-memory buffer shown as the Actions panel
// - TUI (ratatui): one card per story, driven by a tokio event loop

mod cli;
mod config;
mod logging;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use logging::LogBuffer;
use std::path::Path;
use tui_dropdown::dropdown::options_from_json;
use tui_dropdown::theme;
use tui_dropdown::DropdownOption;

/// Options from `--options <file>`, or the built-in cities
fn load_options(path: Option<&Path>) -> Result<Vec<DropdownOption>> {
    let Some(path) = path else {
        return Ok(tui::stories::cities());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let options = options_from_json(&json)
        .with_context(|| format!("Options file {} is not a JSON array of options", path.display()))?;
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (stories, config ...) print and exit
    if cli::handle_cli(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Extract bundled themes on first run
    theme::ensure_themes_extracted();

    let mut config = Config::from_env();
    if let Some(story) = cli.story.clone() {
        config.story = Some(story);
    }

    // Fail before the terminal switches to the alternate screen
    let options = load_options(cli.options.as_deref())?;

    let log_buffer = LogBuffer::new();
    // Keep the guard alive so file logs flush on exit
    let _file_guard = logging::init(&config.logging, &log_buffer);

    tracing::info!(
        "dropdown-demo {} started with {} options, theme {}",
        config::VERSION,
        options.len(),
        config.theme
    );

    if let Err(e) = tui::run_tui(log_buffer, config, options).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
