// CLI module - command-line argument parsing and handlers
//
// Running without a subcommand opens the gallery. Subcommands:
// - stories: List the available stories
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use crate::tui::stories::Story;
use clap::{Parser, Subcommand};
use tui_dropdown::theme::Theme;
use std::io::Write;
use std::path::PathBuf;

/// Interactive gallery for the tui-dropdown widget
#[derive(Parser)]
#[command(name = "dropdown-demo")]
#[command(version = VERSION)]
#[command(about = "Searchable single/multi-select dropdown gallery", long_about = None)]
pub struct Cli {
    /// Story to focus at startup (see `dropdown-demo stories`)
    #[arg(long)]
    pub story: Option<String>,

    /// JSON array of options to use instead of the built-in cities
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available stories
    Stories,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> bool {
    match cli.command {
        Some(Commands::Stories) => {
            handle_stories();
            true
        }
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                println!("Usage: dropdown-demo config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the gallery
    }
}

fn handle_stories() {
    for story in Story::ALL {
        println!("{:<28} {}", story.slug(), story.description());
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("theme = {:?}", config.theme);
    println!("# available: {}", Theme::list_available().join(", "));
    println!("use_theme_background = {}", config.use_theme_background);
    match &config.story {
        Some(story) => println!("story = {:?}", story),
        None => println!("# story = (first story)"),
    }
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);
    println!();
    println!("[dropdown]");
    println!("max_visible_rows = {}", config.dropdown.max_visible_rows);
    println!("flip_threshold = {}", config.dropdown.flip_threshold);
    println!("gap = {}", config.dropdown.gap);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_flags_parse() {
        let cli = Cli::parse_from(["dropdown-demo", "--story", "near-bottom", "--options", "c.json"]);
        assert_eq!(cli.story.as_deref(), Some("near-bottom"));
        assert_eq!(cli.options, Some(PathBuf::from("c.json")));
        assert!(!handle_cli(&cli));
    }

    #[test]
    fn test_config_subcommand_flags() {
        let cli = Cli::parse_from(["dropdown-demo", "config", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, show: false, reset: false })
        ));
    }
}
