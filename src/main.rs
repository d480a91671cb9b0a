//! Quill - A minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! quill notes.txt
//! quill --dark --font "Courier New" --font-size 14 notes.txt
//! quill --dark --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quill::app::App;
use quill::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A minimal terminal text editor with formatting and dark mode
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Text file to open (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Start in light mode (overrides --dark)
    #[arg(long)]
    light: bool,

    /// Initial font family
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    /// Initial font size in points
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    font_size: Option<u16>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective startup flags");

    // Saving or clearing defaults without a file is a configuration run.
    if (cli.save || cli.clear) && cli.file.is_none() {
        return Ok(());
    }

    let mut app = App::new(cli.file)
        .with_dark_mode(effective.dark_mode())
        .with_font(effective.font)
        .with_font_size(effective.font_size);

    app.run().context("Application error")
}
