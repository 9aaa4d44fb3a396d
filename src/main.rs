//! mdcast - live preview for a folder of markdown/asciidoc notes.

mod actor;
mod cli;
mod config;
mod core;
mod document;
mod embed;
mod logger;
mod reload;
mod render;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::PreviewConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Arc::new(PreviewConfig::from_cli(&cli)?);
    log!("serve"; "previewing {}", config.root.display());

    cli::serve::serve(config)
}
