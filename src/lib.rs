//! zup library root.
//! Exposes the scheduling core, its store and API collaborators, the CLI
//! parser and the high-level run() function.

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Due => cli::commands::due::handle(cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg),
        Commands::Snooze { .. } => cli::commands::snooze::handle(&cli.command, cfg),
        Commands::Cancel => cli::commands::cancel::handle(cfg),
        Commands::Register { .. } => cli::commands::register::handle(&cli.command, cfg),
        Commands::History => cli::commands::history::handle(cfg),
        Commands::Items => cli::commands::items::handle(cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load settings once
    let mut cfg = Config::load_from(&cli.config_path())?;

    // 3️⃣ apply the store override from the command line
    if let Some(custom_store) = &cli.store {
        cfg.store = custom_store.clone();
    }

    // 4️⃣ diagnostics go to stderr
    logging::init(&cfg.log_level);

    dispatch(&cli, &cfg)
}
