use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use unit_price_compare::{config, init_tracing, LogTarget};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    let cfg = config::load_config(&args.config)?;

    // The interactive screen owns the terminal, so it logs to a file
    let target = match command {
        cli::Commands::Tui => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _log_guard = init_tracing(&cfg.logging, target)?;

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Tui => commands::tui::execute(&cfg)?,
        cli::Commands::Calc { pairs, json } => commands::calc::execute(&pairs, json, &cfg)?,
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config, &cfg)?,
        },
        cli::Commands::Version => {
            println!("Unit Price Compare v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
