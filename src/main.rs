//! aeiou CLI
//!
//! Command-line interface for the aeiou audio helpers.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use aeiou::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("aeiou v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("aeiou v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Scan { paths, ext } => commands::scan(&paths, &ext).context("scan failed"),
        Commands::Info { path, sr, thresh } => commands::info(&path, sr, thresh)
            .with_context(|| format!("could not inspect {}", path.display())),
        Commands::Normalize {
            input,
            output,
            mode,
            sr,
            bit_depth,
        } => commands::normalize(&input, &output, &mode, sr, bit_depth)
            .with_context(|| format!("could not normalize {}", input.display())),
        Commands::Batch { path, win_len, sr } => commands::batch(&path, win_len, sr)
            .with_context(|| format!("could not window {}", path.display())),
        Commands::Which { name } => commands::which(&name).map_err(Into::into),
        Commands::Mkdir { path } => commands::mkdir(&path)
            .with_context(|| format!("could not create {}", path.display())),
        Commands::Untuple { json } => commands::untuple(&json).context("untuple failed"),
    }
}
