//! catkin-env CLI - workspace package classification

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("catkin_env=debug")
    } else {
        EnvFilter::new("catkin_env=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let options = cli.database.to_options();

    // Execute command
    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &options),
        Commands::Query(args) => commands::query::execute(args, &options),
        Commands::Doctor => commands::doctor::execute(&options, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
