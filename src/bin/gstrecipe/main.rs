//! gstrecipe CLI - build and package gst-plugins-base

use anyhow::Result;
use clap::Parser;
use gstrecipe::ops::Phase;
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
        EnvFilter::new("gstrecipe=debug")
    } else {
        EnvFilter::new("gstrecipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Source => commands::phase::execute(Phase::Source, &cli.settings, cli.verbose),
        Commands::Build => commands::phase::execute(Phase::Build, &cli.settings, cli.verbose),
        Commands::Package => commands::phase::execute(Phase::Package, &cli.settings, cli.verbose),
        Commands::Run => commands::run::execute(&cli.settings, cli.verbose),
        Commands::Info(args) => commands::info::execute(args, &cli.settings),
        Commands::Flags(args) => commands::flags::execute(args, &cli.settings),
        Commands::Doctor => commands::doctor::execute(cli.verbose),
    }
}
