#![warn(missing_docs)]

//! Entry point for the `grid-tester` binary.

mod cli;
mod commands;
mod error;

use std::{io, process};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    registry()
        .with(log.env_filter())
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .try_init()
        .ok();

    let json = match command {
        Commands::Transform(args) => serde_json::to_string_pretty(&commands::transform(&args)?)?,
        Commands::Drop(args) => serde_json::to_string_pretty(&commands::drop(&args)?)?,
        Commands::Check(args) => serde_json::to_string_pretty(&commands::check(&args)?)?,
    };
    println!("{json}");
    Ok(())
}
