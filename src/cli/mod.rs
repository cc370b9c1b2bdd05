//! Command-line front end
//!
//! Every subcommand builds a fresh registry from the files it is given,
//! then reports on it: load status, the merged table, one typed value, or key names.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod dump;
mod get;
mod keys;
mod utils;

/// Load key = value option files and query the merged table
#[derive(Parser)]
#[command(name = "conf-registry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load option files and report which ones loaded
    Check(check::CheckArgs),

    /// Print the merged option table
    Dump(dump::DumpArgs),

    /// Look up a single option as a typed value
    Get(get::GetArgs),

    /// List option names starting with a prefix
    Keys(keys::KeysArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Check(args) => check::run(args),
        Commands::Dump(args) => dump::run(args),
        Commands::Get(args) => get::run(args),
        Commands::Keys(args) => keys::run(args),
    }
}
