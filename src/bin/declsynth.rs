//! declsynth: index package declarations and compose code against them
//!
//! ## Commands
//!
//! - **scan**: Scan a declaration feed into a package index
//! - **paths**: List the lookup paths registered in a package index
//! - **compose**: Build the code of an action against package indices
//!
//! ## Example Usage
//!
//! ```bash
//! # Scan a package and keep its index
//! declsynth scan people.feed.json --output people.index.json
//!
//! # Find the path of a method
//! declsynth paths people.index.json --prefix "example.com/people -> person.go -> Person"
//!
//! # Compose an action, printing the full context as JSON
//! declsynth --json compose --index people.index.json --action action.json
//! ```
//!
//! Logging goes to stderr and is controlled by `DECLSYNTH_LOG`
//! (an `EnvFilter` directive, default `warn`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use declsynth::types::config::{env_string, log_directives, LOG_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod declsynth_cli;

use declsynth_cli::{compose::ComposeCmd, paths::PathsCmd, scan::ScanCmd};

#[derive(Parser)]
#[command(
    name = "declsynth",
    author,
    version,
    about = "Declaration indexing and statement synthesis",
    long_about = "Scans package declarations into a path-addressable index and composes\n\
                  code statements that call into it."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging and extra detail)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a declaration feed into a package index
    Scan(ScanCmd),

    /// List the lookup paths of a package index
    Paths(PathsCmd),

    /// Compose the code of an action
    Compose(ComposeCmd),
}

fn init_tracing(verbose: bool) {
    let directives = log_directives(verbose, env_string(LOG_ENV));
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
    } = Cli::parse();
    init_tracing(verbose);

    match command {
        Commands::Scan(cmd) => cmd.execute(json, verbose),
        Commands::Paths(cmd) => cmd.execute(json),
        Commands::Compose(cmd) => cmd.execute(json, verbose),
    }
}
