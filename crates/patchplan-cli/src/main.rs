//! patchplan CLI
//!
//! Plans partial-update patches between two JSON snapshots of a resource

use clap::{Parser, Subcommand};
use patchplan_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "patchplan")]
#[command(about = "patchplan - Minimal JSON patches between resource snapshots", long_about = None)]
struct Cli {
    /// Human-readable debug logs on stderr instead of JSON info logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff a desired snapshot against the current one
    Diff(commands::diff::DiffArgs),
    /// List resource kinds and their compared fields
    Kinds(commands::kinds::KindsArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Kinds(args) => commands::kinds::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
