//! obsidian-index CLI
//!
//! Generates a markdown index file in every directory of an Obsidian
//! vault, working from the deepest directories up to the root.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod version;

#[derive(Parser)]
#[command(name = "obsidian-index")]
#[command(author = "obsidian-index Contributors")]
#[command(version)]
#[command(about = "A CLI tool for indexing Obsidian vaults", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a vault from its deepest directories up to the root
    ///
    /// Every directory gets an index file named after it, linking to the
    /// files and already-indexed subdirectories it contains. Existing
    /// index files are never modified.
    Init {
        /// Path to the Obsidian vault (defaults to current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Show what would be done without creating files
        #[arg(long)]
        dry_run: bool,

        /// Back up existing index files before writing
        #[arg(long)]
        backup: bool,

        /// Directories to exclude from indexing (comma separated or repeated)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Write a JSON report of the run to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version and build information
    Version {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init {
            dir,
            dry_run,
            backup,
            exclude,
            output,
        } => config::resolve_vault_dir(dir.as_deref())
            .map_err(|e| -> Box<dyn std::error::Error> {
                format!("failed to resolve vault directory: {}", e).into()
            })
            .and_then(|vault_dir| {
                let config = config::Config {
                    vault_dir,
                    verbose: cli.verbose,
                    dry_run,
                    backup,
                    exclude_dirs: exclude,
                };
                commands::init(&config, output.as_deref())
            }),
        Commands::Version { json } => commands::version(json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
