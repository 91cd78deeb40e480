//! inane CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "inane")]
#[command(version)]
#[command(about = "Inspect and compose options files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an options file as JSON
    Show {
        /// Options file (.json, .yaml, .yml or .toml)
        file: PathBuf,
    },

    /// Merge options files left to right and print the result
    Merge {
        /// Options files, later files merged over earlier ones
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Backfill missing or empty values from model files
    Defaults {
        /// Options file to complete
        file: PathBuf,

        /// Model file(s), most important first
        #[arg(short, long = "model", required = true)]
        models: Vec<PathBuf>,
    },

    /// Print the value at a dot-separated path
    Get {
        /// Options file
        file: PathBuf,

        /// Path such as `db.host` or `plugins.0`
        path: String,

        /// JSON value printed when the path is missing
        #[arg(long)]
        default: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inane_config=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file } => commands::show::execute(&file),
        Commands::Merge { files } => commands::merge::execute(&files),
        Commands::Defaults { file, models } => commands::defaults::execute(&file, &models),
        Commands::Get {
            file,
            path,
            default,
        } => commands::get::execute(&file, &path, default.as_deref()),
    }
}
