//! Tiresias CLI - attribute inference audits from the command line.

mod commands;
mod config;
mod dataset;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tiresias")]
#[command(author, version, about = "Tiresias - White-box attribute inference audits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new audit directory with a default tiresias.toml
    Init {
        /// Audit directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Infer the attacked feature for every row of a batch
    Infer {
        /// Decision tree node table (JSON)
        #[arg(short, long)]
        model: String,

        /// Batch of rows under attack (JSON)
        #[arg(short, long)]
        data: String,

        /// Column under attack (overrides tiresias.toml)
        #[arg(short, long, allow_negative_numbers = true)]
        attack_feature: Option<i64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an attack and score it against the batch's true values
    Evaluate {
        /// Decision tree node table (JSON)
        #[arg(short, long)]
        model: String,

        /// Batch of rows under attack, with a `truth` column (JSON)
        #[arg(short, long)]
        data: String,

        /// Column under attack (overrides tiresias.toml)
        #[arg(short, long, allow_negative_numbers = true)]
        attack_feature: Option<i64>,

        /// Print the scores as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the structure and leaf statistics of a model
    Inspect {
        /// Decision tree node table (JSON)
        #[arg(short, long)]
        model: String,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Infer {
            model,
            data,
            attack_feature,
            json,
        } => commands::infer::run(&model, &data, attack_feature, json),
        Commands::Evaluate {
            model,
            data,
            attack_feature,
            json,
        } => commands::evaluate::run(&model, &data, attack_feature, json),
        Commands::Inspect { model } => commands::inspect::run(&model),
    }
}
