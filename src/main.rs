//! CLI entry point and command dispatch for priceguard.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use priceguard::builder::{DEFAULT_CONTAMINATION, DEFAULT_SEED};
use priceguard::dataset::{DEFAULT_EQUIPMENT_COLUMN, DEFAULT_PRICE_COLUMN};

/// Default location of the persisted artifact.
const DEFAULT_ARTIFACT: &str = "price_validator.json";

#[derive(Parser)]
#[command(name = "priceguard")]
#[command(version)]
#[command(about = "Hybrid rental price validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a validation artifact from a historical rental dataset
    Train {
        /// Path to the training CSV
        #[arg(long)]
        data: PathBuf,
        /// Where to write the trained artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        out: PathBuf,
        /// Column holding the equipment name
        #[arg(long, default_value = DEFAULT_EQUIPMENT_COLUMN)]
        equipment_col: String,
        /// Column holding the rental price
        #[arg(long, default_value = DEFAULT_PRICE_COLUMN)]
        price_col: String,
        /// Expected fraction of outliers in the training data
        #[arg(long, default_value_t = DEFAULT_CONTAMINATION)]
        contamination: f64,
        /// Random seed for detector fitting
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Check a candidate price, emitting a JSON verdict on stdout
    ///
    /// Always exits 0: failures are reported inside the JSON payload so the
    /// caller can treat stdout as the sole machine-readable channel.
    Check {
        /// Equipment name
        equipment: String,
        /// Candidate daily rental price
        price: String,
        /// Path to the trained artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,
    },
    /// Show metadata and price ranges stored in an artifact
    Inspect {
        /// Path to the trained artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            out,
            equipment_col,
            price_col,
            contamination,
            seed,
        } => cmd::train::cmd_train(&data, &out, &equipment_col, &price_col, contamination, seed),
        Commands::Check {
            equipment,
            price,
            artifact,
        } => cmd::check::cmd_check(&artifact, &equipment, &price),
        Commands::Inspect { artifact } => cmd::inspect::cmd_inspect(&artifact),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "priceguard", &mut io::stdout());
            Ok(())
        }
    }
}
