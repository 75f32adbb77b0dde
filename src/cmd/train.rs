//! Train command: fit an artifact from a historical CSV and persist it.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use priceguard::builder::ArtifactBuilder;
use priceguard::dataset::{Columns, Dataset};

/// Main train command handler
pub fn cmd_train(
    data: &Path,
    out: &Path,
    equipment_col: &str,
    price_col: &str,
    contamination: f64,
    seed: u64,
) -> Result<()> {
    let columns = Columns {
        equipment: equipment_col.to_string(),
        price: price_col.to_string(),
    };

    let dataset = Dataset::from_csv_path(data, &columns)?;

    let artifact = ArtifactBuilder::new()
        .contamination(contamination)
        .seed(seed)
        .fit(&dataset)?;

    artifact.save(out)?;

    println!(
        "{} Trained artifact written to {}",
        "✓".green(),
        out.display().to_string().bold()
    );
    println!(
        "  {} rows, {} equipment types, contamination {}, seed {}",
        dataset.len(),
        artifact.categories().len(),
        contamination,
        seed
    );

    Ok(())
}
