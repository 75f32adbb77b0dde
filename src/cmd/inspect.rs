//! Inspect command: show what a trained artifact contains.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use priceguard::artifact::ValidationArtifact;

/// Main inspect command handler
pub fn cmd_inspect(artifact_path: &Path) -> Result<()> {
    let artifact = ValidationArtifact::load(artifact_path)?;

    println!("{}", "Artifact".bold());
    println!("  path:          {}", artifact_path.display());
    println!("  trained at:    {}", artifact.meta.trained_at);
    println!("  training rows: {}", artifact.meta.rows);
    println!("  contamination: {}", artifact.meta.contamination);
    println!("  seed:          {}", artifact.meta.seed);
    println!();

    println!("{}", "Price ranges".bold());
    for (name, range) in artifact.ranges().iter() {
        println!("  {:<24} [{}, {}]", name, range.min, range.max);
    }

    Ok(())
}
