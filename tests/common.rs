//! Common test fixtures for integration tests

use priceguard::artifact::ValidationArtifact;
use priceguard::builder::ArtifactBuilder;
use priceguard::dataset::{Dataset, Observation};
use std::fmt::Write;

/// Contamination used by the shared fixture artifact. Slightly above the
/// production default so the anomaly scenarios have margin.
pub const FIXTURE_CONTAMINATION: f64 = 0.08;

pub fn obs(equipment: &str, price: f64) -> Observation {
    Observation {
        equipment: equipment.to_string(),
        price,
    }
}

/// Historical observations with known shape:
/// - `Tractor`: a dense cluster from 100 to 290, plus one isolated 500,
///   so its stored range is [100, 500] with a large sparse gap.
/// - `Plough`: 40 to 82.
/// - `Seeder`: 60 to 116.
/// - `Harvester` never appears.
pub fn sample_rows() -> Vec<Observation> {
    let mut rows = Vec::new();
    for i in 0..20 {
        rows.push(obs("Tractor", 100.0 + (i as f64) * 10.0));
    }
    rows.push(obs("Tractor", 500.0));
    for i in 0..15 {
        rows.push(obs("Plough", 40.0 + (i as f64) * 3.0));
    }
    for i in 0..15 {
        rows.push(obs("Seeder", 60.0 + (i as f64) * 4.0));
    }
    rows
}

pub fn sample_dataset() -> Dataset {
    Dataset::from_rows(sample_rows())
}

/// The sample observations rendered as a CSV with an extra ignored column.
pub fn sample_csv() -> String {
    let mut csv = String::from("listing_id,equipment_name,rental_price_per_day\n");
    for (i, row) in sample_rows().iter().enumerate() {
        writeln!(csv, "{},{},{}", i + 1, row.equipment, row.price).unwrap();
    }
    csv
}

/// Train the shared fixture artifact.
pub fn train_artifact() -> ValidationArtifact {
    ArtifactBuilder::new()
        .contamination(FIXTURE_CONTAMINATION)
        .fit(&sample_dataset())
        .expect("fixture dataset must fit")
}
