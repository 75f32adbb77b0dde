//! The trained validation artifact: schema, persistence, and the shared
//! feature-row assembly point.
//!
//! An artifact bundles four fitted structures (the category table, the
//! price-range table, the feature scaler, and the isolation forest) plus
//! provenance metadata. The four are mutually consistent only because they
//! are produced together by one [`crate::builder::ArtifactBuilder::fit`]
//! call; nothing else constructs or mutates an artifact. Validation takes
//! `&self` throughout, so a loaded artifact can be shared freely across
//! concurrent callers, and re-training builds a fresh artifact rather than
//! touching one in use.

mod category;
mod forest;
mod ranges;
mod scaler;

pub use category::CategoryTable;
pub use forest::IsolationForest;
pub use ranges::{PriceRange, RangeTable};
pub use scaler::Scaler;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted format version. Bumped on any incompatible schema change so
/// that stale blobs fail loudly at load time.
pub const ARTIFACT_VERSION: u32 = 1;

/// Width of the detector's feature space: (equipment code, price).
pub const FEATURE_COUNT: usize = 2;

/// One detector input row.
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Assemble a detector input row from an equipment code and a price.
///
/// This is the only place the feature ordering is written down. The scaler
/// and the forest are fitted on rows built here, and validation builds its
/// probe rows here too; assembling a row any other way would silently break
/// the fitted transforms.
pub(crate) fn feature_row(code: u32, price: f64) -> FeatureRow {
    [f64::from(code), price]
}

/// Provenance recorded alongside the fitted structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// RFC 3339 timestamp of the training run.
    pub trained_at: String,
    /// Number of training observations.
    pub rows: usize,
    /// Contamination rate the forest was fitted with.
    pub contamination: f64,
    /// Seed the forest was fitted with.
    pub seed: u64,
}

/// The immutable bundle produced by one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationArtifact {
    version: u32,
    pub meta: ArtifactMeta,
    pub(crate) categories: CategoryTable,
    pub(crate) ranges: RangeTable,
    pub(crate) scaler: Scaler,
    pub(crate) forest: IsolationForest,
}

impl ValidationArtifact {
    pub(crate) fn new(
        meta: ArtifactMeta,
        categories: CategoryTable,
        ranges: RangeTable,
        scaler: Scaler,
        forest: IsolationForest,
    ) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            meta,
            categories,
            ranges,
            scaler,
            forest,
        }
    }

    /// Write the artifact to disk as one JSON blob.
    ///
    /// Fitted floats (split thresholds, scaler statistics) must reload
    /// bit-identical or verdicts can flip near a threshold; serde_json's
    /// `float_roundtrip` feature provides the correctly-rounded parse.
    pub fn save(&self, path: &Path) -> Result<()> {
        let blob = serde_json::to_string_pretty(self).context("Failed to serialize artifact")?;
        fs::write(path, blob)
            .with_context(|| format!("Failed to write artifact '{}'", path.display()))?;
        Ok(())
    }

    /// Load an artifact from disk, failing loudly on a missing file, a
    /// corrupt blob, or an incompatible format version.
    pub fn load(path: &Path) -> Result<Self> {
        let blob = fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact '{}'", path.display()))?;
        let artifact: Self = serde_json::from_str(&blob)
            .with_context(|| format!("Artifact '{}' is corrupt or not an artifact", path.display()))?;
        if artifact.version != ARTIFACT_VERSION {
            bail!(
                "Artifact '{}' has format version {}, expected {}",
                path.display(),
                artifact.version,
                ARTIFACT_VERSION
            );
        }
        Ok(artifact)
    }

    /// The fitted category table.
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// The fitted price-range table.
    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }
}
