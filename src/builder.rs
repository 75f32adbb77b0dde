//! Artifact construction from a training dataset.

use crate::artifact::{
    feature_row, ArtifactMeta, CategoryTable, FeatureRow, IsolationForest, RangeTable, Scaler,
    ValidationArtifact,
};
use crate::dataset::{Dataset, DatasetError};
use anyhow::{Context, Result};
use chrono::Local;
use std::fmt::{self, Display, Formatter};

/// Default expected fraction of outliers in the training data.
pub const DEFAULT_CONTAMINATION: f64 = 0.05;

/// Default random seed for forest fitting.
pub const DEFAULT_SEED: u64 = 42;

/// Rejected builder configuration: a contamination rate outside (0, 0.5].
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidContamination {
    pub value: f64,
}

impl Display for InvalidContamination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Contamination must be in (0, 0.5], got {}", self.value)
    }
}

impl std::error::Error for InvalidContamination {}

/// Builds a [`ValidationArtifact`] from historical observations.
///
/// This is the single construction path for artifacts: the category table,
/// range table, scaler, and forest all come out of one `fit` call, sharing
/// one code assignment and one feature ordering.
#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    contamination: f64,
    seed: u64,
}

impl Default for ArtifactBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactBuilder {
    pub fn new() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the expected outlier fraction. A policy constant, not a
    /// fitted quantity; must be in (0, 0.5].
    pub fn contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    /// Override the forest's random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit all four artifact structures on the dataset.
    ///
    /// Fails on empty datasets and on datasets with zero price variance,
    /// where a fitted detector would be meaningless. Single-equipment
    /// datasets with price variance are accepted: the constant code feature
    /// is handled by the scaler's zero-variance rule, though detector
    /// quality degrades with so narrow a training set.
    pub fn fit(&self, dataset: &Dataset) -> Result<ValidationArtifact> {
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(InvalidContamination {
                value: self.contamination,
            }
            .into());
        }
        if dataset.is_empty() {
            return Err(DatasetError::Empty.into());
        }

        let rows = dataset.rows();
        let first_price = rows[0].price;
        if rows.iter().all(|r| r.price == first_price) {
            return Err(DatasetError::NoVariance.into());
        }

        let categories = CategoryTable::fit(rows.iter().map(|r| r.equipment.as_str()));
        let ranges = RangeTable::fit(rows);

        let mut matrix: Vec<FeatureRow> = Vec::with_capacity(rows.len());
        for row in rows {
            let code = categories
                .code(&row.equipment)
                .with_context(|| format!("No code assigned for '{}'", row.equipment))?;
            matrix.push(feature_row(code, row.price));
        }

        let scaler = Scaler::fit(&matrix);
        let normalized: Vec<FeatureRow> = matrix.iter().map(|r| scaler.transform(*r)).collect();
        let forest = IsolationForest::fit(&normalized, self.contamination, self.seed);

        let meta = ArtifactMeta {
            trained_at: Local::now().to_rfc3339(),
            rows: rows.len(),
            contamination: self.contamination,
            seed: self.seed,
        };

        Ok(ValidationArtifact::new(meta, categories, ranges, scaler, forest))
    }
}
