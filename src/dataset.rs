//! Training dataset ingest for the artifact builder.
//!
//! The training boundary is a tabular source with an equipment-name column
//! and a price column. Column names are configurable and default to the
//! historical export schema (`equipment_name` / `rental_price_per_day`).
//!
//! Ingest is strict: a row with a missing or unparsable field fails the whole
//! load with the offending line number. Training on a silently shrunk sample
//! is worse than failing the build.

use anyhow::{Context, Result};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default name of the equipment-identifier column.
pub const DEFAULT_EQUIPMENT_COLUMN: &str = "equipment_name";

/// Default name of the price column.
pub const DEFAULT_PRICE_COLUMN: &str = "rental_price_per_day";

/// Which columns of the source table hold the two training fields.
#[derive(Debug, Clone)]
pub struct Columns {
    /// Column holding the equipment name.
    pub equipment: String,
    /// Column holding the rental price.
    pub price: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            equipment: DEFAULT_EQUIPMENT_COLUMN.to_string(),
            price: DEFAULT_PRICE_COLUMN.to_string(),
        }
    }
}

/// One historical observation: an equipment name and a rental price.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub equipment: String,
    pub price: f64,
}

/// An in-memory training dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Observation>,
}

/// Structured failure kinds for dataset ingest and artifact fitting.
#[derive(Debug)]
pub enum DatasetError {
    /// A required column is absent from the header row.
    MissingColumn { column: String },
    /// The dataset contains no rows.
    Empty,
    /// A row has an empty equipment or price field.
    MissingValue { line: usize, column: String },
    /// A price field could not be parsed as a finite number.
    BadPrice { line: usize, value: String },
    /// Every price in the dataset is identical, so an anomaly detector
    /// fitted on it would be meaningless.
    NoVariance,
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::MissingColumn { column } => {
                write!(f, "Dataset is missing required column '{}'", column)
            }
            DatasetError::Empty => write!(f, "Dataset contains no rows"),
            DatasetError::MissingValue { line, column } => {
                write!(f, "Row at line {} has no value for '{}'", line, column)
            }
            DatasetError::BadPrice { line, value } => {
                write!(f, "Row at line {} has unparsable price '{}'", line, value)
            }
            DatasetError::NoVariance => {
                write!(f, "Dataset has no price variance; cannot fit a detector")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

impl Dataset {
    /// Build a dataset from already-materialized observations.
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Load a dataset from a CSV file with a header row.
    pub fn from_csv_path(path: &Path, columns: &Columns) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset '{}'", path.display()))?;
        Self::from_csv_reader(file, columns)
            .with_context(|| format!("Failed to load dataset '{}'", path.display()))
    }

    /// Load a dataset from any CSV reader with a header row.
    pub fn from_csv_reader(reader: impl Read, columns: &Columns) -> Result<Self> {
        let mut csv = csv::Reader::from_reader(reader);

        let headers = csv.headers().context("Failed to read CSV header row")?;
        let equipment_idx = find_column(headers, &columns.equipment)?;
        let price_idx = find_column(headers, &columns.price)?;

        let mut rows = Vec::new();
        for (i, record) in csv.records().enumerate() {
            // Header occupies line 1, so the first record is line 2.
            let line = i + 2;
            let record = record.with_context(|| format!("Failed to read CSV row at line {}", line))?;

            let equipment = field(&record, equipment_idx, line, &columns.equipment)?;
            let raw_price = field(&record, price_idx, line, &columns.price)?;

            let price: f64 = raw_price.parse().map_err(|_| DatasetError::BadPrice {
                line,
                value: raw_price.to_string(),
            })?;
            if !price.is_finite() {
                return Err(DatasetError::BadPrice {
                    line,
                    value: raw_price.to_string(),
                }
                .into());
            }

            rows.push(Observation {
                equipment: equipment.to_string(),
                price,
            });
        }

        Ok(Self { rows })
    }

    /// All observations, in source order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Locate a named column in the header row.
fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            DatasetError::MissingColumn {
                column: name.to_string(),
            }
            .into()
        })
}

/// Fetch a non-empty field from a record, or fail with its line number.
fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    line: usize,
    column: &str,
) -> Result<&'r str> {
    let value = record.get(idx).map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(DatasetError::MissingValue {
            line,
            column: column.to_string(),
        }
        .into());
    }
    Ok(value)
}
