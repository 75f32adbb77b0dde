//! Per-equipment historical price bounds.

use crate::dataset::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive empirical price bounds for one equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Whether a price falls inside the bounds. Both bounds are inclusive:
    /// a price exactly at the historical min or max is in range.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Mapping from equipment name to its observed price range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTable {
    ranges: BTreeMap<String, PriceRange>,
}

impl RangeTable {
    /// Grouped min/max aggregation over the training observations.
    pub(crate) fn fit(rows: &[Observation]) -> Self {
        let mut ranges: BTreeMap<String, PriceRange> = BTreeMap::new();
        for row in rows {
            ranges
                .entry(row.equipment.clone())
                .and_modify(|r| {
                    r.min = r.min.min(row.price);
                    r.max = r.max.max(row.price);
                })
                .or_insert(PriceRange {
                    min: row.price,
                    max: row.price,
                });
        }
        Self { ranges }
    }

    /// The stored range for an equipment name, if any.
    pub fn range(&self, name: &str) -> Option<&PriceRange> {
        self.ranges.get(name)
    }

    /// All (name, range) entries in sorted-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceRange)> {
        self.ranges.iter().map(|(name, range)| (name.as_str(), range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
