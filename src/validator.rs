//! Multi-stage price validation against a trained artifact.
//!
//! Validation is an ordered pipeline of three pure checks over the immutable
//! artifact, cheapest and most explainable first:
//!
//! 1. **Identity**: is the equipment name known at all?
//! 2. **Range**: is the price inside the historical [min, max]?
//! 3. **Anomaly**: does the isolation forest flag the (code, price) point?
//!
//! The first stage to reject wins, so an unknown name never reaches the
//! numeric stages and an out-of-range price never pays for forest scoring.
//! The anomaly stage can reject in-range prices: the forest reasons jointly
//! over equipment identity and price, not per-equipment bounds.

use crate::artifact::{feature_row, ValidationArtifact};
use std::fmt::{self, Display, Formatter};

/// Why a candidate price was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The equipment name was never seen at training time.
    UnknownEquipment { name: String },
    /// The price falls outside the historical bounds for this equipment.
    OutOfRange { price: f64, min: f64, max: f64 },
    /// In range, but the anomaly detector flagged the point.
    AnomalousPrice,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownEquipment { name } => write!(f, "Unknown equipment: {}", name),
            Rejection::OutOfRange { price, min, max } => {
                write!(f, "Price {} out of valid range [{}, {}]", price, min, max)
            }
            Rejection::AnomalousPrice => {
                write!(f, "Price looks anomalous (possible fraud or extreme outlier)")
            }
        }
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Human-readable message for display to the end user.
    pub fn message(&self) -> String {
        match self {
            Verdict::Valid => "Price is valid".to_string(),
            Verdict::Invalid(rejection) => rejection.to_string(),
        }
    }
}

/// One check stage: rejects or falls through.
type Stage = fn(&ValidationArtifact, &str, f64) -> Option<Rejection>;

impl ValidationArtifact {
    /// Run the candidate price through the staged checks.
    ///
    /// Pure and deterministic: no artifact mutation, no randomness, so the
    /// same inputs against the same artifact always yield the same verdict,
    /// and concurrent calls against a shared artifact are safe.
    pub fn validate(&self, equipment: &str, price: f64) -> Verdict {
        const STAGES: [Stage; 3] = [check_identity, check_range, check_anomaly];

        for stage in STAGES {
            if let Some(rejection) = stage(self, equipment, price) {
                return Verdict::Invalid(rejection);
            }
        }
        Verdict::Valid
    }
}

/// Stage 1: the name must have a category code.
fn check_identity(artifact: &ValidationArtifact, equipment: &str, _price: f64) -> Option<Rejection> {
    if artifact.categories.contains(equipment) {
        None
    } else {
        Some(Rejection::UnknownEquipment {
            name: equipment.to_string(),
        })
    }
}

/// Stage 2: the price must sit inside the historical bounds (inclusive).
fn check_range(artifact: &ValidationArtifact, equipment: &str, price: f64) -> Option<Rejection> {
    match artifact.ranges.range(equipment) {
        Some(range) if !range.contains(price) => Some(Rejection::OutOfRange {
            price,
            min: range.min,
            max: range.max,
        }),
        _ => None,
    }
}

/// Stage 3: the normalized (code, price) point must not be flagged by the
/// forest. The probe row is assembled through the same `feature_row` path
/// the builder fitted on.
fn check_anomaly(artifact: &ValidationArtifact, equipment: &str, price: f64) -> Option<Rejection> {
    let code = match artifact.categories.code(equipment) {
        Some(code) => code,
        // Unreachable after stage 1; kept total so the stage stands alone.
        None => {
            return Some(Rejection::UnknownEquipment {
                name: equipment.to_string(),
            })
        }
    };

    let probe = artifact.scaler.transform(feature_row(code, price));
    if artifact.forest.is_anomalous(probe) {
        Some(Rejection::AnomalousPrice)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ArtifactBuilder;
    use crate::dataset::{Dataset, Observation};

    fn obs(equipment: &str, price: f64) -> Observation {
        Observation {
            equipment: equipment.to_string(),
            price,
        }
    }

    fn trained_artifact() -> ValidationArtifact {
        let mut rows = Vec::new();
        for i in 0..25 {
            rows.push(obs("Tractor", 100.0 + (i as f64) * 8.0));
            rows.push(obs("Plough", 40.0 + (i as f64) * 3.0));
        }
        ArtifactBuilder::new()
            .fit(&Dataset::from_rows(rows))
            .unwrap()
    }

    #[test]
    fn test_unknown_equipment_rejects_regardless_of_price() {
        let artifact = trained_artifact();
        for price in [0.0, 150.0, 1_000_000.0] {
            let verdict = artifact.validate("Harvester", price);
            assert_eq!(
                verdict,
                Verdict::Invalid(Rejection::UnknownEquipment {
                    name: "Harvester".to_string()
                })
            );
        }
    }

    #[test]
    fn test_out_of_range_carries_bounds() {
        let artifact = trained_artifact();
        // Tractor training prices span [100, 292].
        let verdict = artifact.validate("Tractor", 50.0);
        assert_eq!(
            verdict,
            Verdict::Invalid(Rejection::OutOfRange {
                price: 50.0,
                min: 100.0,
                max: 292.0
            })
        );
        assert!(verdict.message().contains("[100, 292]"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let artifact = trained_artifact();
        for price in [100.0, 292.0] {
            let verdict = artifact.validate("Tractor", price);
            assert_ne!(
                verdict,
                Verdict::Invalid(Rejection::OutOfRange {
                    price,
                    min: 100.0,
                    max: 292.0
                })
            );
        }
    }

    #[test]
    fn test_typical_price_is_valid() {
        let artifact = trained_artifact();
        assert_eq!(artifact.validate("Tractor", 196.0), Verdict::Valid);
        assert_eq!(artifact.validate("Plough", 76.0), Verdict::Valid);
    }

    #[test]
    fn test_validate_is_deterministic() {
        let artifact = trained_artifact();
        let first = artifact.validate("Tractor", 250.0);
        for _ in 0..10 {
            assert_eq!(artifact.validate("Tractor", 250.0), first);
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::UnknownEquipment {
                name: "Drone".to_string()
            }
            .to_string(),
            "Unknown equipment: Drone"
        );
        assert_eq!(
            Rejection::OutOfRange {
                price: 50.0,
                min: 100.0,
                max: 500.0
            }
            .to_string(),
            "Price 50 out of valid range [100, 500]"
        );
        assert_eq!(Verdict::Valid.message(), "Price is valid");
    }
}
