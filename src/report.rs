//! JSON envelope for the one-shot invocation boundary.
//!
//! The caller treats stdout as the sole machine-readable channel: whatever
//! happens (data rejection, bad arguments, missing artifact) it receives
//! one well-formed `{"valid": ..., "message": "..."}` object and a zero
//! exit status. Operational failures are distinguished from data rejections
//! only by the `"Error: "` message prefix.

use crate::artifact::ValidationArtifact;
use crate::validator::Verdict;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;

/// The invocation result envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub message: String,
}

impl Report {
    /// Envelope for a completed validation.
    pub fn from_verdict(verdict: &Verdict) -> Self {
        Self {
            valid: verdict.is_valid(),
            message: verdict.message(),
        }
    }

    /// Envelope for a failure of the pipeline itself, as opposed to a
    /// rejection of the submitted data.
    pub fn operational(error: impl Display) -> Self {
        Self {
            valid: false,
            message: format!("Error: {}", error),
        }
    }

    /// Serialize to the wire shape. Total: serialization of this struct
    /// cannot fail, but a hand-built envelope backstops it anyway.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"valid":false,"message":"Error: failed to serialize report"}"#.to_string()
        })
    }
}

/// The entire shim as a total function: load one artifact, decode the two
/// positional inputs, validate exactly once, and fold every possible failure
/// into the envelope. Never panics on caller input, never returns `Err`.
pub fn run_check(artifact_path: &Path, equipment: &str, price: &str) -> Report {
    let price: f64 = match price.trim().parse() {
        Ok(price) => price,
        Err(_) => return Report::operational(format!("could not parse price '{}'", price)),
    };
    if !price.is_finite() || price < 0.0 {
        return Report::operational(format!(
            "price must be a finite non-negative number, got {}",
            price
        ));
    }

    let artifact = match ValidationArtifact::load(artifact_path) {
        Ok(artifact) => artifact,
        Err(error) => return Report::operational(format!("{:#}", error)),
    };

    Report::from_verdict(&artifact.validate(equipment, price))
}
