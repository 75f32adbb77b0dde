//! # Priceguard - Hybrid Rental Price Validation
//!
//! Priceguard validates a proposed rental price for a piece of equipment
//! against two independent signals: the per-equipment historical price range,
//! and a learned anomaly model over (equipment, price) pairs.
//!
//! ## Overview
//!
//! An offline training run fits a [`artifact::ValidationArtifact`] (category
//! encoding, price-range table, feature scaler, and isolation forest) from a
//! historical CSV and persists it as one JSON blob. Each validation loads the
//! artifact and runs a short-circuiting pipeline of checks: identity, range,
//! anomaly.
//!
//! ## Modules
//!
//! - [`dataset`] - Training CSV ingest and the dataset error taxonomy
//! - [`artifact`] - The trained artifact bundle: schema and persistence
//! - [`builder`] - The single `fit` entry point producing artifacts
//! - [`validator`] - The staged validation pipeline and verdict types
//! - [`report`] - The JSON envelope for the one-shot invocation boundary
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use priceguard::artifact::ValidationArtifact;
//!
//! let artifact = ValidationArtifact::load(Path::new("price_validator.json"))
//!     .expect("Failed to load artifact");
//!
//! let verdict = artifact.validate("Tractor", 250.0);
//! println!("{}", verdict.message());
//! ```

pub mod artifact;
pub mod builder;
pub mod dataset;
pub mod report;
pub mod validator;
