//! Check command: the one-shot invocation shim.
//!
//! Prints exactly one JSON envelope on stdout and always succeeds from the
//! caller's perspective; every failure mode is folded into the payload by
//! [`priceguard::report::run_check`].

use anyhow::Result;
use std::path::Path;

use priceguard::report;

/// Main check command handler
pub fn cmd_check(artifact: &Path, equipment: &str, price: &str) -> Result<()> {
    let report = report::run_check(artifact, equipment, price);
    println!("{}", report.to_json());
    Ok(())
}
