//! Command module structure for the priceguard CLI

pub mod check;
pub mod inspect;
pub mod train;
