//! Time-of-use appliance cost, emissions and grid-impact planner.
//!
//! Compares what a household pays today (fuel baselines where configured),
//! what it would pay running everything electric on its current schedule,
//! and what it would pay on the cheapest schedule for the same daily use.

/// REST API over a computed household (feature `api`).
#[cfg(feature = "api")]
pub mod api;
/// Cost, optimizer, emissions and grid metric calculations.
pub mod calc;
pub mod config;
pub mod devices;
pub mod error;
/// Load profile CSV export and comparison snapshots.
pub mod io;
mod report;
/// Load profile simulation and multi-device aggregation.
pub mod sim;
pub mod tariff;
