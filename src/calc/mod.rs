//! Pure cost, schedule, emissions, and grid-impact calculations.

/// Time-of-use and fuel cost breakdowns.
pub mod cost;
pub mod emissions;
pub mod grid;
/// Cheapest-band schedule selection.
pub mod optimizer;
