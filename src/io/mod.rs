/// Load profile CSV export.
pub mod export;
/// Comparison snapshot JSON.
pub mod snapshot;
