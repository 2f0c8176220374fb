//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::calc::emissions::EmissionData;
use crate::calc::grid::GridMetrics;
use crate::sim::aggregate::{
    AggregatedCosts, CombinedGridMetrics, DeviceSummary, MultiDeviceState, Savings,
};
use crate::tariff::Tariff;

/// Household summary: everything but the load profile samples.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub tariff: Tariff,
    pub baseline: AggregatedCosts,
    pub current: AggregatedCosts,
    pub optimized: AggregatedCosts,
    pub grid: CombinedGridMetrics,
    pub optimized_grid: GridMetrics,
    pub emissions: EmissionData,
    pub savings: Savings,
    pub devices: Vec<DeviceSummary>,
}

impl StateResponse {
    pub fn new(tariff: &Tariff, state: &MultiDeviceState) -> Self {
        Self {
            tariff: tariff.clone(),
            baseline: state.baseline.clone(),
            current: state.current.clone(),
            optimized: state.optimized.clone(),
            grid: state.grid.clone(),
            optimized_grid: state.optimized_grid,
            emissions: state.emissions,
            savings: state.savings,
            devices: state.devices.clone(),
        }
    }
}

/// Which of the two simulated profiles to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileView {
    #[default]
    Current,
    Optimized,
}

impl ProfileView {
    /// Parses the `view` query value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "current" => Some(Self::Current),
            "optimized" => Some(Self::Optimized),
            _ => None,
        }
    }
}

/// Optional query parameters for the profile endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// `current` (default) or `optimized`.
    pub view: Option<String>,
    /// First minute of day to include (inclusive).
    pub from: Option<u32>,
    /// Last minute of day to include (inclusive).
    pub to: Option<u32>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
