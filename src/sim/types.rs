//! Shared planner configuration and scenario identifiers.

use std::fmt;

use serde::Serialize;

use super::profile::ProfileSettings;
use crate::calc::emissions::EmissionFactors;
use crate::tariff::Tariff;

/// Immutable constants every calculation reads: tariff, emission factors,
/// and simulator resolution.
///
/// # Examples
///
/// ```
/// use tou_planner::sim::types::PlannerConfig;
///
/// let cfg = PlannerConfig::default();
/// assert_eq!(cfg.profile.interval_minutes, 15);
/// assert_eq!(cfg.tariff.peak_rate, 20.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlannerConfig {
    pub tariff: Tariff,
    pub emissions: EmissionFactors,
    pub profile: ProfileSettings,
}

/// The three cost comparison scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// A: fuel baseline where configured, otherwise the current electric pattern.
    Baseline,
    /// B: everything electric on the user's current schedule.
    CurrentElectric,
    /// C: everything electric on the optimizer's schedule.
    OptimizedElectric,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Baseline, Self::CurrentElectric, Self::OptimizedElectric];

    /// Single-letter label (A/B/C).
    pub fn letter(self) -> char {
        match self {
            Self::Baseline => 'A',
            Self::CurrentElectric => 'B',
            Self::OptimizedElectric => 'C',
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Baseline => "baseline",
            Self::CurrentElectric => "current electric",
            Self::OptimizedElectric => "optimized electric",
        };
        write!(f, "{} ({name})", self.letter())
    }
}
