//! CO2-equivalent emissions for electric and fuel usage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cost::DAYS_PER_MONTH;
use crate::devices::{AlternativeFuel, Device, FuelKind};

/// Emission factors and the tree absorption constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionFactors {
    /// kg CO2e per kWh drawn from the grid.
    pub electricity_kg_per_kwh: f64,
    /// kg CO2 one tree absorbs per year.
    pub tree_absorption_kg_per_year: f64,
    /// kg CO2e per fuel unit; kinds left out use the built-in factor.
    pub fuel_kg_per_unit: BTreeMap<FuelKind, f64>,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            electricity_kg_per_kwh: 0.7,
            tree_absorption_kg_per_year: 21.77,
            fuel_kg_per_unit: FuelKind::ALL
                .into_iter()
                .map(|kind| (kind, default_fuel_factor(kind)))
                .collect(),
        }
    }
}

impl EmissionFactors {
    /// kg CO2e per unit of `kind`.
    pub fn fuel_factor(&self, kind: FuelKind) -> f64 {
        self.fuel_kg_per_unit
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_fuel_factor(kind))
    }
}

fn default_fuel_factor(kind: FuelKind) -> f64 {
    match kind {
        FuelKind::Lpg => 2.983,
        FuelKind::Kerosene => 2.52,
        FuelKind::Charcoal => 3.3,
        FuelKind::Firewood => 1.747,
    }
}

/// Monthly emissions comparison between electric use and a fuel baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EmissionData {
    /// kg CO2e per month from electricity.
    pub current: f64,
    /// kg CO2e per month from the baseline (equals `current` without one).
    pub baseline: f64,
    /// `baseline - current`; negative when electricity is dirtier.
    pub saved: f64,
    /// Trees needed to absorb a year of `saved`; never negative.
    pub trees_equivalent: f64,
}

impl EmissionData {
    /// Builds the comparison from monthly figures, deriving savings and the
    /// tree offset.
    pub fn from_monthly(current: f64, baseline: f64, factors: &EmissionFactors) -> Self {
        let saved = baseline - current;
        let trees_equivalent = if factors.tree_absorption_kg_per_year > 0.0 {
            (saved * 12.0 / factors.tree_absorption_kg_per_year).max(0.0)
        } else {
            0.0
        };
        Self {
            current,
            baseline,
            saved,
            trees_equivalent,
        }
    }

    /// Sums several comparisons; the tree offset is recomputed from the
    /// combined savings rather than summed.
    pub fn combine<'a>(items: impl IntoIterator<Item = &'a Self>, factors: &EmissionFactors) -> Self {
        let (current, baseline) = items
            .into_iter()
            .fold((0.0, 0.0), |(c, b), item| (c + item.current, b + item.baseline));
        Self::from_monthly(current, baseline, factors)
    }
}

/// Energy in kWh for running `device` for `hours`.
pub fn calculate_total_kwh(device: &Device, hours: f64) -> f64 {
    device.watts * hours / 1000.0
}

/// kg CO2e for `kwh` of grid electricity.
pub fn calculate_electricity_co2(kwh: f64, factors: &EmissionFactors) -> f64 {
    kwh * factors.electricity_kg_per_kwh
}

/// kg CO2e for burning the fuel's daily consumption over `days`.
pub fn calculate_fuel_co2(fuel: &AlternativeFuel, days: f64, factors: &EmissionFactors) -> f64 {
    fuel.daily_consumption * days * factors.fuel_factor(fuel.kind)
}

/// Monthly emissions of `daily_kwh` of electricity against an optional fuel
/// baseline. Without a baseline the comparison nets to zero.
///
/// # Examples
///
/// ```
/// use tou_planner::calc::emissions::{EmissionFactors, calculate_emission_data};
///
/// let data = calculate_emission_data(2.0, None, &EmissionFactors::default());
/// assert_eq!(data.saved, 0.0);
/// assert_eq!(data.baseline, data.current);
/// ```
pub fn calculate_emission_data(
    daily_kwh: f64,
    baseline_fuel: Option<&AlternativeFuel>,
    factors: &EmissionFactors,
) -> EmissionData {
    let current = calculate_electricity_co2(daily_kwh * DAYS_PER_MONTH, factors);
    let baseline = baseline_fuel.map_or(current, |fuel| {
        calculate_fuel_co2(fuel, DAYS_PER_MONTH, factors)
    });
    EmissionData::from_monthly(current, baseline, factors)
}
