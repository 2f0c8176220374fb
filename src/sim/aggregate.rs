//! Multi-device aggregation across the three cost scenarios.
//!
//! [`recompute`] is the single entry point: it rebuilds the whole
//! [`MultiDeviceState`] from the device list, so callers run it after every
//! change and never patch derived values in place.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::profile::{LoadProfilePoint, daily_savings, peak_load_hour, simulate_load_profile};
use super::types::{PlannerConfig, Scenario};
use crate::calc::cost::{
    BandBreakdown, CostBreakdown, calculate_fuel_cost_breakdown, calculate_tou_cost,
    cost_per_meal, distribute_kwh,
};
use crate::calc::emissions::{EmissionData, calculate_emission_data, calculate_total_kwh};
use crate::calc::grid::{BandEnergy, GridMetrics};
use crate::calc::optimizer::generate_optimized_time_blocks;
use crate::devices::{LoadProfileType, SelectedDevice};
use crate::tariff::TimeBlocks;

/// Combined costs of all devices under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedCosts {
    pub scenario: Scenario,
    /// Sum of every device's horizons.
    pub total: CostBreakdown,
    /// Each device's own breakdown, keyed by instance id.
    pub by_device: BTreeMap<String, CostBreakdown>,
    /// Sum of the per-band daily costs of electric devices.
    pub bands: BandBreakdown,
}

impl AggregatedCosts {
    fn from_devices<'a>(
        scenario: Scenario,
        costs: impl IntoIterator<Item = (&'a str, CostBreakdown)>,
    ) -> Self {
        let mut total = CostBreakdown::default();
        let mut bands = BandBreakdown::default();
        let mut by_device = BTreeMap::new();
        for (id, cost) in costs {
            total.accumulate(&cost);
            if let Some(device_bands) = cost.bands {
                bands += device_bands;
            }
            by_device.insert(id.to_string(), cost);
        }
        total.bands = Some(bands);
        Self {
            scenario,
            total,
            by_device,
            bands,
        }
    }
}

/// Household grid metrics with totals and per-device contributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedGridMetrics {
    #[serde(flatten)]
    pub metrics: GridMetrics,
    /// Daily kWh across all devices.
    pub total_kwh: f64,
    /// Hour of the highest mean combined power, if any power is drawn.
    pub peak_load_hour: Option<u8>,
    /// Share of `total_kwh` per device instance id, 0–100.
    pub device_contribution_pct: BTreeMap<String, f64>,
}

/// Per-device summary used for drill-down display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub instance_id: String,
    pub name: String,
    pub watts: f64,
    pub profile: LoadProfileType,
    pub duration_hours: f64,
    pub selected_hours: Vec<u8>,
    pub optimized_hours: Vec<u8>,
    /// Daily kWh on the selected hours; zero when none are selected.
    pub daily_kwh: f64,
    pub grid: GridMetrics,
    pub emissions: EmissionData,
    pub current_cost_per_meal: Option<f64>,
    pub optimized_cost_per_meal: Option<f64>,
}

/// Savings of the optimized schedule against the other scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Savings {
    /// Integral of the per-sample cost difference, current minus optimized.
    pub daily_profile: f64,
    pub monthly_vs_baseline: f64,
    pub annual_vs_baseline: f64,
    pub monthly_vs_current: f64,
    pub annual_vs_current: f64,
}

/// Full computed result for one device list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiDeviceState {
    pub baseline: AggregatedCosts,
    pub current: AggregatedCosts,
    pub optimized: AggregatedCosts,
    /// Combined metrics on the current schedules.
    pub grid: CombinedGridMetrics,
    /// Combined metrics on the optimized schedules.
    pub optimized_grid: GridMetrics,
    pub emissions: EmissionData,
    pub devices: Vec<DeviceSummary>,
    pub current_profile: Vec<LoadProfilePoint>,
    pub optimized_profile: Vec<LoadProfilePoint>,
    pub savings: Savings,
}

impl MultiDeviceState {
    /// Returns the aggregated costs for `scenario`.
    pub fn scenario(&self, scenario: Scenario) -> &AggregatedCosts {
        match scenario {
            Scenario::Baseline => &self.baseline,
            Scenario::CurrentElectric => &self.current,
            Scenario::OptimizedElectric => &self.optimized,
        }
    }
}

/// Recomputes the household state from scratch.
///
/// Pure and deterministic: the same device list and configuration always
/// produce an identical result.
pub fn recompute(devices: &[SelectedDevice], config: &PlannerConfig) -> MultiDeviceState {
    let tariff = &config.tariff;
    // Bands cached in the caller's blocks may come from another tariff.
    let current_blocks: Vec<TimeBlocks> = devices
        .iter()
        .map(|d| TimeBlocks::from_selected_hours(&d.blocks.selected_hours(), tariff))
        .collect();
    let optimized_blocks: Vec<TimeBlocks> = devices
        .iter()
        .map(|d| generate_optimized_time_blocks(d.duration_hours, tariff))
        .collect();

    let current_costs: Vec<CostBreakdown> = devices
        .iter()
        .zip(&current_blocks)
        .map(|(d, blocks)| calculate_tou_cost(&d.device, blocks, d.duration_hours, tariff))
        .collect();
    let optimized_costs: Vec<CostBreakdown> = devices
        .iter()
        .zip(&optimized_blocks)
        .map(|(d, blocks)| calculate_tou_cost(&d.device, blocks, d.duration_hours, tariff))
        .collect();
    let baseline_costs: Vec<CostBreakdown> = devices
        .iter()
        .zip(&current_costs)
        .map(|(d, current)| d.fuel.as_ref().map_or(*current, calculate_fuel_cost_breakdown))
        .collect();

    let ids = || devices.iter().map(|d| d.instance_id.as_str());
    let baseline = AggregatedCosts::from_devices(
        Scenario::Baseline,
        ids().zip(baseline_costs.iter().copied()),
    );
    let current = AggregatedCosts::from_devices(
        Scenario::CurrentElectric,
        ids().zip(current_costs.iter().copied()),
    );
    let optimized = AggregatedCosts::from_devices(
        Scenario::OptimizedElectric,
        ids().zip(optimized_costs.iter().copied()),
    );

    let current_profile = simulate_load_profile(
        devices.iter().zip(&current_blocks),
        tariff,
        &config.profile,
    );
    let optimized_profile = simulate_load_profile(
        devices.iter().zip(&optimized_blocks),
        tariff,
        &config.profile,
    );

    let peak_load_kw: f64 = devices.iter().map(|d| d.device.kw()).sum();
    let current_energy: Vec<BandEnergy> = devices
        .iter()
        .zip(&current_blocks)
        .map(|(d, blocks)| distribute_kwh(&d.device, blocks, d.duration_hours))
        .collect();
    let grid = combine_grid(devices, &current_energy, peak_load_kw, &current_profile);
    let optimized_grid = GridMetrics::from_band_energy(
        devices
            .iter()
            .zip(&optimized_blocks)
            .map(|(d, blocks)| distribute_kwh(&d.device, blocks, d.duration_hours))
            .fold(BandEnergy::default(), |mut acc, e| {
                acc += e;
                acc
            }),
        peak_load_kw,
    );

    let summaries: Vec<DeviceSummary> = devices
        .iter()
        .enumerate()
        .map(|(i, d)| {
            // no selected hours draws nothing, matching cost and grid energy
            let daily_kwh = if current_blocks[i].selected_count() == 0 {
                0.0
            } else {
                calculate_total_kwh(&d.device, d.duration_hours)
            };
            DeviceSummary {
                instance_id: d.instance_id.clone(),
                name: d.device.name.clone(),
                watts: d.device.watts,
                profile: d.device.profile,
                duration_hours: d.duration_hours,
                selected_hours: current_blocks[i].selected_hours(),
                optimized_hours: optimized_blocks[i].selected_hours(),
                daily_kwh,
                grid: GridMetrics::from_band_energy(current_energy[i], d.device.kw()),
                emissions: calculate_emission_data(daily_kwh, d.fuel.as_ref(), &config.emissions),
                current_cost_per_meal: cost_per_meal(&current_costs[i], d.meals_per_day),
                optimized_cost_per_meal: cost_per_meal(&optimized_costs[i], d.meals_per_day),
            }
        })
        .collect();
    let emissions = EmissionData::combine(summaries.iter().map(|s| &s.emissions), &config.emissions);

    let savings = Savings {
        daily_profile: daily_savings(&current_profile, &optimized_profile),
        monthly_vs_baseline: baseline.total.monthly - optimized.total.monthly,
        annual_vs_baseline: baseline.total.annual - optimized.total.annual,
        monthly_vs_current: current.total.monthly - optimized.total.monthly,
        annual_vs_current: current.total.annual - optimized.total.annual,
    };

    debug!(
        devices = devices.len(),
        baseline_monthly = baseline.total.monthly,
        current_monthly = current.total.monthly,
        optimized_monthly = optimized.total.monthly,
        "recomputed household state"
    );

    MultiDeviceState {
        baseline,
        current,
        optimized,
        grid,
        optimized_grid,
        emissions,
        devices: summaries,
        current_profile,
        optimized_profile,
        savings,
    }
}

fn combine_grid(
    devices: &[SelectedDevice],
    energy: &[BandEnergy],
    peak_load_kw: f64,
    profile: &[LoadProfilePoint],
) -> CombinedGridMetrics {
    let combined = energy.iter().fold(BandEnergy::default(), |mut acc, e| {
        acc += *e;
        acc
    });
    let total_kwh = combined.total();

    let mut device_contribution_pct = BTreeMap::new();
    for (d, e) in devices.iter().zip(energy) {
        let pct = if total_kwh > 0.0 {
            e.total() / total_kwh * 100.0
        } else {
            0.0
        };
        *device_contribution_pct
            .entry(d.instance_id.clone())
            .or_insert(0.0) += pct;
    }

    CombinedGridMetrics {
        metrics: GridMetrics::from_band_energy(combined, peak_load_kw),
        total_kwh,
        peak_load_hour: peak_load_hour(profile),
        device_contribution_pct,
    }
}
