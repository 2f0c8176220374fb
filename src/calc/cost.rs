//! Electric (time-of-use) and fuel cost breakdowns.

use std::ops::AddAssign;

use serde::Serialize;

use crate::devices::{AlternativeFuel, Device};
use crate::tariff::{RateBand, Tariff, TimeBlocks};

/// Billing convention: a month is 30 days of the daily figure.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Billing convention: a year is 365 days of the daily figure.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// One value per rate band (money or energy, depending on context).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BandBreakdown {
    pub peak: f64,
    pub midpeak: f64,
    pub offpeak: f64,
}

impl BandBreakdown {
    pub fn get(&self, band: RateBand) -> f64 {
        match band {
            RateBand::Peak => self.peak,
            RateBand::MidPeak => self.midpeak,
            RateBand::OffPeak => self.offpeak,
        }
    }

    pub fn add(&mut self, band: RateBand, value: f64) {
        match band {
            RateBand::Peak => self.peak += value,
            RateBand::MidPeak => self.midpeak += value,
            RateBand::OffPeak => self.offpeak += value,
        }
    }

    pub fn total(&self) -> f64 {
        self.peak + self.midpeak + self.offpeak
    }
}

impl AddAssign for BandBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        self.peak += rhs.peak;
        self.midpeak += rhs.midpeak;
        self.offpeak += rhs.offpeak;
    }
}

/// Daily, monthly, and annual cost with an optional per-band split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub daily: f64,
    pub monthly: f64,
    pub annual: f64,
    /// Per-band daily cost; `None` for fuels, which are not TOU-rated.
    pub bands: Option<BandBreakdown>,
}

impl CostBreakdown {
    /// Derives monthly and annual figures from a daily cost.
    pub fn from_daily(daily: f64, bands: Option<BandBreakdown>) -> Self {
        Self {
            daily,
            monthly: daily * DAYS_PER_MONTH,
            annual: daily * DAYS_PER_YEAR,
            bands,
        }
    }

    /// Adds another breakdown's horizons and, when present, its bands.
    pub fn accumulate(&mut self, other: &Self) {
        self.daily += other.daily;
        self.monthly += other.monthly;
        self.annual += other.annual;
        if let Some(other_bands) = other.bands {
            *self.bands.get_or_insert_with(BandBreakdown::default) += other_bands;
        }
    }
}

/// Splits a device's daily energy (kWh) across the bands of its selected
/// blocks, spreading `daily_duration_hours` evenly over those blocks.
///
/// No selected blocks yields zero energy in every band.
pub fn distribute_kwh(device: &Device, blocks: &TimeBlocks, daily_duration_hours: f64) -> BandBreakdown {
    let mut energy = BandBreakdown::default();
    let count = blocks.selected_count();
    if count == 0 {
        return energy;
    }

    let hours_per_block = daily_duration_hours / count as f64;
    for block in blocks.selected() {
        energy.add(block.band, device.watts * hours_per_block / 1000.0);
    }
    energy
}

/// Time-of-use cost of running `device` on the selected blocks for
/// `daily_duration_hours` a day.
///
/// # Examples
///
/// ```
/// use tou_planner::calc::cost::calculate_tou_cost;
/// use tou_planner::devices::{Device, DeviceCategory, LoadProfileType};
/// use tou_planner::tariff::{Tariff, TimeBlocks};
///
/// let tariff = Tariff::default();
/// let kettle = Device::new("k", "Kettle", DeviceCategory::Other, 1000.0, LoadProfileType::Continuous);
/// let blocks = TimeBlocks::from_selected_hours(&[18, 19], &tariff);
/// let cost = calculate_tou_cost(&kettle, &blocks, 2.0, &tariff);
/// assert_eq!(cost.daily, 40.0);
/// assert_eq!(cost.monthly, 1200.0);
/// ```
pub fn calculate_tou_cost(
    device: &Device,
    blocks: &TimeBlocks,
    daily_duration_hours: f64,
    tariff: &Tariff,
) -> CostBreakdown {
    let energy = distribute_kwh(device, blocks, daily_duration_hours);
    let mut bands = BandBreakdown::default();
    for band in RateBand::BY_PRICE {
        bands.add(band, energy.get(band) * tariff.rate(band));
    }
    CostBreakdown::from_daily(bands.total(), Some(bands))
}

/// Cost of burning the baseline fuel; no band split.
pub fn calculate_fuel_cost_breakdown(fuel: &AlternativeFuel) -> CostBreakdown {
    CostBreakdown::from_daily(fuel.cost_per_unit * fuel.daily_consumption, None)
}

/// Daily cost per meal, when a positive meal count is known.
pub fn cost_per_meal(cost: &CostBreakdown, meals_per_day: Option<u32>) -> Option<f64> {
    meals_per_day
        .filter(|&meals| meals > 0)
        .map(|meals| cost.daily / f64::from(meals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DeviceCategory, FuelKind, LoadProfileType};

    fn kettle() -> Device {
        Device::new("kettle", "Kettle", DeviceCategory::Other, 1000.0, LoadProfileType::Continuous)
    }

    #[test]
    fn two_peak_hours() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[18, 19], &tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 2.0, &tariff);
        assert_eq!(cost.daily, 40.0);
        assert_eq!(cost.bands.map(|b| b.peak), Some(40.0));
    }

    #[test]
    fn two_offpeak_hours() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[1, 2], &tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 2.0, &tariff);
        assert_eq!(cost.daily, 16.0);
    }

    #[test]
    fn mixed_bands_have_matching_breakdown() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[10, 19, 23], &tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 3.0, &tariff);
        assert_eq!(cost.daily, 40.0);
        let bands = cost.bands.unwrap_or_default();
        assert_eq!(bands.midpeak, 12.0);
        assert_eq!(bands.peak, 20.0);
        assert_eq!(bands.offpeak, 8.0);
    }

    #[test]
    fn horizons_follow_billing_convention() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[7, 20, 3], &tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 1.7, &tariff);
        assert_eq!(cost.monthly, cost.daily * 30.0);
        assert_eq!(cost.annual, cost.daily * 365.0);
    }

    #[test]
    fn duration_spreads_evenly_over_selected_blocks() {
        let tariff = Tariff::default();
        // 1 kWh split across one peak and one off-peak hour: 0.5*20 + 0.5*8
        let blocks = TimeBlocks::from_selected_hours(&[19, 2], &tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 1.0, &tariff);
        assert!((cost.daily - 14.0).abs() < 1e-12);
    }

    #[test]
    fn empty_selection_is_zero_not_nan() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::new(&tariff);
        let cost = calculate_tou_cost(&kettle(), &blocks, 5.0, &tariff);
        assert_eq!(cost.daily, 0.0);
        assert_eq!(cost.annual, 0.0);
        assert_eq!(cost.bands, Some(BandBreakdown::default()));
    }

    #[test]
    fn fuel_cost_has_no_bands() {
        let fuel = AlternativeFuel::new(FuelKind::Lpg, 75.0, 0.4);
        let cost = calculate_fuel_cost_breakdown(&fuel);
        assert!((cost.daily - 30.0).abs() < 1e-12);
        assert!((cost.monthly - 900.0).abs() < 1e-9);
        assert!(cost.bands.is_none());
    }

    #[test]
    fn accumulate_merges_bands_only_when_present() {
        let mut total = CostBreakdown::default();
        total.accumulate(&CostBreakdown::from_daily(10.0, None));
        assert!(total.bands.is_none());

        let bands = BandBreakdown {
            peak: 1.0,
            midpeak: 2.0,
            offpeak: 3.0,
        };
        total.accumulate(&CostBreakdown::from_daily(6.0, Some(bands)));
        assert_eq!(total.daily, 16.0);
        assert_eq!(total.bands, Some(bands));
    }

    #[test]
    fn cost_per_meal_requires_positive_count() {
        let cost = CostBreakdown::from_daily(30.0, None);
        assert_eq!(cost_per_meal(&cost, Some(3)), Some(10.0));
        assert_eq!(cost_per_meal(&cost, Some(0)), None);
        assert_eq!(cost_per_meal(&cost, None), None);
    }
}
