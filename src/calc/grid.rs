//! Grid-impact metrics derived from a per-band energy distribution.

use serde::Serialize;

use super::cost::{BandBreakdown, distribute_kwh};
use crate::devices::Device;
use crate::tariff::{HOURS_PER_DAY, RateBand, TimeBlocks};

/// Daily energy per band in kWh.
pub type BandEnergy = BandBreakdown;

/// Load factor, stress, and efficiency for one device or a whole household.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GridMetrics {
    /// Daily kWh per band.
    pub band_energy: BandEnergy,
    /// Average-to-peak load ratio, 0–100.
    pub load_factor: f64,
    /// Band-weighted kWh (peak 3, mid-peak 2, off-peak 1); lower is better.
    pub stress_score: f64,
    /// Composite score, 0–10; higher is better.
    pub efficiency_score: f64,
}

impl GridMetrics {
    /// Derives the metrics from daily band energy and the peak load (kW)
    /// the energy is measured against.
    ///
    /// Zero energy yields all-zero metrics.
    pub fn from_band_energy(band_energy: BandEnergy, peak_load_kw: f64) -> Self {
        let total_kwh = band_energy.total();
        if total_kwh <= 0.0 {
            return Self {
                band_energy,
                ..Self::default()
            };
        }

        let average_load_kw = total_kwh / HOURS_PER_DAY as f64;
        let load_factor = if peak_load_kw > 0.0 {
            average_load_kw / peak_load_kw * 100.0
        } else {
            0.0
        };

        let stress_score = RateBand::BY_PRICE
            .into_iter()
            .map(|band| band_energy.get(band) * band.stress_weight())
            .sum::<f64>();

        let off_peak_pct = band_energy.offpeak / total_kwh * 100.0;
        let normalized_stress = (100.0 - stress_score * 5.0).max(0.0);
        let efficiency_score =
            ((off_peak_pct * 0.4 + load_factor * 0.3 + normalized_stress * 0.3) / 10.0)
                .clamp(0.0, 10.0);

        Self {
            band_energy,
            load_factor,
            stress_score,
            efficiency_score,
        }
    }

    pub fn total_kwh(&self) -> f64 {
        self.band_energy.total()
    }

    /// Share of energy used off-peak, 0–100.
    pub fn off_peak_pct(&self) -> f64 {
        let total = self.total_kwh();
        if total > 0.0 {
            self.band_energy.offpeak / total * 100.0
        } else {
            0.0
        }
    }
}

/// Grid metrics for one device on its selected blocks.
pub fn calculate_grid_metrics(device: &Device, blocks: &TimeBlocks, hours: f64) -> GridMetrics {
    GridMetrics::from_band_energy(distribute_kwh(device, blocks, hours), device.kw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DeviceCategory, LoadProfileType};
    use crate::tariff::Tariff;

    fn heater() -> Device {
        Device::new("h", "Heater", DeviceCategory::Heating, 1000.0, LoadProfileType::Continuous)
    }

    #[test]
    fn offpeak_usage_scores_well() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[0, 1], &tariff);
        let m = calculate_grid_metrics(&heater(), &blocks, 2.0);
        // 2 kWh off-peak: lf = (2/24)/1*100, stress = 2, norm = 90
        let lf = 2.0 / 24.0 * 100.0;
        assert!((m.load_factor - lf).abs() < 1e-9);
        assert_eq!(m.stress_score, 2.0);
        let expected = (100.0 * 0.4 + lf * 0.3 + 90.0 * 0.3) / 10.0;
        assert!((m.efficiency_score - expected).abs() < 1e-9);
    }

    #[test]
    fn peak_usage_scores_worse_than_offpeak() {
        let tariff = Tariff::default();
        let peak = calculate_grid_metrics(&heater(), &TimeBlocks::from_selected_hours(&[18, 19], &tariff), 2.0);
        let off = calculate_grid_metrics(&heater(), &TimeBlocks::from_selected_hours(&[0, 1], &tariff), 2.0);
        assert_eq!(peak.stress_score, 6.0);
        assert!(peak.efficiency_score < off.efficiency_score);
    }

    #[test]
    fn heavy_stress_floors_normalized_component() {
        let tariff = Tariff::default();
        let blocks = TimeBlocks::from_selected_hours(&[18, 19, 20, 21], &tariff);
        let big = Device::new("b", "Oven", DeviceCategory::Cooking, 5000.0, LoadProfileType::Continuous);
        let m = calculate_grid_metrics(&big, &blocks, 4.0);
        // stress = 20 kWh * 3 = 60 -> normalized = max(0, 100 - 300) = 0
        let lf = 20.0 / 24.0 / 5.0 * 100.0;
        assert!((m.efficiency_score - lf * 0.3 / 10.0).abs() < 1e-9);
    }

    #[test]
    fn full_day_load_factor_is_one_hundred() {
        let tariff = Tariff::default();
        let hours: Vec<u8> = (0..24).collect();
        let m = calculate_grid_metrics(&heater(), &TimeBlocks::from_selected_hours(&hours, &tariff), 24.0);
        assert!((m.load_factor - 100.0).abs() < 1e-9);
        assert!(m.efficiency_score <= 10.0);
    }

    #[test]
    fn no_energy_is_all_zero() {
        let tariff = Tariff::default();
        let m = calculate_grid_metrics(&heater(), &TimeBlocks::new(&tariff), 3.0);
        assert_eq!(m, GridMetrics::default());
        assert_eq!(m.off_peak_pct(), 0.0);
    }
}
