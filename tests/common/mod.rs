//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::Rng;
use rand::rngs::StdRng;

use tou_planner::devices::{
    AlternativeFuel, Device, DeviceCategory, FuelKind, LoadProfileType, SelectedDevice,
};
use tou_planner::sim::types::PlannerConfig;
use tou_planner::tariff::{HOURS_PER_DAY, Tariff, TimeBlocks};

/// Default calculation constants (20/12/8 tariff, 15-minute profile).
pub fn default_config() -> PlannerConfig {
    PlannerConfig::default()
}

/// A catalog device with the given rated power and shape.
pub fn device(id: &str, watts: f64, profile: LoadProfileType) -> Device {
    Device::new(id, id, DeviceCategory::Other, watts, profile)
}

/// A continuous device running on `hours` for `duration` hours a day.
pub fn selected(id: &str, watts: f64, hours: &[u8], duration: f64) -> SelectedDevice {
    SelectedDevice::with_id(
        id,
        device(id, watts, LoadProfileType::Continuous),
        TimeBlocks::from_selected_hours(hours, &Tariff::default()),
        duration,
    )
}

/// An LPG-cooking stove on `hours` with reference fuel values.
pub fn lpg_stove(id: &str, hours: &[u8], duration: f64) -> SelectedDevice {
    let stove = Device::new(id, "Stove", DeviceCategory::Cooking, 2000.0, LoadProfileType::Pulsing);
    SelectedDevice::with_id(
        id,
        stove,
        TimeBlocks::from_selected_hours(hours, &Tariff::default()),
        duration,
    )
    .with_fuel(AlternativeFuel::new(FuelKind::Lpg, 75.0, 0.4))
    .with_meals(3)
}

/// A random household of `count` devices whose selected hours always cover
/// the daily duration.
pub fn random_household(rng: &mut StdRng, count: usize) -> Vec<SelectedDevice> {
    const SHAPES: [LoadProfileType; 3] = [
        LoadProfileType::Continuous,
        LoadProfileType::Pulsing,
        LoadProfileType::Cycling,
    ];
    let tariff = Tariff::default();
    (0..count)
        .map(|i| {
            let hours: Vec<u8> = (0..HOURS_PER_DAY as u8)
                .filter(|_| rng.random_bool(0.3))
                .collect();
            let duration = if hours.is_empty() {
                0.0
            } else {
                rng.random_range(0.0..=hours.len() as f64)
            };
            let shape = SHAPES[rng.random_range(0..SHAPES.len())];
            let watts = rng.random_range(50.0..3000.0);
            let mut d = SelectedDevice::with_id(
                format!("dev-{i}"),
                device(&format!("catalog-{i}"), watts, shape),
                TimeBlocks::from_selected_hours(&hours, &tariff),
                duration,
            );
            if rng.random_bool(0.25) {
                let kind = FuelKind::ALL[rng.random_range(0..FuelKind::ALL.len())];
                d = d.with_fuel(AlternativeFuel::new(
                    kind,
                    rng.random_range(10.0..100.0),
                    rng.random_range(0.1..2.0),
                ));
            }
            d
        })
        .collect()
}
