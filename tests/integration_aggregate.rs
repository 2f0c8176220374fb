//! Integration tests for household recomputation across scenarios.

mod common;

use rand::SeedableRng;
use rand::rngs::StdRng;

use tou_planner::devices::LoadProfileType;
use tou_planner::sim::aggregate::recompute;
use tou_planner::sim::profile::{active_runs, device_power_at};
use tou_planner::sim::types::Scenario;
use tou_planner::tariff::{Tariff, TimeBlocks};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn recompute_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);
    let devices = common::random_household(&mut rng, 6);
    let config = common::default_config();
    assert_eq!(recompute(&devices, &config), recompute(&devices, &config));
}

#[test]
fn scenario_totals_are_sums_of_devices() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = common::default_config();
    for _ in 0..50 {
        let devices = common::random_household(&mut rng, 5);
        let state = recompute(&devices, &config);
        for scenario in Scenario::ALL {
            let costs = state.scenario(scenario);
            let sum: f64 = costs.by_device.values().map(|c| c.monthly).sum();
            assert!(close(costs.total.monthly, sum), "{scenario}: {} vs {sum}", costs.total.monthly);
            assert_eq!(costs.by_device.len(), devices.len());
        }
    }
}

#[test]
fn optimized_never_costs_more_than_current() {
    let mut rng = StdRng::seed_from_u64(1234);
    let config = common::default_config();
    for _ in 0..200 {
        let devices = common::random_household(&mut rng, 4);
        let state = recompute(&devices, &config);
        assert!(
            state.optimized.total.monthly <= state.current.total.monthly + 1e-9,
            "C {} > B {}",
            state.optimized.total.monthly,
            state.current.total.monthly
        );
        for (id, optimized) in &state.optimized.by_device {
            let current = state.current.by_device[id];
            assert!(optimized.daily <= current.daily + 1e-9, "{id}");
        }
    }
}

#[test]
fn under_covered_schedule_can_beat_the_optimizer() {
    let config = common::default_config();
    // ten hours squeezed into one off-peak block
    let short = recompute(&[common::selected("k", 1000.0, &[0], 10.0)], &config);
    assert!(close(short.current.total.daily, 80.0));
    // ten blocks: eight off-peak, two mid-peak
    assert!(close(short.optimized.total.daily, 8.0 * 8.0 + 2.0 * 12.0));
    assert!(short.optimized.total.daily > short.current.total.daily);
    assert!(short.savings.monthly_vs_current < 0.0);

    // covering ceil(duration) hours restores the bound
    let hours: Vec<u8> = (0..10).collect();
    let covered = recompute(&[common::selected("k", 1000.0, &hours, 10.0)], &config);
    assert!(covered.optimized.total.daily <= covered.current.total.daily + 1e-9);
}

#[test]
fn peak_to_off_peak_saves_sixty_percent() {
    let config = common::default_config();
    let peak = recompute(&[common::selected("k", 1000.0, &[18, 19], 2.0)], &config);
    let off = recompute(&[common::selected("k", 1000.0, &[0, 1], 2.0)], &config);
    let saving_pct =
        (peak.current.total.daily - off.current.total.daily) / peak.current.total.daily * 100.0;
    assert!((saving_pct - 60.0).abs() < 1e-9, "got {saving_pct}");
    // the optimizer finds the same off-peak schedule
    assert!(close(peak.optimized.total.daily, off.current.total.daily));
}

#[test]
fn fuel_baseline_feeds_scenario_a_only() {
    let config = common::default_config();
    let devices = vec![
        common::lpg_stove("stove", &[18, 19], 2.0),
        common::selected("fan", 100.0, &[13], 1.0),
    ];
    let state = recompute(&devices, &config);

    // LPG 75/kg at 0.4 kg/day
    assert!(close(state.baseline.by_device["stove"].daily, 30.0));
    assert!(close(state.current.by_device["stove"].daily, 80.0));
    assert!(close(
        state.baseline.total.daily,
        30.0 + state.current.by_device["fan"].daily
    ));
    // 4 kWh/day of grid power against 0.4 kg/day of LPG
    let stove = &state.devices[0];
    assert_eq!(stove.instance_id, "stove");
    assert!(close(stove.emissions.current, 4.0 * 30.0 * 0.7));
    assert!(close(stove.emissions.baseline, 0.4 * 30.0 * 2.983));
    assert!(stove.emissions.saved < 0.0);
    assert_eq!(stove.emissions.trees_equivalent, 0.0);
    assert!(stove.current_cost_per_meal.is_some());
}

#[test]
fn profiles_cover_the_day_and_integrate_to_costs() {
    let config = common::default_config();
    let devices = vec![common::selected("heater", 1000.0, &[10], 1.0)];
    let state = recompute(&devices, &config);
    assert_eq!(state.current_profile.len(), 96);
    assert_eq!(state.optimized_profile.len(), 96);

    // one kWh on the hour plus two quarter-hour ramps at half power
    let kwh: f64 = state
        .current_profile
        .iter()
        .map(|p| p.total_watts / 1000.0 * 0.25)
        .sum();
    assert!(close(kwh, 1.25), "got {kwh}");
    assert_eq!(state.grid.peak_load_hour, Some(10));
    assert!(state.savings.daily_profile > 0.0);
}

#[test]
fn ramps_are_continuous_for_every_profile_type() {
    let tariff = Tariff::default();
    let blocks = TimeBlocks::from_selected_hours(&[8, 9, 14], &tariff);
    let runs = active_runs(&blocks);
    let ramp = 15;
    let step = 0.01;

    for shape in [
        LoadProfileType::Continuous,
        LoadProfileType::Pulsing,
        LoadProfileType::Cycling,
    ] {
        let d = common::device("d", 1200.0, shape);
        for run in &runs {
            let start = f64::from(run.start_minute);
            let end = start + f64::from(run.length_minutes);
            assert_eq!(device_power_at(&d, &runs, start - f64::from(ramp), ramp), 0.0);
            assert_eq!(device_power_at(&d, &runs, start, ramp), 1200.0, "{shape} at {start}");
            assert_eq!(device_power_at(&d, &runs, end, ramp), 1200.0, "{shape} at {end}");

            for (from, to) in [(start - 16.0, start + 0.5), (end - 0.5, end + 16.0)] {
                let mut minute = from;
                let mut previous = device_power_at(&d, &runs, minute, ramp);
                while minute < to {
                    minute += step;
                    let power = device_power_at(&d, &runs, minute, ramp);
                    assert!(
                        (power - previous).abs() < 5.0,
                        "{shape} jumps {previous} -> {power} at minute {minute}"
                    );
                    previous = power;
                }
            }
        }
    }
}

#[test]
fn empty_household_is_zero() {
    let state = recompute(&[], &common::default_config());
    for scenario in Scenario::ALL {
        assert_eq!(state.scenario(scenario).total.annual, 0.0);
    }
    assert_eq!(state.grid.metrics.efficiency_score, 0.0);
    assert_eq!(state.emissions.trees_equivalent, 0.0);
}
