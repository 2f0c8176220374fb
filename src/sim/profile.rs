//! Sub-hourly load profile reconstruction from whole-hour schedules.
//!
//! Selected hours are merged into contiguous active runs (wrapping past
//! midnight). Within a run the device's [`Waveform`] scales rated power;
//! outside it, power ramps linearly between zero and rated power over the
//! ramp window before the run starts and after it ends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::clock::{Clock, MINUTES_PER_DAY};
use super::waveform::Waveform;
use crate::devices::{Device, SelectedDevice};
use crate::tariff::{HOURS_PER_DAY, RateBand, Tariff, TimeBlocks};

/// Sampling and ramp resolution of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSettings {
    /// Minutes between samples; must divide 60.
    pub interval_minutes: u32,
    /// Length of the on/off ramp in minutes.
    pub ramp_minutes: u32,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            interval_minutes: 15,
            ramp_minutes: 15,
        }
    }
}

/// A contiguous span of selected hours, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRun {
    pub start_minute: u32,
    pub length_minutes: u32,
}

impl ActiveRun {
    fn is_full_day(&self) -> bool {
        self.length_minutes >= MINUTES_PER_DAY
    }

    /// Rated-power fraction this run contributes at `minute`.
    fn power_fraction(&self, minute: f64, ramp_minutes: f64, shape: &impl Waveform) -> f64 {
        let day = f64::from(MINUTES_PER_DAY);
        if self.is_full_day() {
            return shape.multiplier(minute.rem_euclid(day));
        }

        let length = f64::from(self.length_minutes);
        let since_start = (minute - f64::from(self.start_minute)).rem_euclid(day);
        if since_start < length {
            let phase = since_start.min(length - since_start);
            return shape.multiplier(phase);
        }
        if ramp_minutes <= 0.0 {
            return 0.0;
        }

        let after_end = since_start - length;
        if after_end <= ramp_minutes {
            return 1.0 - after_end / ramp_minutes;
        }
        let before_start = day - since_start;
        if before_start <= ramp_minutes {
            return 1.0 - before_start / ramp_minutes;
        }
        0.0
    }
}

/// Merges the selected hours into active runs, joining 23:00 and 00:00.
pub fn active_runs(blocks: &TimeBlocks) -> Vec<ActiveRun> {
    let selected = blocks.selected_count();
    if selected == 0 {
        return Vec::new();
    }
    if selected == HOURS_PER_DAY {
        return vec![ActiveRun {
            start_minute: 0,
            length_minutes: MINUTES_PER_DAY,
        }];
    }

    // Start scanning just after an unselected hour so no run is split.
    let Some(gap) = blocks.iter().find(|block| !block.selected).map(|b| b.hour) else {
        return Vec::new();
    };
    let mut runs = Vec::new();
    let mut current: Option<(u8, u32)> = None;
    for offset in 1..=HOURS_PER_DAY as u8 {
        let hour = (gap + offset) % HOURS_PER_DAY as u8;
        if blocks.is_selected(hour) {
            let (_, len) = current.get_or_insert((hour, 0));
            *len += 1;
        } else if let Some((start, len)) = current.take() {
            runs.push(ActiveRun {
                start_minute: u32::from(start) * 60,
                length_minutes: len * 60,
            });
        }
    }
    runs
}

/// Instantaneous power (W) of `device` at `minute` given its active runs.
pub fn device_power_at(device: &Device, runs: &[ActiveRun], minute: f64, ramp_minutes: u32) -> f64 {
    let ramp = f64::from(ramp_minutes);
    runs.iter()
        .map(|run| run.power_fraction(minute, ramp, &device.profile))
        .sum::<f64>()
        * device.watts
}

/// Per-sample power (W) of one device across the day.
pub fn simulate_device(device: &Device, blocks: &TimeBlocks, settings: &ProfileSettings) -> Vec<f64> {
    let runs = active_runs(blocks);
    let mut clock = Clock::for_day(settings.interval_minutes);
    let mut samples = Vec::with_capacity(clock.len());
    clock.run(|sample| {
        samples.push(device_power_at(
            device,
            &runs,
            f64::from(sample.minute),
            settings.ramp_minutes,
        ));
    });
    samples
}

/// One sample of the combined household load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadProfilePoint {
    /// Minutes since midnight.
    pub minute: u32,
    /// `HH:MM` label.
    pub time: String,
    pub hour: u8,
    pub band: RateBand,
    /// Combined power in watts.
    pub total_watts: f64,
    /// Power per device instance id, in watts.
    pub device_watts: BTreeMap<String, f64>,
    /// Cost of drawing `total_watts` for one sample interval.
    pub cost: f64,
}

/// Builds the combined load profile for `(device, blocks)` pairs.
pub fn simulate_load_profile<'a>(
    schedules: impl IntoIterator<Item = (&'a SelectedDevice, &'a TimeBlocks)>,
    tariff: &Tariff,
    settings: &ProfileSettings,
) -> Vec<LoadProfilePoint> {
    let per_device: Vec<(&str, Vec<f64>)> = schedules
        .into_iter()
        .map(|(selected, blocks)| {
            (
                selected.instance_id.as_str(),
                simulate_device(&selected.device, blocks, settings),
            )
        })
        .collect();

    let interval_hours = f64::from(settings.interval_minutes) / 60.0;
    let mut clock = Clock::for_day(settings.interval_minutes);
    let mut points = Vec::with_capacity(clock.len());
    clock.run(|sample| {
        let hour = (sample.minute / 60) as u8;
        let band = tariff.rate_for_hour(hour);

        let mut device_watts = BTreeMap::new();
        let mut total_watts = 0.0;
        for (id, samples) in &per_device {
            let watts = samples[sample.index];
            *device_watts.entry((*id).to_string()).or_insert(0.0) += watts;
            total_watts += watts;
        }

        points.push(LoadProfilePoint {
            minute: sample.minute,
            time: format!("{:02}:{:02}", sample.minute / 60, sample.minute % 60),
            hour,
            band,
            total_watts,
            device_watts,
            cost: total_watts / 1000.0 * interval_hours * tariff.rate(band),
        });
    });
    points
}

/// Total cost difference between two profiles over the day.
pub fn daily_savings(current: &[LoadProfilePoint], optimized: &[LoadProfilePoint]) -> f64 {
    current
        .iter()
        .zip(optimized)
        .map(|(c, o)| c.cost - o.cost)
        .sum()
}

/// Hour with the highest mean combined power; earliest wins ties.
/// `None` when the profile never draws power.
pub fn peak_load_hour(profile: &[LoadProfilePoint]) -> Option<u8> {
    let mut sums = [0.0_f64; HOURS_PER_DAY];
    let mut counts = [0_u32; HOURS_PER_DAY];
    for point in profile {
        let idx = usize::from(point.hour);
        sums[idx] += point.total_watts;
        counts[idx] += 1;
    }

    let mut best: Option<(u8, f64)> = None;
    for (hour, (sum, count)) in sums.iter().zip(counts).enumerate() {
        if count == 0 {
            continue;
        }
        let mean = sum / f64::from(count);
        if mean > 0.0 && best.is_none_or(|(_, top)| mean > top) {
            best = Some((hour as u8, mean));
        }
    }
    best.map(|(hour, _)| hour)
}
