//! Intra-period power shapes for each load-profile type.

use std::f64::consts::PI;

use crate::devices::LoadProfileType;

/// Pulsing duty-cycle period (minutes).
const PULSE_PERIOD_MIN: f64 = 8.0;
/// Fraction of each pulse period at rated power.
const PULSE_ON_FRACTION: f64 = 0.35;
/// Output between pulses as a fraction of rated power.
const PULSE_IDLE: f64 = 0.08;
const PULSE_JITTER: f64 = 0.04;
const PULSE_JITTER_PERIOD_MIN: f64 = 1.3;

/// Compressor cycle period (minutes).
const CYCLE_PERIOD_MIN: f64 = 30.0;
/// Minutes per cycle the compressor runs at rated power.
const CYCLE_ON_MIN: f64 = 10.0;
const CYCLE_STANDBY: f64 = 0.12;
/// Extra draw right after the compressor stops, decaying to standby.
const CYCLE_COOLDOWN: f64 = 0.25;
const CYCLE_COOLDOWN_TAU_MIN: f64 = 3.0;

/// A shape that scales rated power within an active period.
///
/// `phase_minutes` is measured from the nearest edge of the active period,
/// and every shape returns exactly 1.0 at phase zero.
pub trait Waveform {
    /// Returns the fraction of rated power drawn at `phase_minutes`.
    fn multiplier(&self, phase_minutes: f64) -> f64;
}

impl Waveform for LoadProfileType {
    fn multiplier(&self, phase_minutes: f64) -> f64 {
        match self {
            Self::Continuous => 1.0,
            Self::Pulsing => pulsing(phase_minutes),
            Self::Cycling => cycling(phase_minutes),
        }
    }
}

fn pulsing(phase_minutes: f64) -> f64 {
    let in_period = phase_minutes.rem_euclid(PULSE_PERIOD_MIN);
    let base = if in_period < PULSE_PERIOD_MIN * PULSE_ON_FRACTION {
        1.0
    } else {
        PULSE_IDLE
    };
    let jitter = PULSE_JITTER * (2.0 * PI * phase_minutes / PULSE_JITTER_PERIOD_MIN).sin();
    (base + jitter).clamp(PULSE_IDLE, 1.0)
}

fn cycling(phase_minutes: f64) -> f64 {
    let in_period = phase_minutes.rem_euclid(CYCLE_PERIOD_MIN);
    if in_period < CYCLE_ON_MIN {
        1.0
    } else {
        let since_off = in_period - CYCLE_ON_MIN;
        CYCLE_STANDBY + CYCLE_COOLDOWN * (-since_off / CYCLE_COOLDOWN_TAU_MIN).exp()
    }
}
