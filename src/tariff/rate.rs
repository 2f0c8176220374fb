use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three time-of-use price tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Peak,
    MidPeak,
    OffPeak,
}

impl RateBand {
    /// All bands, cheapest first.
    pub const BY_PRICE: [Self; 3] = [Self::OffPeak, Self::MidPeak, Self::Peak];

    /// Stress weight used by grid metrics (peak 3, mid-peak 2, off-peak 1).
    pub fn stress_weight(self) -> f64 {
        match self {
            Self::Peak => 3.0,
            Self::MidPeak => 2.0,
            Self::OffPeak => 1.0,
        }
    }
}

impl fmt::Display for RateBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Peak => "peak",
            Self::MidPeak => "midpeak",
            Self::OffPeak => "offpeak",
        })
    }
}

/// An hour range `[start, end]` (both bounds inclusive) tagged with a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateRange {
    /// First hour of the range (0–23).
    pub start: u8,
    /// Last hour of the range (0–23, inclusive).
    pub end: u8,
    /// Band applied to every hour in the range.
    pub band: RateBand,
}

impl RateRange {
    pub const fn new(start: u8, end: u8, band: RateBand) -> Self {
        Self { start, end, band }
    }

    /// Returns `true` when `hour` lies within `[start, end]`.
    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.start && hour <= self.end
    }
}

/// Static tariff: the three band rates and the ordered hour-range table.
///
/// Passed by reference into every calculation so alternate tariff regimes
/// can be evaluated side by side.
///
/// # Examples
///
/// ```
/// use tou_planner::tariff::{RateBand, Tariff};
///
/// let tariff = Tariff::default();
/// assert_eq!(tariff.rate_for_hour(19), RateBand::Peak);
/// assert_eq!(tariff.rate_for_hour(23), RateBand::OffPeak);
/// assert_eq!(tariff.rate(RateBand::OffPeak), 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tariff {
    /// Price per kWh during peak hours.
    pub peak_rate: f64,
    /// Price per kWh during mid-peak hours.
    pub midpeak_rate: f64,
    /// Price per kWh during off-peak hours.
    pub offpeak_rate: f64,
    /// Hour ranges, matched in order; the first match wins.
    pub ranges: Vec<RateRange>,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            peak_rate: 20.0,
            midpeak_rate: 12.0,
            offpeak_rate: 8.0,
            ranges: vec![
                RateRange::new(22, 23, RateBand::OffPeak),
                RateRange::new(0, 5, RateBand::OffPeak),
                RateRange::new(6, 17, RateBand::MidPeak),
                RateRange::new(18, 21, RateBand::Peak),
            ],
        }
    }
}

impl Tariff {
    /// Classifies an hour of day into its rate band.
    ///
    /// Hours not covered by any range fall back to [`RateBand::MidPeak`].
    /// `hour` must be in 0–23; anything else is a caller bug.
    pub fn rate_for_hour(&self, hour: u8) -> RateBand {
        debug_assert!(hour < 24, "hour {hour} out of range");
        self.ranges
            .iter()
            .find(|range| range.contains(hour))
            .map_or(RateBand::MidPeak, |range| range.band)
    }

    /// Returns the price per kWh for a band.
    pub fn rate(&self, band: RateBand) -> f64 {
        match band {
            RateBand::Peak => self.peak_rate,
            RateBand::MidPeak => self.midpeak_rate,
            RateBand::OffPeak => self.offpeak_rate,
        }
    }
}
