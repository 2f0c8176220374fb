//! Time-of-use tariff bands and the 24-hour block set they classify.

/// Fixed 24-block day with per-hour selection flags.
pub mod blocks;
/// Hour-to-band classification and band rates.
pub mod rate;

pub use blocks::{HOURS_PER_DAY, TimeBlock, TimeBlocks};
pub use rate::{RateBand, RateRange, Tariff};
