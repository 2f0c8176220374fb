//! Greedy cheapest-band schedule selection.

use crate::tariff::{HOURS_PER_DAY, RateBand, Tariff, TimeBlocks};

/// Returns the 24-block day that runs `hours_needed` hours at the lowest cost.
///
/// Off-peak hours are taken first, then mid-peak, then peak, each in hour
/// order. Fractional needs round up to whole blocks; the request is clamped
/// to `[0, 24]` and NaN counts as zero.
///
/// Optimal as long as off-peak < mid-peak < peak and hours are
/// interchangeable for the appliance.
///
/// # Examples
///
/// ```
/// use tou_planner::calc::optimizer::generate_optimized_time_blocks;
/// use tou_planner::tariff::Tariff;
///
/// let blocks = generate_optimized_time_blocks(10.0, &Tariff::default());
/// assert_eq!(blocks.selected_count(), 10);
/// ```
pub fn generate_optimized_time_blocks(hours_needed: f64, tariff: &Tariff) -> TimeBlocks {
    let mut blocks = TimeBlocks::new(tariff);
    let mut remaining = blocks_needed(hours_needed);

    for band in RateBand::BY_PRICE {
        let hours: Vec<u8> = blocks
            .iter()
            .filter(|block| block.band == band)
            .map(|block| block.hour)
            .collect();
        for hour in hours {
            if remaining == 0 {
                return blocks;
            }
            blocks.set_selected(hour, true);
            remaining -= 1;
        }
    }
    blocks
}

fn blocks_needed(hours_needed: f64) -> usize {
    if hours_needed.is_nan() {
        return 0;
    }
    hours_needed.clamp(0.0, HOURS_PER_DAY as f64).ceil() as usize
}
