use serde::Serialize;

use super::rate::{RateBand, Tariff};

/// Number of hour blocks in the tariff day.
pub const HOURS_PER_DAY: usize = 24;

/// One hour slot of the day with its selection flag and cached band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeBlock {
    /// Hour of day (0–23).
    pub hour: u8,
    /// Whether the appliance runs during this hour.
    pub selected: bool,
    /// Band the hour falls into under the tariff used to build the set.
    pub band: RateBand,
}

/// Exactly 24 time blocks, one per hour, in hour order.
///
/// The fixed-size array makes the "one block per hour, no duplicates"
/// invariant structural; only the selection flags are mutable.
///
/// # Examples
///
/// ```
/// use tou_planner::tariff::{Tariff, TimeBlocks};
///
/// let blocks = TimeBlocks::from_selected_hours(&[22, 23, 0], &Tariff::default());
/// assert_eq!(blocks.iter().count(), 24);
/// assert_eq!(blocks.selected_hours(), vec![0, 22, 23]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBlocks([TimeBlock; HOURS_PER_DAY]);

impl TimeBlocks {
    /// Creates an unselected day with bands classified by `tariff`.
    pub fn new(tariff: &Tariff) -> Self {
        Self(std::array::from_fn(|i| {
            let hour = i as u8;
            TimeBlock {
                hour,
                selected: false,
                band: tariff.rate_for_hour(hour),
            }
        }))
    }

    /// Creates a day with the given hours selected. Hours past 23 are
    /// ignored; duplicates are harmless.
    pub fn from_selected_hours(hours: &[u8], tariff: &Tariff) -> Self {
        let mut blocks = Self::new(tariff);
        for &hour in hours {
            blocks.set_selected(hour, true);
        }
        blocks
    }

    /// Sets the selection flag of one hour. Hours past 23 are ignored.
    pub fn set_selected(&mut self, hour: u8, selected: bool) {
        if let Some(block) = self.0.get_mut(usize::from(hour)) {
            block.selected = selected;
        }
    }

    /// Returns the block for `hour`.
    pub fn get(&self, hour: u8) -> &TimeBlock {
        &self.0[usize::from(hour)]
    }

    /// Iterates all 24 blocks in hour order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeBlock> {
        self.0.iter()
    }

    /// Iterates the selected blocks in hour order.
    pub fn selected(&self) -> impl Iterator<Item = &TimeBlock> {
        self.0.iter().filter(|block| block.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// Selected hours in ascending order.
    pub fn selected_hours(&self) -> Vec<u8> {
        self.selected().map(|block| block.hour).collect()
    }

    /// Returns `true` when `hour` is selected.
    pub fn is_selected(&self, hour: u8) -> bool {
        self.get(hour).selected
    }
}
