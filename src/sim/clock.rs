/// Minutes in the tariff day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// One sample instant produced by the [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Sample index from the start of the day.
    pub index: usize,
    /// Minutes since midnight.
    pub minute: u32,
}

/// A sampling clock that walks one day at a fixed interval.
///
/// # Examples
///
/// ```
/// use tou_planner::sim::clock::Clock;
///
/// let mut clock = Clock::for_day(360);
/// let mut minutes = Vec::new();
///
/// clock.run(|sample| minutes.push(sample.minute));
/// assert_eq!(minutes, vec![0, 360, 720, 1080]);
/// ```
pub struct Clock {
    /// Index of the next sample
    current: usize,
    /// Total samples in the day
    total: usize,
    /// Minutes between samples
    interval_minutes: u32,
}

impl Clock {
    /// Creates a clock covering one day at `interval_minutes` resolution.
    ///
    /// A zero interval yields an empty clock.
    pub fn for_day(interval_minutes: u32) -> Self {
        let total = if interval_minutes == 0 {
            0
        } else {
            (MINUTES_PER_DAY / interval_minutes) as usize
        };
        Self {
            current: 0,
            total,
            interval_minutes,
        }
    }

    /// Number of samples in the day.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Advances the clock by one sample.
    ///
    /// # Returns
    ///
    /// * `Some(sample)` - The sample before advancing
    /// * `None` - If the day is complete
    pub fn tick(&mut self) -> Option<Sample> {
        if self.current < self.total {
            let index = self.current;
            self.current += 1;
            Some(Sample {
                index,
                minute: index as u32 * self.interval_minutes,
            })
        } else {
            None
        }
    }

    /// Runs a function for each remaining sample of the day.
    pub fn run(&mut self, mut f: impl FnMut(Sample)) {
        while let Some(sample) = self.tick() {
            f(sample);
        }
    }
}
