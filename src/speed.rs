use std::time::Duration;

/// Simulation speed in ticks per second.
///
/// Growth accumulates into `base`; boost is a multiplier applied on read, so
/// toggling it never loses increments gained while it was held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    base: f64,
    boost_multiplier: f64,
    boosted: bool,
}

impl Speed {
    #[must_use]
    pub fn new(base: f64, boost_multiplier: f64) -> Self {
        Self {
            base,
            boost_multiplier,
            boosted: false,
        }
    }

    /// Effective ticks per second, boost included.
    #[must_use]
    pub fn current(self) -> f64 {
        if self.boosted {
            self.base * self.boost_multiplier
        } else {
            self.base
        }
    }

    /// Adds a growth increment to the base speed.
    pub fn accelerate(&mut self, increment: f64) {
        self.base += increment;
    }

    /// Sets the boost flag. Returns true when the flag actually changed.
    pub fn set_boost(&mut self, active: bool) -> bool {
        let changed = self.boosted != active;
        self.boosted = active;
        changed
    }

    /// Minimum wall-clock time between two ticks at the current speed.
    ///
    /// Saturates at `Duration::MAX` for speeds too slow to represent.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        interval_for(self.current()).unwrap_or(Duration::MAX)
    }
}

/// Returns the tick interval for `ticks_per_second`, or `None` when it does
/// not fit in a `Duration`.
#[must_use]
pub fn interval_for(ticks_per_second: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / ticks_per_second).ok()
}
