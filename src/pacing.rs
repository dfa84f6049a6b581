use std::time::{Duration, Instant};

/// Minimum-interval rate limiter for the tick loop.
///
/// The driver polls [`TickGate::ready`] on every frame; it returns false
/// while less than `1 / speed` seconds have passed since the last tick, so
/// the simulation rate is independent of the frame rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickGate {
    last_tick: Option<Instant>,
}

impl TickGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records `now` once `interval` has elapsed since the
    /// last tick.
    pub fn ready(&mut self, now: Instant, interval: Duration) -> bool {
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < interval {
                return false;
            }
        }

        self.last_tick = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::speed::Speed;

    use super::TickGate;

    #[test]
    fn first_poll_fires() {
        let mut gate = TickGate::new();
        assert!(gate.ready(Instant::now(), Duration::from_millis(100)));
    }

    #[test]
    fn polls_inside_interval_are_skipped() {
        let mut gate = TickGate::new();
        let start = Instant::now();
        let interval = Speed::new(10.0, 2.0).tick_interval();

        assert!(gate.ready(start, interval));
        assert!(!gate.ready(start + Duration::from_millis(16), interval));
        assert!(!gate.ready(start + Duration::from_millis(80), interval));
        assert!(gate.ready(start + Duration::from_millis(112), interval));
        assert!(!gate.ready(start + Duration::from_millis(128), interval));
    }

    #[test]
    fn shorter_interval_fires_sooner() {
        let mut gate = TickGate::new();
        let start = Instant::now();

        assert!(gate.ready(start, Duration::from_millis(50)));
        assert!(gate.ready(start + Duration::from_millis(50), Duration::from_millis(50)));
    }
}
