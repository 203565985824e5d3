use core::time::Duration;

/// Quiet period a switch has to hold before a new level is accepted.
/// most mechanical switches settle well inside 25 ms.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(25);

/// Tracks how long the raw signal has been quiet.
///
/// Every change of the raw level re-arms the timer, including bounce noise,
/// so a level is only reported as settled after a continuous quiet period.
/// All time arithmetic wraps, the clock is expected to overflow.
pub struct SettleTimer {
    window_ms: u32,
    last_raw: bool,
    last_change: u32,
}

impl SettleTimer {
    /// Windows longer than `u32::MAX` ms saturate.
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: u32::try_from(window.as_millis()).unwrap_or(u32::MAX),
            last_raw: false,
            last_change: 0,
        }
    }

    /// Start tracking from a known level, as if it last changed at `now`.
    pub fn arm(&mut self, raw: bool, now: u32) {
        self.last_raw = raw;
        self.last_change = now;
    }

    /// Feed one raw sample.
    ///
    /// Returns the time since the last raw change once the window has
    /// elapsed, `None` while the signal is still settling.
    pub fn sample(&mut self, raw: bool, now: u32) -> Option<u32> {
        if raw != self.last_raw {
            self.last_change = now;
        }
        self.last_raw = raw;

        let elapsed = now.wrapping_sub(self.last_change);
        if elapsed >= self.window_ms {
            Some(elapsed)
        } else {
            None
        }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_after_full_window() {
        let mut timer = SettleTimer::default();
        timer.arm(false, 0);

        assert_eq!(timer.sample(true, 100), None);
        assert_eq!(timer.sample(true, 124), None);
        assert_eq!(timer.sample(true, 125), Some(25));
        assert_eq!(timer.sample(true, 200), Some(100));
    }

    #[test]
    fn every_change_rearms() {
        let mut timer = SettleTimer::new(Duration::from_millis(10));
        timer.arm(false, 0);

        for t in (0..100).step_by(5) {
            assert_eq!(timer.sample(t % 2 == 0, t), None, "t = {}", t);
        }
    }

    #[test]
    fn elapsed_survives_wraparound() {
        let mut timer = SettleTimer::default();
        timer.arm(false, 0);

        assert_eq!(timer.sample(true, u32::MAX - 9), None);
        assert_eq!(timer.sample(true, 14), None);
        assert_eq!(timer.sample(true, 15), Some(25));
    }

    #[test]
    fn custom_window() {
        let timer = SettleTimer::new(Duration::from_millis(5));
        assert_eq!(timer.window_ms(), 5);
        assert_eq!(SettleTimer::default().window_ms(), 25);
    }

    #[test]
    fn oversized_window_saturates() {
        let mut timer = SettleTimer::new(Duration::from_millis(u64::from(u32::MAX) + 26));
        assert_eq!(timer.window_ms(), u32::MAX);

        timer.arm(false, 0);
        assert_eq!(timer.sample(false, 25), None);
        assert_eq!(timer.sample(false, u32::MAX - 1), None);
        assert_eq!(timer.sample(false, u32::MAX), Some(u32::MAX));
    }
}
