use std::collections::VecDeque;

/// Number of recent hit latencies kept for the displayed average.
pub const LATENCY_WINDOW_LEN: usize = 10;

/// EWMA gain; roughly a 20-sample effective window.
const TRAILING_ERROR_GAIN: f64 = 0.05;

/// Running error and latency aggregates for the scoreboard.
#[derive(Debug, Clone)]
pub struct TimingStats {
    last_offset_ms: f64,
    trailing_error_ms: f64,
    latency_window: VecDeque<f64>,
}

impl TimingStats {
    pub fn new() -> Self {
        let mut stats = Self {
            last_offset_ms: 0.0,
            trailing_error_ms: 0.0,
            latency_window: VecDeque::with_capacity(LATENCY_WINDOW_LEN + 1),
        };
        stats.reseed();
        stats
    }

    /// Reset to a fresh session: zero trailing error and a latency window
    /// seeded with zeros, so a new session is not biased by the last one.
    pub fn reseed(&mut self) {
        self.last_offset_ms = 0.0;
        self.trailing_error_ms = 0.0;
        self.latency_window.clear();
        self.latency_window.resize(LATENCY_WINDOW_LEN, 0.0);
    }

    pub fn record_hit(&mut self, offset_ms: f64, latency_ms: f64) {
        self.last_offset_ms = offset_ms;
        self.trailing_error_ms =
            TRAILING_ERROR_GAIN * offset_ms.abs() + (1.0 - TRAILING_ERROR_GAIN) * self.trailing_error_ms;

        self.latency_window.push_back(latency_ms);
        while self.latency_window.len() > LATENCY_WINDOW_LEN {
            self.latency_window.pop_front();
        }
    }

    pub fn last_offset_ms(&self) -> f64 {
        self.last_offset_ms
    }

    pub fn trailing_error_ms(&self) -> f64 {
        self.trailing_error_ms
    }

    /// Floored mean of the latency window. The player doesn't care about
    /// sub-millisecond precision.
    pub fn average_latency_ms(&self) -> i64 {
        if self.latency_window.is_empty() {
            return 0;
        }
        let sum: f64 = self.latency_window.iter().sum();
        (sum / self.latency_window.len() as f64).floor() as i64
    }
}

impl Default for TimingStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_seeded_with_zeros() {
        let stats = TimingStats::new();
        assert_eq!(stats.trailing_error_ms(), 0.0);
        assert_eq!(stats.average_latency_ms(), 0);
    }

    #[test]
    fn trailing_error_is_ewma_of_absolute_offset() {
        let mut stats = TimingStats::new();
        stats.record_hit(-100.0, 100.0);
        assert_eq!(stats.trailing_error_ms(), 5.0);
        stats.record_hit(100.0, 650.0);
        assert_eq!(stats.trailing_error_ms(), 0.05 * 100.0 + 0.95 * 5.0);
    }

    #[test]
    fn last_offset_tracks_most_recent_hit() {
        let mut stats = TimingStats::new();
        stats.record_hit(-40.0, 40.0);
        stats.record_hit(25.0, 725.0);
        assert_eq!(stats.last_offset_ms(), 25.0);
    }

    #[test]
    fn average_latency_uses_floor() {
        let mut stats = TimingStats::new();
        // window: nine seeded zeros + 105 -> mean 10.5 -> 10
        stats.record_hit(-105.0, 105.0);
        assert_eq!(stats.average_latency_ms(), 10);
    }

    #[test]
    fn latency_window_is_bounded_fifo() {
        let mut stats = TimingStats::new();
        // eleven hits of 20 ms flush every seeded zero
        for _ in 0..11 {
            stats.record_hit(-20.0, 20.0);
        }
        assert_eq!(stats.average_latency_ms(), 20);

        // the next push evicts the oldest 20
        stats.record_hit(-30.0, 30.0);
        // window: nine 20s + one 30 -> mean 21.0
        assert_eq!(stats.average_latency_ms(), 21);
    }

    #[test]
    fn reseed_clears_previous_session() {
        let mut stats = TimingStats::new();
        for _ in 0..10 {
            stats.record_hit(80.0, 400.0);
        }
        assert!(stats.trailing_error_ms() > 0.0);

        stats.reseed();
        assert_eq!(stats.trailing_error_ms(), 0.0);
        assert_eq!(stats.last_offset_ms(), 0.0);
        assert_eq!(stats.average_latency_ms(), 0);
    }
}
