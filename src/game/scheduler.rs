/// Poll interval for the beat clock, deliberately much finer than any
/// playable beat period. Host timers with millisecond granularity and
/// variable firing latency make a single long-period timer unreliable for
/// rhythm timing; polling frequently and re-deriving the next deadline from
/// the actual firing time bounds cumulative error to at most one poll
/// interval per beat.
pub const POLL_INTERVAL_MS: u64 = 5;

/// Self-correcting beat deadline tracker.
///
/// `next_beat_due_at` advances from the actual firing instant, never from
/// the stale due time, so poll jitter does not accumulate across beats. The
/// trade-off is that beats are not phase-locked to wall-clock boundaries.
#[derive(Debug, Clone, Copy)]
pub struct BeatPacer {
    beat_period_ms: f64,
    next_beat_due_at: f64,
}

impl BeatPacer {
    pub fn new(beat_period_ms: f64) -> Self {
        Self {
            beat_period_ms,
            next_beat_due_at: 0.0,
        }
    }

    /// Set the first deadline, one period from now.
    pub fn arm(&mut self, now_ms: i64) {
        self.next_beat_due_at = now_ms as f64 + self.beat_period_ms;
    }

    /// Check whether the beat is due. On a fired beat the next deadline is
    /// recomputed from `now_ms` immediately.
    pub fn try_fire(&mut self, now_ms: i64) -> bool {
        if (now_ms as f64) < self.next_beat_due_at {
            return false;
        }
        self.arm(now_ms);
        true
    }

    pub fn beat_period_ms(&self) -> f64 {
        self.beat_period_ms
    }

    /// Change the period. Takes effect when the next deadline is armed.
    pub fn set_period(&mut self, beat_period_ms: f64) {
        self.beat_period_ms = beat_period_ms;
    }

    pub fn next_beat_due_at(&self) -> f64 {
        self.next_beat_due_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_deadline() {
        let mut pacer = BeatPacer::new(750.0);
        pacer.arm(0);
        assert!(!pacer.try_fire(749));
        assert!(pacer.try_fire(750));
    }

    #[test]
    fn deadlines_advance_by_exactly_one_period() {
        let mut pacer = BeatPacer::new(750.0);
        pacer.arm(1_000);
        assert_eq!(pacer.next_beat_due_at(), 1_750.0);

        assert!(pacer.try_fire(1_750));
        assert_eq!(pacer.next_beat_due_at(), 2_500.0);

        assert!(pacer.try_fire(2_500));
        assert_eq!(pacer.next_beat_due_at(), 3_250.0);
    }

    #[test]
    fn late_poll_rearms_from_actual_fire_time() {
        let mut pacer = BeatPacer::new(750.0);
        pacer.arm(0);

        // poll arrives 20 ms late; the next deadline is measured from the
        // firing instant, not from the missed one
        assert!(pacer.try_fire(770));
        assert_eq!(pacer.next_beat_due_at(), 1_520.0);
    }

    #[test]
    fn fire_consumes_the_deadline() {
        let mut pacer = BeatPacer::new(750.0);
        pacer.arm(0);
        assert!(pacer.try_fire(750));
        // immediately polling again must not double-fire
        assert!(!pacer.try_fire(751));
    }

    #[test]
    fn period_change_applies_to_next_deadline() {
        let mut pacer = BeatPacer::new(750.0);
        pacer.arm(0);
        pacer.set_period(500.0);
        assert!(pacer.try_fire(750));
        assert_eq!(pacer.next_beat_due_at(), 1_250.0);
    }
}
