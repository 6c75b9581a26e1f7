/// Session lifecycle. `Idle` awaits the starting hit, `Running` means the
/// beat poll is live, `GameOver` holds the end screen until the reset delay
/// returns the toy to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    GameOver,
}

/// Per-session counters plus the high score, which outlives sessions for
/// the lifetime of the component.
#[derive(Debug, Clone, Default)]
pub struct SessionScore {
    beat_count: u32,
    match_count: u32,
    miss_count: u32,
    high_score: u32,
}

impl SessionScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the per-session counters. The high score is left alone.
    pub fn reset(&mut self) {
        self.beat_count = 0;
        self.match_count = 0;
        self.miss_count = 0;
    }

    pub fn count_beat(&mut self) {
        self.beat_count += 1;
    }

    pub fn record_match(&mut self) {
        self.match_count += 1;
    }

    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    /// Compare the session's matches against the high score, updating it on
    /// strict improvement. Returns whether the high score was beaten.
    pub fn finalize(&mut self) -> bool {
        if self.match_count > self.high_score {
            self.high_score = self.match_count;
            true
        } else {
            false
        }
    }

    pub fn beat_count(&self) -> u32 {
        self.beat_count
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn miss_count(&self) -> u32 {
        self.miss_count
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_updates_high_score_on_strict_improvement() {
        let mut score = SessionScore::new();
        for _ in 0..3 {
            score.record_match();
        }
        assert!(score.finalize());
        assert_eq!(score.high_score(), 3);
    }

    #[test]
    fn finalize_never_updates_on_tie() {
        let mut score = SessionScore::new();
        for _ in 0..3 {
            score.record_match();
        }
        assert!(score.finalize());

        score.reset();
        for _ in 0..3 {
            score.record_match();
        }
        assert!(!score.finalize());
        assert_eq!(score.high_score(), 3);
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut score = SessionScore::new();
        score.record_match();
        score.record_miss();
        score.count_beat();
        score.finalize();

        score.reset();
        assert_eq!(score.beat_count(), 0);
        assert_eq!(score.match_count(), 0);
        assert_eq!(score.miss_count(), 0);
        assert_eq!(score.high_score(), 1);
    }
}
