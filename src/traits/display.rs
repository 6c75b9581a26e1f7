/// How the most recent beat was resolved, for the beat-progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatOutcome {
    Matched,
    Missed,
    /// The beat expired with no hit attempted.
    Unclicked,
}

/// Structured values for the scoreboard. The core never formats text;
/// layout and justification belong to the display host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatFields {
    pub beats_played: u32,
    pub beats_matched: u32,
    pub beats_missed: u32,
    /// Signed offset of the last judged hit (negative = early, positive = late).
    pub last_offset_ms: f64,
    /// Trailing average of absolute hit offsets.
    pub average_error_ms: f64,
    /// Floored mean of the recent-latency window.
    pub average_latency_ms: i64,
}

/// One scoreboard screen, consumed exhaustively by the display host.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreboardScreen {
    /// Idle screen inviting the player to start.
    Greeting { easy_mode: bool, high_score: u32 },
    /// Mid-session screen after a beat resolves.
    BeatProgress {
        outcome: BeatOutcome,
        fields: BeatFields,
        /// Random response line for matched/missed beats.
        flavor: Option<&'static str>,
        easy_mode: bool,
    },
    /// End-of-session screen, shown until the reset delay elapses.
    GameOver {
        new_high_score: bool,
        high_score: u32,
        fields: BeatFields,
        easy_mode: bool,
    },
}

/// Display sink owned by the scoreboard host.
pub trait ScoreboardSink {
    fn render(&mut self, screen: &ScoreboardScreen);
}
