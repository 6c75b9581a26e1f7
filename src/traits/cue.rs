/// Fire-and-forget notifications for the drum entity host.
///
/// The host uses these to drive colour pulses and sound playback; none of
/// them return a value and the core never waits on them.
pub trait CueSink {
    /// A beat fired.
    fn on_beat_fired(&mut self) {}

    /// A hit was judged a match.
    fn on_match(&mut self) {}

    /// A hit was judged a miss.
    fn on_miss(&mut self) {}

    /// The session ended at the miss limit.
    fn on_game_over(&mut self) {}
}

/// Cue sink that ignores every notification.
pub struct NullCueSink;

impl CueSink for NullCueSink {}
