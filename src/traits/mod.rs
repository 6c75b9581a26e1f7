mod cue;
mod display;
mod sched;
mod time;

pub use cue::{CueSink, NullCueSink};
pub use display::{BeatFields, BeatOutcome, ScoreboardScreen, ScoreboardSink};
pub use sched::{ManualScheduler, ScheduledTick, TickHandle, TickKind, TickScheduler};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
