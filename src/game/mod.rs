mod beat_clock;
mod judge;
mod messages;
mod scheduler;
mod session;
mod stats;

pub use beat_clock::{BeatClock, SCOREBOARD_RESET_DELAY_MS};
pub use judge::{HitJudge, HitJudgement, HitResult};
pub use messages::{MATCH_RESPONSES, MISS_RESPONSES, pick_response};
pub use scheduler::{BeatPacer, POLL_INTERVAL_MS};
pub use session::{SessionScore, SessionState};
pub use stats::{LATENCY_WINDOW_LEN, TimingStats};
