use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::DrumConfig;
use crate::game::{BeatClock, POLL_INTERVAL_MS, SCOREBOARD_RESET_DELAY_MS, SessionState};
use crate::traits::{
    BeatOutcome, CueSink, ManualScheduler, MockTimeProvider, ScoreboardScreen, ScoreboardSink,
    TimeProvider,
};

// Backstop for a scripted player good enough to never lose.
const MAX_POLL_STEPS: u32 = 2_000_000;

pub struct DemoOptions {
    pub config: DrumConfig,
    /// RNG seed for the scripted player's hit jitter.
    pub seed: u64,
    /// Leave every nth beat unclicked; 0 plays every beat.
    pub skip_every: u32,
}

/// Scoreboard host that prints structured screens to stdout.
struct StdoutScoreboard;

impl ScoreboardSink for StdoutScoreboard {
    fn render(&mut self, screen: &ScoreboardScreen) {
        match screen {
            ScoreboardScreen::Greeting {
                easy_mode,
                high_score,
            } => {
                println!("== BeatMatcher 5000 ==");
                if *easy_mode {
                    println!("Easy mode!");
                }
                println!("High score: {high_score}");
                println!("Hit the drum to start!");
            }
            ScoreboardScreen::BeatProgress {
                outcome,
                fields,
                flavor,
                ..
            } => {
                let tag = match outcome {
                    BeatOutcome::Matched => "match",
                    BeatOutcome::Missed => "miss",
                    BeatOutcome::Unclicked => "unclicked",
                };
                match flavor {
                    Some(line) => println!("[{tag}] {line}"),
                    None => println!("[{tag}]"),
                }
                println!(
                    "  played {} matched {} missed {} | last offset {:+.0} ms | avg error {:.1} ms | avg latency {} ms",
                    fields.beats_played,
                    fields.beats_matched,
                    fields.beats_missed,
                    fields.last_offset_ms,
                    fields.average_error_ms,
                    fields.average_latency_ms,
                );
            }
            ScoreboardScreen::GameOver {
                new_high_score,
                high_score,
                fields,
                ..
            } => {
                println!("== GAME OVER ==");
                if *new_high_score {
                    println!("New high score!: {} matches!!!", fields.beats_matched);
                } else {
                    println!("High score: {high_score} matches");
                }
                println!(
                    "  last offset {:+.0} ms | avg error {:.1} ms",
                    fields.last_offset_ms, fields.average_error_ms,
                );
            }
        }
    }
}

/// Cue host that counts fired beats so the scripted player can react.
#[derive(Clone, Default)]
struct BeatPulse {
    beats: Rc<Cell<u32>>,
}

impl CueSink for BeatPulse {
    fn on_beat_fired(&mut self) {
        self.beats.set(self.beats.get() + 1);
    }
}

/// Run one scripted session against a simulated host clock.
///
/// The host loop advances a mock clock in poll-interval steps, delivers the
/// recurring tick, and plays each beat with random jitter, leaving every
/// nth beat unclicked until the miss limit ends the session.
pub fn run_demo(options: DemoOptions) -> Result<()> {
    let time = Rc::new(MockTimeProvider::new());
    let scheduler = ManualScheduler::new();
    let pulse = BeatPulse::default();
    let beats = pulse.beats.clone();
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut clock = BeatClock::new(
        options.config,
        time.clone(),
        Box::new(scheduler.clone()),
        Box::new(StdoutScoreboard),
        Box::new(pulse),
    )?;

    // the starting hit
    clock.on_hit();

    let mut seen_beats = 0u32;
    let mut pending_hit: Option<i64> = None;

    let mut steps = 0u32;
    while clock.state() == SessionState::Running && steps < MAX_POLL_STEPS {
        steps += 1;
        time.advance(POLL_INTERVAL_MS as i64);
        clock.on_poll_tick();

        if beats.get() > seen_beats {
            seen_beats = beats.get();
            let skip = options.skip_every > 0 && seen_beats % options.skip_every == 0;
            if !skip {
                let jitter: i64 = rng.gen_range(10..=220);
                pending_hit = Some(time.now_ms() + jitter);
            }
        }

        if let Some(due) = pending_hit {
            if time.now_ms() >= due {
                clock.on_hit();
                pending_hit = None;
            }
        }
    }

    let matched = clock.match_count();
    let missed = clock.miss_count();
    let high_score = clock.high_score();
    info!(matched, missed, high_score, "session complete");

    // let the game-over screen run out, then restore the greeting
    time.advance(SCOREBOARD_RESET_DELAY_MS as i64);
    clock.on_reset_tick();

    Ok(())
}
