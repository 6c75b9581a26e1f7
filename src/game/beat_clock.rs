use std::rc::Rc;

use rand::rngs::ThreadRng;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, DrumConfig};
use crate::traits::{
    BeatFields, BeatOutcome, CueSink, ScoreboardScreen, ScoreboardSink, TickHandle, TickScheduler,
    TimeProvider,
};

use super::judge::{HitJudge, HitResult};
use super::messages::{MATCH_RESPONSES, MISS_RESPONSES, pick_response};
use super::scheduler::{BeatPacer, POLL_INTERVAL_MS};
use super::session::{SessionScore, SessionState};
use super::stats::TimingStats;

/// How long the game-over screen stays up before the greeting returns.
pub const SCOREBOARD_RESET_DELAY_MS: u64 = 6000;

/// The drum toy's timing and scoring core.
///
/// One instance exists per drum attachment; all collaborators are injected
/// and all events arrive on the host's single cooperative loop. The host
/// routes its recurring timer to [`BeatClock::on_poll_tick`], its one-shot
/// timer to [`BeatClock::on_reset_tick`], and hit signals (click or
/// controller proximity) to [`BeatClock::on_hit`].
pub struct BeatClock {
    config: DrumConfig,
    time: Rc<dyn TimeProvider>,
    scheduler: Box<dyn TickScheduler>,
    display: Box<dyn ScoreboardSink>,
    cues: Box<dyn CueSink>,

    state: SessionState,
    pacer: BeatPacer,
    judge: HitJudge,
    stats: TimingStats,
    score: SessionScore,

    /// When the current beat actually fired. Judgement measures elapsed
    /// time against this snapshot, never against the pending deadline.
    beat_started_at: i64,
    hit_registered_this_beat: bool,

    poll_handle: Option<TickHandle>,
    reset_handle: Option<TickHandle>,

    rng: ThreadRng,
}

impl BeatClock {
    pub fn new(
        config: DrumConfig,
        time: Rc<dyn TimeProvider>,
        scheduler: Box<dyn TickScheduler>,
        display: Box<dyn ScoreboardSink>,
        cues: Box<dyn CueSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let period = config.beat_period_ms();

        let mut clock = Self {
            pacer: BeatPacer::new(period),
            judge: HitJudge::new(period),
            stats: TimingStats::new(),
            score: SessionScore::new(),
            state: SessionState::Idle,
            beat_started_at: 0,
            hit_registered_this_beat: false,
            poll_handle: None,
            reset_handle: None,
            rng: rand::thread_rng(),
            config,
            time,
            scheduler,
            display,
            cues,
        };
        clock.render_greeting();
        Ok(clock)
    }

    /// A hit signal from the drum host.
    ///
    /// In `Idle` the first hit starts a session; while `Running` it is
    /// judged against the current beat. Anything else is ignored.
    pub fn on_hit(&mut self) {
        let now = self.time.now_ms();
        match self.state {
            SessionState::Idle if self.score.beat_count() == 0 => self.start_session(now),
            SessionState::Running if self.score.beat_count() > 0 => self.judge_hit(now),
            _ => trace!(state = ?self.state, "hit ignored"),
        }
    }

    /// The recurring poll tick. Cheap unless a beat is due.
    pub fn on_poll_tick(&mut self) {
        if self.state != SessionState::Running {
            // stale tick delivered after cancellation
            return;
        }
        let now = self.time.now_ms();
        if !self.pacer.try_fire(now) {
            return;
        }

        // The previous beat just expired; an unattempted beat is a miss.
        if self.score.beat_count() > 0 && !self.hit_registered_this_beat {
            self.score.record_miss();
            debug!(misses = self.score.miss_count(), "beat expired unclicked");
            let screen = self.beat_screen(BeatOutcome::Unclicked, None);
            self.display.render(&screen);
        }

        if self.score.miss_count() >= self.config.effective_miss_limit() {
            self.finish_session();
            return;
        }

        self.score.count_beat();
        self.beat_started_at = now;
        self.hit_registered_this_beat = false;
        self.cues.on_beat_fired();
        trace!(beat = self.score.beat_count(), "beat fired");
    }

    /// The one-shot tick that ends the game-over screen.
    pub fn on_reset_tick(&mut self) {
        if self.state != SessionState::GameOver {
            return;
        }
        self.reset_handle = None;
        self.state = SessionState::Idle;
        self.score.reset();
        self.render_greeting();
    }

    /// Cancel every pending tick. Called on detach; safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.reset_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state = SessionState::Idle;
        self.score.reset();
    }

    /// Change the tempo. The judge window updates immediately; the pacer
    /// picks up the new period at the next armed deadline.
    pub fn set_tempo(&mut self, tempo_bpm: f64) -> Result<(), ConfigError> {
        let period = DrumConfig::validate_tempo(tempo_bpm)?;
        self.config.tempo_bpm = tempo_bpm;
        self.judge.set_period(period);
        self.pacer.set_period(period);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &DrumConfig {
        &self.config
    }

    pub fn beat_count(&self) -> u32 {
        self.score.beat_count()
    }

    pub fn match_count(&self) -> u32 {
        self.score.match_count()
    }

    pub fn miss_count(&self) -> u32 {
        self.score.miss_count()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    fn start_session(&mut self, now: i64) {
        self.score.reset();
        self.stats.reseed();
        self.hit_registered_this_beat = false;
        self.pacer.arm(now);
        self.poll_handle = Some(self.scheduler.schedule_recurring(POLL_INTERVAL_MS));
        self.state = SessionState::Running;
        info!(
            tempo_bpm = self.config.tempo_bpm,
            miss_limit = self.config.effective_miss_limit(),
            "session started"
        );
    }

    fn judge_hit(&mut self, now: i64) {
        let elapsed = (now - self.beat_started_at) as f64;
        let judgement = self.judge.judge(elapsed);

        self.hit_registered_this_beat = true;
        self.stats.record_hit(judgement.offset_ms, judgement.latency_ms);

        let (outcome, responses) = match judgement.result {
            HitResult::Match => {
                self.score.record_match();
                self.cues.on_match();
                (BeatOutcome::Matched, MATCH_RESPONSES)
            }
            HitResult::Miss => {
                self.score.record_miss();
                self.cues.on_miss();
                (BeatOutcome::Missed, MISS_RESPONSES)
            }
        };
        debug!(
            offset_ms = judgement.offset_ms,
            latency_ms = judgement.latency_ms,
            ?outcome,
            "hit judged"
        );

        let flavor = pick_response(&mut self.rng, responses);
        let screen = self.beat_screen(outcome, Some(flavor));
        self.display.render(&screen);
    }

    fn finish_session(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state = SessionState::GameOver;
        self.cues.on_game_over();

        let new_high_score = self.score.finalize();
        info!(
            score = self.score.match_count(),
            high_score = self.score.high_score(),
            new_high_score,
            "game over"
        );

        let screen = ScoreboardScreen::GameOver {
            new_high_score,
            high_score: self.score.high_score(),
            fields: self.fields(),
            easy_mode: self.config.easy_mode,
        };
        self.display.render(&screen);

        self.reset_handle = Some(self.scheduler.schedule_once(SCOREBOARD_RESET_DELAY_MS));
    }

    fn render_greeting(&mut self) {
        let screen = ScoreboardScreen::Greeting {
            easy_mode: self.config.easy_mode,
            high_score: self.score.high_score(),
        };
        self.display.render(&screen);
    }

    fn beat_screen(&self, outcome: BeatOutcome, flavor: Option<&'static str>) -> ScoreboardScreen {
        ScoreboardScreen::BeatProgress {
            outcome,
            fields: self.fields(),
            flavor,
            easy_mode: self.config.easy_mode,
        }
    }

    fn fields(&self) -> BeatFields {
        BeatFields {
            beats_played: self.score.beat_count(),
            beats_matched: self.score.match_count(),
            beats_missed: self.score.miss_count(),
            last_offset_ms: self.stats.last_offset_ms(),
            average_error_ms: self.stats.trailing_error_ms(),
            average_latency_ms: self.stats.average_latency_ms(),
        }
    }
}

impl Drop for BeatClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}
