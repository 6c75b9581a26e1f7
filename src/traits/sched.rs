use std::cell::RefCell;
use std::rc::Rc;

/// Opaque identifier for a scheduled tick.
///
/// The host keeps the handle it returned from a `schedule_*` call and uses it
/// to route the firing tick back to the right BeatClock entry point: recurring
/// ticks go to `BeatClock::on_poll_tick`, one-shot ticks to
/// `BeatClock::on_reset_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Host scheduler primitive for deferred callbacks.
///
/// All scheduling in the core goes through this seam so that pending ticks can
/// be tracked by handle and cancelled on session stop and on teardown.
pub trait TickScheduler {
    /// Schedule a repeating tick every `interval_ms` milliseconds.
    fn schedule_recurring(&mut self, interval_ms: u64) -> TickHandle;

    /// Schedule a single tick after `delay_ms` milliseconds.
    fn schedule_once(&mut self, delay_ms: u64) -> TickHandle;

    /// Cancel a previously scheduled tick. Cancelling an already-fired or
    /// already-cancelled handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Recurring { interval_ms: u64 },
    Once { delay_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub handle: TickHandle,
    pub kind: TickKind,
    pub cancelled: bool,
}

/// Scheduler that records requests without owning a timer.
///
/// Used by tests and the demo host: the caller drives the clock itself and
/// only needs the bookkeeping of what the core asked to be scheduled. Clones
/// share state, so a host can hand one clone to the BeatClock and keep
/// another to inspect it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualSchedulerState>>,
}

#[derive(Default)]
struct ManualSchedulerState {
    next_handle: u64,
    ticks: Vec<ScheduledTick>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests seen so far, including cancelled ones.
    pub fn ticks(&self) -> Vec<ScheduledTick> {
        self.inner.borrow().ticks.clone()
    }

    /// The live recurring tick, if any.
    pub fn active_recurring(&self) -> Option<ScheduledTick> {
        self.inner
            .borrow()
            .ticks
            .iter()
            .find(|t| !t.cancelled && matches!(t.kind, TickKind::Recurring { .. }))
            .copied()
    }

    /// The live one-shot tick, if any.
    pub fn active_once(&self) -> Option<ScheduledTick> {
        self.inner
            .borrow()
            .ticks
            .iter()
            .find(|t| !t.cancelled && matches!(t.kind, TickKind::Once { .. }))
            .copied()
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.inner
            .borrow()
            .ticks
            .iter()
            .any(|t| t.handle == handle && !t.cancelled)
    }

    fn push(&mut self, kind: TickKind) -> TickHandle {
        let mut state = self.inner.borrow_mut();
        state.next_handle += 1;
        let handle = TickHandle(state.next_handle);
        state.ticks.push(ScheduledTick {
            handle,
            kind,
            cancelled: false,
        });
        handle
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_recurring(&mut self, interval_ms: u64) -> TickHandle {
        self.push(TickKind::Recurring { interval_ms })
    }

    fn schedule_once(&mut self, delay_ms: u64) -> TickHandle {
        self.push(TickKind::Once { delay_ms })
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut state = self.inner.borrow_mut();
        if let Some(tick) = state.ticks.iter_mut().find(|t| t.handle == handle) {
            tick.cancelled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_recurring(5);
        let b = sched.schedule_once(6000);
        assert_ne!(a, b);
    }

    #[test]
    fn cancel_marks_tick_inactive() {
        let mut sched = ManualScheduler::new();
        let h = sched.schedule_recurring(5);
        assert!(sched.is_active(h));
        sched.cancel(h);
        assert!(!sched.is_active(h));
        assert!(sched.active_recurring().is_none());
    }

    #[test]
    fn cancel_unknown_handle_is_noop() {
        let mut sched = ManualScheduler::new();
        sched.cancel(TickHandle::from_raw(99));
        assert!(sched.ticks().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let mut sched = ManualScheduler::new();
        let view = sched.clone();
        let h = sched.schedule_once(100);
        assert!(view.is_active(h));
    }
}
