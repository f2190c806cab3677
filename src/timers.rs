//! Clock-driven timers for debouncing and delayed indicators.
//!
//! Timers never read the clock themselves; callers pass `now` into every
//! transition. This keeps them deterministic under test and lets a UI event
//! loop drive them from its own tick.

use std::time::{Duration, Instant};

/// Lifecycle of a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Never started, or reset
    Idle,
    /// Running until `deadline`
    Pending { deadline: Instant },
    /// Deadline reached and observed by [`Timer::poll`]
    Fired,
    /// Stopped before reaching its deadline
    Cancelled,
}

/// A one-shot timer: idle → pending → fired or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    delay: Duration,
    state: TimerState,
}

impl Timer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: TimerState::Idle,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, TimerState::Pending { .. })
    }

    #[must_use]
    pub const fn has_fired(&self) -> bool {
        matches!(self.state, TimerState::Fired)
    }

    /// Start, or restart, the countdown from `now`.
    pub fn start(&mut self, now: Instant) {
        self.state = TimerState::Pending {
            deadline: now + self.delay,
        };
    }

    /// Advance to `now`. Returns true exactly once, on the poll that
    /// observes the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Pending { deadline } if now >= deadline => {
                self.state = TimerState::Fired;
                true
            }
            _ => false,
        }
    }

    /// Stop a pending countdown. A no-op in every other state.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.state = TimerState::Cancelled;
            tracing::trace!("Timer cancelled");
        }
    }

    /// Return to [`TimerState::Idle`].
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}

/// Coalesces bursts of triggers into one firing `delay` after the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    timer: Timer,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            timer: Timer::new(delay),
        }
    }

    /// Record an event; pushes the deadline out to `now + delay`.
    pub fn trigger(&mut self, now: Instant) {
        self.timer.start(now);
    }

    /// Returns true once the quiet period after the last trigger has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.poll(now)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}

/// Shows a loading indicator only for operations that outlast a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingGate {
    timer: Timer,
    active: bool,
}

impl LoadingGate {
    #[must_use]
    pub const fn new(threshold: Duration) -> Self {
        Self {
            timer: Timer::new(threshold),
            active: false,
        }
    }

    /// Mark the start of an operation. Restarting an active operation keeps
    /// its original start.
    pub fn begin(&mut self, now: Instant) {
        if !self.active {
            self.active = true;
            self.timer.start(now);
        }
    }

    /// Whether the indicator should be shown at `now`.
    pub fn is_visible(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }
        self.timer.poll(now);
        self.timer.has_fired()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the end of the operation; hides the indicator immediately.
    pub fn end(&mut self) {
        self.timer.cancel();
        self.timer.reset();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_timer_lifecycle() {
        let start = Instant::now();
        let mut timer = Timer::new(MS * 100);
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start(start);
        assert!(timer.is_pending());
        assert!(!timer.poll(start + MS * 99));
        assert!(timer.poll(start + MS * 100));
        assert!(timer.has_fired());
        assert!(!timer.poll(start + MS * 200));
    }

    #[test]
    fn test_cancel_is_always_safe() {
        let start = Instant::now();
        let mut timer = Timer::new(MS * 10);
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start(start);
        timer.cancel();
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Cancelled);
        assert!(!timer.poll(start + MS * 50));

        timer.start(start);
        timer.poll(start + MS * 10);
        timer.cancel();
        assert!(timer.has_fired());
    }

    #[test]
    fn test_debouncer_coalesces() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(MS * 150);
        debouncer.trigger(start);
        debouncer.trigger(start + MS * 100);
        debouncer.trigger(start + MS * 200);
        assert!(!debouncer.poll(start + MS * 300));
        assert!(debouncer.poll(start + MS * 350));
        assert!(!debouncer.poll(start + MS * 400));
    }

    #[test]
    fn test_zero_delay_fires_on_next_poll() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.trigger(start);
        assert!(debouncer.poll(start));
    }

    #[test]
    fn test_loading_gate_hides_short_operations() {
        let start = Instant::now();
        let mut gate = LoadingGate::new(MS * 200);
        gate.begin(start);
        assert!(!gate.is_visible(start + MS * 150));
        gate.end();
        assert!(!gate.is_visible(start + MS * 300));
    }

    #[test]
    fn test_loading_gate_shows_long_operations() {
        let start = Instant::now();
        let mut gate = LoadingGate::new(MS * 200);
        gate.begin(start);
        gate.begin(start + MS * 100);
        assert!(gate.is_visible(start + MS * 200));
        assert!(gate.is_visible(start + MS * 500));
        gate.end();
        assert!(!gate.is_visible(start + MS * 501));
        assert!(!gate.is_active());
    }
}
