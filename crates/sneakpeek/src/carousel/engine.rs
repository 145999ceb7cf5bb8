use std::time::{Duration, Instant};

use super::state::{CarouselState, Direction};
use super::timer::TimerSet;

/// Time the outgoing slide spends receding before the index changes.
pub const FADE_OUT_DELAY: Duration = Duration::from_millis(200);
/// Time the incoming slide spends entering before navigation unlocks again.
pub const FADE_IN_DELAY: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Swap { target: usize },
    Settle,
}

/// Drives [`CarouselState`] through timed fade-out / swap / fade-in cycles.
///
/// Requests that arrive mid-transition are dropped rather than queued. The
/// host calls [`TransitionEngine::tick`] from its event loop; nothing happens
/// between ticks.
#[derive(Debug)]
pub struct TransitionEngine {
    state: CarouselState,
    slide_count: usize,
    timers: TimerSet<Step>,
    disposed: bool,
}

impl TransitionEngine {
    pub fn new(slide_count: usize) -> Self {
        Self {
            state: CarouselState::INITIAL,
            slide_count,
            timers: TimerSet::new(),
            disposed: false,
        }
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Move to the next slide, wrapping from last to first.
    pub fn advance(&mut self, now: Instant) -> bool {
        self.navigate(Direction::Forward, now)
    }

    /// Move to the previous slide, wrapping from first to last.
    pub fn retreat(&mut self, now: Instant) -> bool {
        self.navigate(Direction::Backward, now)
    }

    fn navigate(&mut self, direction: Direction, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        let Some(target) = self.state.target(direction, self.slide_count) else {
            tracing::trace!(?direction, state = ?self.state, "navigation ignored");
            return false;
        };
        tracing::debug!(
            ?direction,
            from = self.state.index(),
            to = target,
            "transition started"
        );
        self.state = self.state.begin();
        self.timers.schedule(now, FADE_OUT_DELAY, Step::Swap { target });
        true
    }

    /// Fire every step that is due at `now`. Returns true if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.state;
        while let Some((_, step)) = self.timers.pop_due(now) {
            match step {
                Step::Swap { target } => {
                    self.state = self.state.swap(target, self.slide_count);
                    // Chained off the firing time, not the nominal deadline,
                    // so a late tick still shows the fade-in.
                    self.timers.schedule(now, FADE_IN_DELAY, Step::Settle);
                }
                Step::Settle => {
                    self.state = self.state.settle();
                    tracing::debug!(index = self.state.index(), "transition settled");
                }
            }
        }
        self.state != before
    }

    /// When the next pending step is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Adopt a new slide count, clamping the current index into range.
    pub fn resize(&mut self, slide_count: usize) {
        self.slide_count = slide_count;
        self.state = self.state.clamped(slide_count);
    }

    /// Cancel all pending steps. The engine ignores every later call.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let cancelled = self.timers.cancel_all();
        self.disposed = true;
        tracing::debug!(cancelled, "transition engine disposed");
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for TransitionEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}
