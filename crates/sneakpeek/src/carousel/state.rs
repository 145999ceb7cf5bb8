/// Visual sub-state of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Current slide is receding; the index has not changed yet.
    FadingOut,
    /// New slide is entering.
    FadingIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Index and phase of the carousel as a plain value.
///
/// Every transition is a pure function returning the next value, so the
/// machine can be exercised without timers or a UI. The transition guard is
/// derived from the phase rather than stored next to it, which keeps
/// "in transition iff not idle" true for every reachable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    index: usize,
    phase: Phase,
}

impl CarouselState {
    pub const INITIAL: Self = Self {
        index: 0,
        phase: Phase::Idle,
    };

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_transition(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Where a navigation request would land, or `None` when it must be ignored.
    pub fn target(&self, direction: Direction, len: usize) -> Option<usize> {
        if self.in_transition() || len <= 1 {
            return None;
        }
        let index = self.index.min(len - 1);
        Some(match direction {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        })
    }

    /// Idle -> FadingOut. Any other phase is left untouched.
    pub fn begin(self) -> Self {
        match self.phase {
            Phase::Idle => Self {
                phase: Phase::FadingOut,
                ..self
            },
            _ => self,
        }
    }

    /// FadingOut -> FadingIn, moving to `target` (clamped to `len`).
    pub fn swap(self, target: usize, len: usize) -> Self {
        match self.phase {
            Phase::FadingOut => Self {
                index: clamp_index(target, len),
                phase: Phase::FadingIn,
            },
            _ => self,
        }
    }

    /// FadingIn -> Idle.
    pub fn settle(self) -> Self {
        match self.phase {
            Phase::FadingIn => Self {
                phase: Phase::Idle,
                ..self
            },
            _ => self,
        }
    }

    /// Keep the index valid after the slide sequence changed length.
    pub fn clamped(self, len: usize) -> Self {
        Self {
            index: clamp_index(self.index, len),
            ..self
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle_at_zero() {
        let state = CarouselState::default();
        assert_eq!(state, CarouselState::INITIAL);
        assert_eq!(state.index(), 0);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.in_transition());
    }

    #[test]
    fn test_target_wraps_both_ways() {
        let first = CarouselState::INITIAL;
        assert_eq!(first.target(Direction::Forward, 3), Some(1));
        assert_eq!(first.target(Direction::Backward, 3), Some(2));

        let last = CarouselState::INITIAL.begin().swap(2, 3).settle();
        assert_eq!(last.target(Direction::Forward, 3), Some(0));
        assert_eq!(last.target(Direction::Backward, 3), Some(1));
    }

    #[test]
    fn test_target_ignored_for_short_sequences() {
        let state = CarouselState::INITIAL;
        assert_eq!(state.target(Direction::Forward, 0), None);
        assert_eq!(state.target(Direction::Forward, 1), None);
        assert_eq!(state.target(Direction::Backward, 1), None);
    }

    #[test]
    fn test_target_ignored_while_transitioning() {
        let out = CarouselState::INITIAL.begin();
        assert_eq!(out.target(Direction::Forward, 5), None);
        let incoming = out.swap(1, 5);
        assert_eq!(incoming.target(Direction::Backward, 5), None);
    }

    #[test]
    fn test_full_cycle_moves_index_only_on_swap() {
        let out = CarouselState::INITIAL.begin();
        assert_eq!(out.phase(), Phase::FadingOut);
        assert_eq!(out.index(), 0);
        assert!(out.in_transition());

        let incoming = out.swap(1, 3);
        assert_eq!(incoming.phase(), Phase::FadingIn);
        assert_eq!(incoming.index(), 1);

        let idle = incoming.settle();
        assert_eq!(idle.phase(), Phase::Idle);
        assert_eq!(idle.index(), 1);
        assert!(!idle.in_transition());
    }

    #[test]
    fn test_out_of_order_steps_are_ignored() {
        let idle = CarouselState::INITIAL;
        assert_eq!(idle.swap(2, 3), idle);
        assert_eq!(idle.settle(), idle);

        let out = idle.begin();
        assert_eq!(out.begin(), out);
        assert_eq!(out.settle(), out);
    }

    #[test]
    fn test_swap_clamps_stale_target() {
        let state = CarouselState::INITIAL.begin().swap(7, 3);
        assert_eq!(state.index(), 2);
        let empty = CarouselState::INITIAL.begin().swap(4, 0);
        assert_eq!(empty.index(), 0);
    }

    #[test]
    fn test_clamped_keeps_phase() {
        let state = CarouselState::INITIAL.begin().swap(4, 5);
        let shrunk = state.clamped(2);
        assert_eq!(shrunk.index(), 1);
        assert_eq!(shrunk.phase(), Phase::FadingIn);
        assert_eq!(state.clamped(0).index(), 0);
    }
}
