pub mod surface;
pub mod widgets;

use crate::carousel::{CarouselState, Phase};
use crate::deck::Slide;

/// What the user asked the surface to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    Advance,
    Retreat,
    Dismiss,
}

/// Visual styling of the slide body for a given phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStyle {
    pub opacity: f32,
    /// Downward offset in points.
    pub offset_y: f32,
}

impl FadeStyle {
    pub const RECEDING: Self = Self {
        opacity: 0.0,
        offset_y: 8.0,
    };
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
    };

    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::FadingOut => Self::RECEDING,
            Phase::FadingIn | Phase::Idle => Self::SETTLED,
        }
    }
}

/// Everything the surface draws, derived from carousel state and slides.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView<'a> {
    /// `None` only when the deck is empty.
    pub slide: Option<&'a Slide>,
    /// One entry per slide; `true` marks the active one.
    pub indicators: Vec<bool>,
    /// Cleared exactly while a transition runs. With fewer than two slides
    /// the triggers stay enabled but the engine ignores them.
    pub navigation_enabled: bool,
    pub style: FadeStyle,
    /// Which opening of the overlay this view belongs to. Eased values are
    /// keyed on it so a reopened card does not resume a stale fade.
    pub opening: u64,
}

impl<'a> SurfaceView<'a> {
    pub fn derive(state: CarouselState, slides: &'a [Slide]) -> Self {
        let active = state.index();
        Self {
            slide: slides.get(active),
            indicators: (0..slides.len()).map(|i| i == active).collect(),
            navigation_enabled: !state.in_transition(),
            style: FadeStyle::for_phase(state.phase()),
            opening: 0,
        }
    }

    pub fn in_opening(self, opening: u64) -> Self {
        Self { opening, ..self }
    }
}
