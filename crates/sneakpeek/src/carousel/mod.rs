//! Slide transition engine: a pure state machine, a set of cancellable
//! deferred steps, and the engine that ties them to wall-clock time.

pub mod engine;
pub mod state;
pub mod timer;

pub use engine::TransitionEngine;
pub use state::{CarouselState, Phase};
