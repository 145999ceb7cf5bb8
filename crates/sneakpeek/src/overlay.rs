use std::time::Instant;

use crate::carousel::TransitionEngine;
use crate::deck::Slide;
use crate::render::{SurfaceAction, SurfaceView};

/// Owns the visibility decision for the carousel.
///
/// The open flag belongs to the host; the controller follows it through
/// [`OverlayController::sync`]. While closed there is no engine at all, so
/// every open starts from a fresh one on the first slide.
pub struct OverlayController {
    slides: Vec<Slide>,
    on_close: Box<dyn FnMut()>,
    engine: Option<TransitionEngine>,
    openings: u64,
}

impl std::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("slides", &self.slides.len())
            .field("engine", &self.engine)
            .field("openings", &self.openings)
            .finish_non_exhaustive()
    }
}

impl OverlayController {
    pub fn new(slides: Vec<Slide>, on_close: impl FnMut() + 'static) -> Self {
        Self {
            slides,
            on_close: Box::new(on_close),
            engine: None,
            openings: 0,
        }
    }

    /// Follow the host's open flag.
    pub fn sync(&mut self, open: bool) {
        match (self.engine.is_some(), open) {
            (false, true) => {
                self.openings += 1;
                tracing::info!(
                    slides = self.slides.len(),
                    opening = self.openings,
                    "overlay opened"
                );
                self.engine = Some(TransitionEngine::new(self.slides.len()));
            }
            (true, false) => {
                if let Some(mut engine) = self.engine.take() {
                    engine.dispose();
                }
                tracing::info!("overlay closed");
            }
            _ => {}
        }
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Ask the host to close the overlay.
    pub fn request_close(&mut self) {
        (self.on_close)();
    }

    pub fn advance(&mut self, now: Instant) -> bool {
        self.engine.as_mut().is_some_and(|e| e.advance(now))
    }

    pub fn retreat(&mut self, now: Instant) -> bool {
        self.engine.as_mut().is_some_and(|e| e.retreat(now))
    }

    pub fn handle(&mut self, action: SurfaceAction, now: Instant) {
        match action {
            SurfaceAction::Advance => {
                self.advance(now);
            }
            SurfaceAction::Retreat => {
                self.retreat(now);
            }
            SurfaceAction::Dismiss => self.request_close(),
        }
    }

    /// Run due transition steps. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.as_mut().is_some_and(|e| e.tick(now))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine.as_ref().and_then(TransitionEngine::next_deadline)
    }

    /// Replace the slides, keeping the current position when it is still valid.
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(slides.len());
        }
        self.slides = slides;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn engine(&self) -> Option<&TransitionEngine> {
        self.engine.as_ref()
    }

    /// What to draw this frame, or `None` while closed.
    pub fn view(&self) -> Option<SurfaceView<'_>> {
        self.engine.as_ref().map(|engine| {
            SurfaceView::derive(engine.state(), &self.slides).in_opening(self.openings)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselState, Phase};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide {
                status: "Live".into(),
                title: format!("slide {i}"),
                summary: String::new(),
                insight: String::new(),
                tags: Vec::new(),
            })
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// A host flag wired up the way the app does it.
    fn controller(n: usize) -> (OverlayController, Rc<Cell<bool>>) {
        let open = Rc::new(Cell::new(false));
        let flag = Rc::clone(&open);
        let overlay = OverlayController::new(slides(n), move || flag.set(false));
        (overlay, open)
    }

    #[test]
    fn test_closed_overlay_has_nothing_to_draw() {
        let (mut overlay, _) = controller(3);
        assert!(!overlay.is_open());
        assert!(overlay.view().is_none());
        assert!(!overlay.advance(Instant::now()));
        assert_eq!(overlay.next_deadline(), None);
    }

    #[test]
    fn test_open_starts_on_first_slide() {
        let (mut overlay, open) = controller(3);
        open.set(true);
        overlay.sync(open.get());
        let view = overlay.view().unwrap();
        assert_eq!(view.slide.map(|s| s.title.as_str()), Some("slide 0"));
        assert_eq!(overlay.engine().unwrap().state(), CarouselState::INITIAL);
    }

    #[test]
    fn test_reopen_resets_mid_transition() {
        let (mut overlay, open) = controller(4);
        let t0 = Instant::now();
        open.set(true);
        overlay.sync(true);

        overlay.advance(t0);
        overlay.tick(t0 + ms(200));
        overlay.tick(t0 + ms(420));
        overlay.advance(t0 + ms(500));
        assert_eq!(overlay.engine().unwrap().state().phase(), Phase::FadingOut);
        assert_eq!(overlay.engine().unwrap().state().index(), 1);

        overlay.sync(false);
        assert!(!overlay.is_open());
        overlay.sync(true);
        let engine = overlay.engine().unwrap();
        assert_eq!(engine.state(), CarouselState::INITIAL);
        assert_eq!(engine.pending_timers(), 0);

        // The old swap must not land on the new engine.
        overlay.tick(t0 + ms(5000));
        assert_eq!(overlay.engine().unwrap().state().index(), 0);
    }

    #[test]
    fn test_each_open_gets_a_new_view_key() {
        let (mut overlay, _) = controller(3);
        overlay.sync(true);
        let first = overlay.view().unwrap().opening;
        overlay.sync(true);
        assert_eq!(overlay.view().unwrap().opening, first);

        overlay.advance(Instant::now());
        overlay.sync(false);
        overlay.sync(true);
        let view = overlay.view().unwrap();
        assert_ne!(view.opening, first);
        assert_eq!(view.style, crate::render::FadeStyle::SETTLED);
    }

    #[test]
    fn test_sync_is_idempotent_while_open() {
        let (mut overlay, _) = controller(3);
        let t0 = Instant::now();
        overlay.sync(true);
        overlay.advance(t0);
        overlay.tick(t0 + ms(200));
        overlay.sync(true);
        assert_eq!(overlay.engine().unwrap().state().index(), 1);
    }

    #[test]
    fn test_dismiss_invokes_close_callback() {
        let (mut overlay, open) = controller(2);
        open.set(true);
        overlay.sync(open.get());

        overlay.handle(SurfaceAction::Dismiss, Instant::now());
        assert!(!open.get());
        // The controller only unmounts once the host flag comes back.
        assert!(overlay.is_open());
        overlay.sync(open.get());
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_surface_actions_drive_engine() {
        let (mut overlay, _) = controller(3);
        let t0 = Instant::now();
        overlay.sync(true);

        overlay.handle(SurfaceAction::Retreat, t0);
        assert_eq!(overlay.next_deadline(), Some(t0 + ms(200)));
        assert!(overlay.tick(t0 + ms(200)));
        assert!(overlay.tick(t0 + ms(420)));
        assert_eq!(overlay.engine().unwrap().state().index(), 2);

        overlay.handle(SurfaceAction::Advance, t0 + ms(500));
        overlay.tick(t0 + ms(700));
        assert_eq!(overlay.engine().unwrap().state().index(), 0);
    }

    #[test]
    fn test_set_slides_clamps_open_engine() {
        let (mut overlay, _) = controller(5);
        let t0 = Instant::now();
        overlay.sync(true);
        overlay.retreat(t0);
        overlay.tick(t0 + ms(200));
        overlay.tick(t0 + ms(420));
        assert_eq!(overlay.engine().unwrap().state().index(), 4);

        overlay.set_slides(slides(2));
        assert_eq!(overlay.engine().unwrap().state().index(), 1);
        assert_eq!(overlay.slides().len(), 2);
        let view = overlay.view().unwrap();
        assert_eq!(view.slide.map(|s| s.title.as_str()), Some("slide 1"));

        overlay.set_slides(Vec::new());
        let view = overlay.view().unwrap();
        assert!(view.slide.is_none());
        assert!(!overlay.advance(t0 + ms(1000)));
    }

    #[test]
    fn test_set_slides_while_closed_applies_on_open() {
        let (mut overlay, _) = controller(1);
        overlay.set_slides(slides(3));
        overlay.sync(true);
        assert_eq!(overlay.engine().unwrap().slide_count(), 3);
        assert!(overlay.advance(Instant::now()));
    }
}
