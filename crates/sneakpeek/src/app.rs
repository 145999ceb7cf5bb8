use eframe::egui;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use crate::config::Config;
use crate::deck::Deck;
use crate::overlay::OverlayController;
use crate::render::surface;
use crate::render::widgets::ThemedWidgets;
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Keyboard intents gathered inside `ctx.input` and applied afterwards.
#[derive(Default)]
struct Intents {
    toggle: bool,
    close: bool,
    advance: bool,
    retreat: bool,
    toggle_theme: bool,
    quit: bool,
}

/// Host page with the carousel overlay on top.
struct SneakPeekApp {
    deck_path: PathBuf,
    title: String,
    overlay: OverlayController,
    /// Host-owned visibility flag; the overlay's close callback clears it.
    open: Rc<Cell<bool>>,
    theme: Theme,
    watcher: Option<DeckWatcher>,
    toast: Option<Toast>,
}

impl SneakPeekApp {
    fn new(
        deck_path: PathBuf,
        deck: Deck,
        theme: Theme,
        start_open: bool,
        watcher: Option<DeckWatcher>,
    ) -> Self {
        let title = deck.display_title(&deck_path);
        let open = Rc::new(Cell::new(start_open));
        let flag = Rc::clone(&open);
        let overlay = OverlayController::new(deck.slides, move || flag.set(false));
        Self {
            deck_path,
            title,
            overlay,
            open,
            theme,
            watcher,
            toast: None,
        }
    }

    fn reload_deck(&mut self) {
        match Deck::load(&self.deck_path) {
            Ok(deck) => {
                let count = deck.slides.len();
                self.title = deck.display_title(&self.deck_path);
                self.overlay.set_slides(deck.slides);
                tracing::info!(slides = count, "deck reloaded");
                self.toast = Some(Toast::new(format!("Reloaded {count} slides")));
            }
            Err(e) => {
                tracing::warn!("keeping previous deck: {e:#}");
                self.toast = Some(Toast::new("Deck has errors, see log".to_string()));
            }
        }
    }

    fn read_intents(ctx: &egui::Context) -> Intents {
        ctx.input(|i| Intents {
            toggle: i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::O),
            close: i.key_pressed(egui::Key::Escape),
            advance: i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::N),
            retreat: i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P),
            toggle_theme: i.key_pressed(egui::Key::D),
            quit: i.key_pressed(egui::Key::Q),
        })
    }

    fn draw_page(&self, ui: &egui::Ui, rect: egui::Rect) {
        let painter = ui.painter();
        painter.text(
            rect.center() - egui::vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            &self.title,
            egui::FontId::proportional(36.0),
            self.theme.page_foreground,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            "Space: open sneak peek   \u{2190}/\u{2192}: navigate   Esc: close   D: theme   Q: quit",
            egui::FontId::proportional(16.0),
            Theme::with_opacity(self.theme.page_foreground, 0.7),
        );
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect) {
        let Some(ref toast) = self.toast else { return };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let background = Theme::with_opacity(self.theme.panel, opacity * 0.9);
        let galley =
            ui.painter()
                .layout_no_wrap(toast.message.clone(), egui::FontId::proportional(16.0), color);
        let padding = 12.0;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 64.0,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0, background);
        ui.painter().galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            color,
        );
        ui.ctx().request_repaint();
    }
}

impl eframe::App for SneakPeekApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if self.watcher.as_ref().is_some_and(DeckWatcher::changed) {
            self.reload_deck();
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let intents = Self::read_intents(ctx);
        if intents.quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if intents.toggle_theme {
            self.theme = self.theme.toggled();
            self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
        }
        if self.overlay.is_open() {
            if intents.toggle || intents.close {
                self.overlay.request_close();
            }
        } else if intents.toggle {
            self.open.set(true);
        }

        self.overlay.sync(self.open.get());
        if intents.advance {
            self.overlay.advance(now);
        }
        if intents.retreat {
            self.overlay.retreat(now);
        }
        self.overlay.tick(now);

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.page).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_page(ui, rect);
                if let Some(view) = self.overlay.view() {
                    let mut widgets = ThemedWidgets { theme: &self.theme };
                    action = surface::show(ui, rect, &view, &self.theme, &mut widgets);
                }
                self.draw_toast(ui, rect);
            });

        if let Some(action) = action {
            self.overlay.handle(action, now);
            self.overlay.sync(self.open.get());
            ctx.request_repaint();
        }

        if let Some(deadline) = self.overlay.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

pub fn run(file: PathBuf, windowed: bool, start_closed: bool) -> anyhow::Result<()> {
    let deck = Deck::load(&file)?;
    if deck.slides.is_empty() {
        tracing::warn!("{} has no slides; the overlay will be empty", file.display());
    }

    let config = Config::load_or_default();
    let theme = Theme::from_name(config.theme());
    let start_open = !start_closed && config.start_open();

    let title = format!(
        "SneakPeek \u{2014} {}",
        file.file_name().unwrap_or_default().to_string_lossy()
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let watcher = match DeckWatcher::new(&file, move || ctx.request_repaint()) {
                Ok(w) => Some(w),
                Err(e) => {
                    tracing::warn!("live reload disabled: {e:#}");
                    None
                }
            };
            Ok(Box::new(SneakPeekApp::new(
                file, deck, theme, start_open, watcher,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
