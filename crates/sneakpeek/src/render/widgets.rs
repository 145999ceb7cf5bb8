//! Presentational primitives the surface is built from.
//!
//! The surface only needs "a short label" and "a clickable trigger that may be
//! disabled and carries an icon". Those capabilities are traits so the layout
//! code never reaches for concrete widget types.

use eframe::egui;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Previous,
    Next,
    Dismiss,
}

impl Glyph {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Previous => "\u{2B05}",
            Self::Next => "\u{27A1}",
            Self::Dismiss => "\u{1F5D9}",
        }
    }

    pub fn hover_text(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::Dismiss => "Close",
        }
    }
}

pub trait Badge {
    fn badge(&mut self, ui: &mut egui::Ui, label: &str);
}

pub trait Trigger {
    /// Returns true when the trigger was clicked this frame.
    fn trigger(&mut self, ui: &mut egui::Ui, glyph: Glyph, enabled: bool) -> bool;
}

/// Badge and trigger drawn with plain egui widgets in the current theme.
pub struct ThemedWidgets<'a> {
    pub theme: &'a Theme,
}

impl Badge for ThemedWidgets<'_> {
    fn badge(&mut self, ui: &mut egui::Ui, label: &str) {
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, self.theme.card_border))
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::symmetric(10, 3))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(12.0)
                        .color(self.theme.foreground),
                );
            });
    }
}

impl Trigger for ThemedWidgets<'_> {
    fn trigger(&mut self, ui: &mut egui::Ui, glyph: Glyph, enabled: bool) -> bool {
        let button = egui::Button::new(
            egui::RichText::new(glyph.symbol())
                .size(16.0)
                .color(self.theme.foreground),
        )
        .frame(false)
        .min_size(egui::vec2(44.0, 44.0));
        ui.add_enabled(enabled, button)
            .on_hover_text(glyph.hover_text())
            .clicked()
    }
}
