use eframe::egui::{self, RichText};

use super::widgets::{Badge, Glyph, Trigger};
use super::{FadeStyle, SurfaceAction, SurfaceView};
use crate::deck::Slide;
use crate::theme::Theme;

/// How long the body takes to ease between fade styles, in seconds.
const FADE_ANIMATION: f32 = 0.3;
const CARD_MAX_WIDTH: f32 = 896.0;
const TWO_COLUMN_MIN_WIDTH: f32 = 640.0;

/// Draw the overlay (backdrop and card) over `rect`.
pub fn show<W: Badge + Trigger>(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    view: &SurfaceView<'_>,
    theme: &Theme,
    widgets: &mut W,
) -> Option<SurfaceAction> {
    ui.painter().rect_filled(rect, 0.0, theme.backdrop);

    let card_width = (rect.width() - 32.0).clamp(240.0, CARD_MAX_WIDTH);
    let card_height = (rect.height() * 0.9).max(200.0);
    let card_rect =
        egui::Rect::from_center_size(rect.center(), egui::vec2(card_width, card_height));

    let mut action = None;
    ui.scope_builder(egui::UiBuilder::new().max_rect(card_rect), |ui| {
        egui::Frame::new()
            .fill(theme.card)
            .stroke(egui::Stroke::new(1.0, theme.card_border))
            .corner_radius(egui::CornerRadius::same(28))
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(a) = header(ui, view.slide, theme, widgets) {
                        action = Some(a);
                    }
                    if let Some(a) = body(ui, view, theme, widgets) {
                        action = Some(a);
                    }
                });
            });
    });
    action
}

fn header<W: Badge + Trigger>(
    ui: &mut egui::Ui,
    slide: Option<&Slide>,
    theme: &Theme,
    widgets: &mut W,
) -> Option<SurfaceAction> {
    let mut action = None;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        if widgets.trigger(ui, Glyph::Dismiss, true) {
            action = Some(SurfaceAction::Dismiss);
        }
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            widgets.badge(ui, "Sneak peek");
            ui.add_space(12.0);
            let Some(slide) = slide else {
                ui.label(RichText::new("Nothing to preview yet").color(theme.muted));
                return;
            };
            ui.label(
                RichText::new(slide.status.to_uppercase())
                    .size(theme.label_size)
                    .color(theme.muted),
            );
            ui.label(
                RichText::new(&slide.title)
                    .size(theme.title_size)
                    .strong()
                    .color(theme.foreground),
            );
            ui.label(
                RichText::new(&slide.summary)
                    .size(theme.body_size * 0.9)
                    .color(theme.muted),
            );
        });
    });
    action
}

/// Slide body and navigation. Eases toward the phase's fade style.
fn body<W: Badge + Trigger>(
    ui: &mut egui::Ui,
    view: &SurfaceView<'_>,
    theme: &Theme,
    widgets: &mut W,
) -> Option<SurfaceAction> {
    let eased = eased_style(ui.ctx(), view.opening, view.style);

    let mut action = None;
    ui.scope(|ui| {
        ui.multiply_opacity(eased.opacity);
        ui.add_space(24.0 + eased.offset_y);
        if ui.available_width() >= TWO_COLUMN_MIN_WIDTH {
            ui.columns(2, |cols| {
                insight_panel(&mut cols[0], view.slide, theme);
                action = hero_panel(&mut cols[1], view, theme, widgets);
            });
        } else {
            insight_panel(ui, view.slide, theme);
            ui.add_space(20.0);
            action = hero_panel(ui, view, theme, widgets);
        }
    });
    action
}

/// Ease toward `target`. A new `opening` starts fresh at the target.
fn eased_style(ctx: &egui::Context, opening: u64, target: FadeStyle) -> FadeStyle {
    FadeStyle {
        opacity: ctx.animate_value_with_time(
            egui::Id::new(("sneakpeek-body-opacity", opening)),
            target.opacity,
            FADE_ANIMATION,
        ),
        offset_y: ctx.animate_value_with_time(
            egui::Id::new(("sneakpeek-body-offset", opening)),
            target.offset_y,
            FADE_ANIMATION,
        ),
    }
}

fn panel_frame(fill: egui::Color32, theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, theme.card_border))
        .corner_radius(egui::CornerRadius::same(28))
        .inner_margin(egui::Margin::same(20))
}

fn insight_panel(ui: &mut egui::Ui, slide: Option<&Slide>, theme: &Theme) {
    let Some(slide) = slide else { return };
    panel_frame(theme.panel, theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Insight").strong().color(theme.foreground));
        ui.add_space(12.0);
        ui.label(
            RichText::new(&slide.insight)
                .size(theme.body_size)
                .color(theme.foreground),
        );
        if slide.tags.is_empty() {
            return;
        }
        ui.add_space(24.0);
        ui.horizontal_wrapped(|ui| {
            for tag in &slide.tags {
                egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, Theme::with_opacity(theme.muted, 0.4)))
                    .corner_radius(egui::CornerRadius::same(12))
                    .inner_margin(egui::Margin::symmetric(12, 4))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(tag.to_uppercase())
                                .size(theme.label_size * 0.9)
                                .color(theme.muted),
                        );
                    });
            }
        });
    });
}

fn hero_panel<W: Badge + Trigger>(
    ui: &mut egui::Ui,
    view: &SurfaceView<'_>,
    theme: &Theme,
    widgets: &mut W,
) -> Option<SurfaceAction> {
    let mut action = None;
    panel_frame(theme.card, theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        if let Some(slide) = view.slide {
            panel_frame(theme.hero_background, theme).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(&slide.title)
                        .size(theme.title_size * 0.8)
                        .strong()
                        .color(theme.hero_foreground),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&slide.summary)
                        .size(theme.body_size * 0.9)
                        .color(Theme::with_opacity(theme.hero_foreground, 0.7)),
                );
            });
            ui.add_space(16.0);
        }

        ui.horizontal(|ui| {
            if widgets.trigger(ui, Glyph::Previous, view.navigation_enabled) {
                action = Some(SurfaceAction::Retreat);
            }
            if widgets.trigger(ui, Glyph::Next, view.navigation_enabled) {
                action = Some(SurfaceAction::Advance);
            }
            ui.add_space(16.0);
            indicators(ui, &view.indicators, theme);
        });
    });
    action
}

fn indicators(ui: &mut egui::Ui, active: &[bool], theme: &Theme) {
    for &is_active in active {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(24.0, 8.0), egui::Sense::hover());
        let color = if is_active {
            theme.indicator_active
        } else {
            theme.indicator_idle
        };
        ui.painter().rect_filled(rect, 4.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopened_card_starts_settled() {
        let ctx = egui::Context::default();
        assert_eq!(eased_style(&ctx, 1, FadeStyle::RECEDING), FadeStyle::RECEDING);

        // Closed mid fade-out, then opened again on an idle slide.
        assert_eq!(eased_style(&ctx, 2, FadeStyle::SETTLED), FadeStyle::SETTLED);
    }

    #[test]
    fn test_same_opening_eases_between_styles() {
        let ctx = egui::Context::default();
        eased_style(&ctx, 1, FadeStyle::RECEDING);
        let eased = eased_style(&ctx, 1, FadeStyle::SETTLED);
        assert!(eased.opacity < 1.0);
    }
}
