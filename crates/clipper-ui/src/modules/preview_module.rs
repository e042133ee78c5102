// src/modules/preview_module.rs
//
// Video surface, seek slider and timestamp label.

use super::ClipperModule;
use clipper_core::commands::ClipperCommand;
use clipper_core::helpers::time::format_ms;
use clipper_core::playback::{PlayAffordance, SLIDER_MAX};
use clipper_core::{ClassList, Session};
use crate::theme::{ACCENT, DARK_BORDER, DARK_TEXT_DIM};
use egui::{Ui, Color32, Sense, Rect, Pos2, Stroke, RichText, Vec2};

const MIN_CANVAS_W: f32 = 640.0;
const MIN_CANVAS_H: f32 = 360.0;
/// Vertical room kept below the canvas for slider, timestamp and counts.
const BELOW_CANVAS_H: f32 = 190.0;

pub struct PreviewModule {
    /// The current video texture, set by app.rs each frame before ui().
    pub current_frame: Option<egui::TextureHandle>,
    /// Length of the loaded media, when the container reports one.
    pub duration_ms:   Option<u64>,
}

impl PreviewModule {
    pub fn new() -> Self { Self { current_frame: None, duration_ms: None } }
}

impl ClipperModule for PreviewModule {
    fn name(&self) -> &str { "Preview" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        // ── Video Canvas ─────────────────────────────────────────────────────
        let ratio = self.current_frame.as_ref()
            .map(|t| { let [w, h] = t.size(); w as f32 / h.max(1) as f32 })
            .unwrap_or(16.0 / 9.0);
        let panel_w = ui.available_width().max(MIN_CANVAS_W);
        let panel_h = (ui.available_height() - BELOW_CANVAS_H).max(MIN_CANVAS_H);

        let (canvas_w, canvas_h) = {
            let h = panel_w / ratio;
            if h <= panel_h { (panel_w, h) } else { (panel_h * ratio, panel_h) }
        };

        let (outer_rect, _) = ui.allocate_exact_size(Vec2::new(panel_w, canvas_h), Sense::hover());
        let canvas  = Rect::from_center_size(outer_rect.center(), Vec2::new(canvas_w, canvas_h));
        let painter = ui.painter();

        let stroke = if session.play_affordance == PlayAffordance::Pause {
            Stroke::new(1.5, ACCENT.gamma_multiply(0.55))
        } else {
            Stroke::new(1.0, DARK_BORDER)
        };
        painter.rect_stroke(canvas.expand(1.0), 4.0, stroke, egui::StrokeKind::Outside);
        painter.rect_filled(canvas, 3.0, Color32::BLACK);

        if let Some(tex) = &self.current_frame {
            painter.image(tex.id(), canvas,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE);
        } else {
            let hint = if session.video.is_some() { "Loading…" } else { "Load a video to start" };
            painter.text(
                canvas.center(),
                egui::Align2::CENTER_CENTER,
                hint,
                egui::FontId::proportional(14.0),
                DARK_TEXT_DIM,
            );
        }

        ui.add_space(6.0);

        // ── Seek Slider ──────────────────────────────────────────────────────
        let mut value = session.display.slider;
        ui.spacing_mut().slider_width = ui.available_width();
        let resp = ui.add_enabled(
            session.video.is_some(),
            egui::Slider::new(&mut value, 0..=SLIDER_MAX).show_value(false),
        );
        if resp.drag_started() {
            cmd.push(ClipperCommand::BeginSeek);
        }
        if resp.changed() {
            cmd.push(ClipperCommand::SeekSlider(value));
        }
        if resp.drag_stopped() {
            cmd.push(ClipperCommand::EndSeek);
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new(&session.display.timestamp).size(18.0).monospace());
            if let Some(total) = self.duration_ms {
                ui.label(RichText::new(format!("/ {}", format_ms(total)))
                    .size(14.0).monospace().color(DARK_TEXT_DIM));
            }
        });
    }
}
