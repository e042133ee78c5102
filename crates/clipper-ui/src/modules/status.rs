// src/modules/status.rs
//
// The status banner: the one place action results and errors are shown.

use super::ClipperModule;
use clipper_core::commands::ClipperCommand;
use clipper_core::{ClassList, Session};
use crate::theme::{status_style, BANNER_BG};
use egui::{Ui, RichText};

pub struct StatusModule;

impl ClipperModule for StatusModule {
    fn name(&self) -> &str { "Status" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        let Some(status) = &session.status else { return };
        let (icon, color) = status_style(status.level);

        egui::Frame::new()
            .fill(BANNER_BG)
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::symmetric(8, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icon).color(color).strong());
                    ui.add(egui::Label::new(RichText::new(&status.message).color(color)).wrap());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                            cmd.push(ClipperCommand::DismissStatus);
                        }
                    });
                });
            });
    }
}
