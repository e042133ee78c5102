// src/modules/counts.rs
//
// Class counts, the last saved clip, and the trimmed-clip counter.

use super::ClipperModule;
use clipper_core::commands::ClipperCommand;
use clipper_core::{ClassList, Session};
use crate::helpers::format::{class_count_lines, fit_tail, total_files_label, trimmed_counter_label};
use crate::theme::DARK_TEXT_DIM;
use egui::{Ui, RichText};

const SAVED_LABEL_CHARS: usize = 80;

/// Per-class clip counts and the "saved as" line under the video.
pub struct CountsModule;

impl ClipperModule for CountsModule {
    fn name(&self) -> &str { "Class Counts" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _classes: &ClassList, _cmd: &mut Vec<ClipperCommand>) {
        ui.label(RichText::new(total_files_label(&session.counts)).size(13.0).strong());
        egui::Grid::new("class_counts").num_columns(2).spacing([12.0, 2.0]).show(ui, |ui| {
            for (class, n) in class_count_lines(&session.counts) {
                ui.label(RichText::new(class).strong());
                ui.label(n);
                ui.end_row();
            }
        });

        if let Some(path) = &session.last_saved {
            ui.add_space(4.0);
            let full = path.display().to_string();
            ui.label(RichText::new(format!(
                "Trimmed video saved as: {}", fit_tail(&full, SAVED_LABEL_CHARS),
            )).strong()).on_hover_text(full);
        }
    }
}

/// "Trimmed Clips: N", the session's export counter.
pub struct CounterModule;

impl ClipperModule for CounterModule {
    fn name(&self) -> &str { "Counter" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _classes: &ClassList, _cmd: &mut Vec<ClipperCommand>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(trimmed_counter_label(session.trimmed_count)).size(13.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("{} pending", session.rows.len()))
                    .size(11.0).color(DARK_TEXT_DIM));
            });
        });
    }
}
