// src/modules/rows.rs
//
// The labeling rows: start, end, class selector, CUT and GO per row.
// Times that do not parse are tinted red so bad input is visible before CUT.

use super::ClipperModule;
use clipper_core::commands::ClipperCommand;
use clipper_core::helpers::time::parse_hms;
use clipper_core::state::LabelingRow;
use clipper_core::{ClassList, Session};
use crate::theme::{row_fill, DARK_TEXT_DIM, INVALID_TIME};
use egui::{Ui, RichText, TextEdit, Color32};

const TIME_FIELD_W: f32 = 72.0;

pub struct RowsModule;

fn time_color(text: &str) -> Option<Color32> {
    (!text.is_empty() && parse_hms(text).is_none()).then_some(INVALID_TIME)
}

fn time_field(ui: &mut Ui, salt: (&str, u64), text: &str, hint: &str) -> Option<String> {
    let mut buf = text.to_string();
    let mut edit = TextEdit::singleline(&mut buf)
        .id_salt(salt)
        .desired_width(TIME_FIELD_W)
        .font(egui::TextStyle::Monospace)
        .hint_text(hint);
    if let Some(c) = time_color(text) {
        edit = edit.text_color(c);
    }
    ui.add(edit).changed().then_some(buf)
}

impl RowsModule {
    fn row_ui(ui: &mut Ui, index: usize, row: &LabelingRow, classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        egui::Frame::new()
            .fill(row_fill(index))
            .corner_radius(3.0)
            .inner_margin(egui::Margin::symmetric(6, 3))
            .show(ui, |ui| Self::row_contents(ui, row, classes, cmd));
    }

    fn row_contents(ui: &mut Ui, row: &LabelingRow, classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        ui.horizontal(|ui| {
            if let Some(text) = time_field(ui, ("start", row.id), &row.start, "HH:MM:SS") {
                cmd.push(ClipperCommand::EditStart { row: row.id, text });
            }
            if let Some(text) = time_field(ui, ("end", row.id), &row.end, "HH:MM:SS") {
                cmd.push(ClipperCommand::EditEnd { row: row.id, text });
            }

            ui.label("Class:");
            let mut class = row.class;
            egui::ComboBox::from_id_salt(("class", row.id))
                .selected_text(classes.get(class).unwrap_or("?"))
                .show_ui(ui, |ui| {
                    for (i, label) in classes.labels().iter().enumerate() {
                        ui.selectable_value(&mut class, i, label.as_str());
                    }
                });
            if class != row.class {
                cmd.push(ClipperCommand::SelectClass { row: row.id, class });
            }

            if ui.button("CUT").clicked() {
                cmd.push(ClipperCommand::Cut(row.id));
            }
            if ui.button("GO").on_hover_text("Seek to start").clicked() {
                cmd.push(ClipperCommand::GoTo(row.id));
            }
        });
    }
}

impl ClipperModule for RowsModule {
    fn name(&self) -> &str { "Rows" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if session.rows.is_empty() {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("Press A to mark an in point")
                            .size(11.0).color(DARK_TEXT_DIM));
                    });
                    return;
                }
                for (index, row) in session.rows.iter().enumerate() {
                    Self::row_ui(ui, index, row, classes, cmd);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bad_non_empty_times_are_flagged() {
        assert_eq!(time_color(""), None);
        assert_eq!(time_color("00:00:05"), None);
        assert_eq!(time_color("0:5"), Some(INVALID_TIME));
    }
}
