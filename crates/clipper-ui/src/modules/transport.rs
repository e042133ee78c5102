// src/modules/transport.rs
//
// Transport row: skip buttons, play/pause, A/B markers, Load Video.

use std::path::PathBuf;

use super::ClipperModule;
use clipper_core::commands::ClipperCommand;
use clipper_core::{ClassList, Session};
use egui::{Ui, RichText};
use rfd::FileDialog;

/// Extensions offered by the open dialog and accepted by drag-and-drop.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv"];

const SKIPS: [(&str, i64); 2] = [("-5", -5_000), ("-2", -2_000)];
const FORWARD_SKIPS: [(&str, i64); 2] = [("+2", 2_000), ("+5", 5_000)];

pub struct TransportModule {
    /// Directory the open dialog starts in. Persisted across runs by app.rs.
    pub last_dir: Option<PathBuf>,
}

impl TransportModule {
    pub fn new(last_dir: Option<PathBuf>) -> Self { Self { last_dir } }
}

pub fn is_video_path(path: &std::path::Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| VIDEO_EXTENSIONS.contains(&e.as_str()))
}

impl ClipperModule for TransportModule {
    fn name(&self) -> &str { "Transport" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _classes: &ClassList, cmd: &mut Vec<ClipperCommand>) {
        ui.horizontal(|ui| {
            for (label, delta) in SKIPS {
                if ui.button(label).clicked() {
                    cmd.push(ClipperCommand::Skip(delta));
                }
            }

            let play = egui::Button::new(RichText::new(session.play_affordance.label()).strong())
                .min_size(egui::vec2(80.0, 0.0));
            if ui.add_enabled(session.video.is_some(), play).clicked() {
                cmd.push(ClipperCommand::TogglePlayback);
            }

            for (label, delta) in FORWARD_SKIPS {
                if ui.button(label).clicked() {
                    cmd.push(ClipperCommand::Skip(delta));
                }
            }

            ui.separator();

            if ui.button("A").on_hover_text("Mark in: new row at the current time").clicked() {
                cmd.push(ClipperCommand::MarkIn);
            }
            if ui.button("B").on_hover_text("Mark out on the last row").clicked() {
                cmd.push(ClipperCommand::MarkOut);
            }

            ui.separator();

            if ui.button("Load Video").clicked() {
                let mut dialog = FileDialog::new()
                    .set_title("Open Video")
                    .add_filter("Video Files", VIDEO_EXTENSIONS);
                if let Some(dir) = &self.last_dir {
                    dialog = dialog.set_directory(dir);
                }
                if let Some(path) = dialog.pick_file() {
                    cmd.push(ClipperCommand::OpenVideo(path));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn only_known_video_extensions_are_accepted() {
        assert!(is_video_path(Path::new("a/b.mp4")));
        assert!(is_video_path(Path::new("clip.MKV")));
        assert!(!is_video_path(Path::new("notes.txt")));
        assert!(!is_video_path(Path::new("noext")));
    }
}
