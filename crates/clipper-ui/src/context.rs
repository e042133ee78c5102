// src/context.rs
//
// AppContext owns the runtime handles that are not part of the Session:
//   ├── player   FFmpeg playback engine (clock + decode worker)
//   ├── trimmer  ffmpeg CLI wrapper used by CUT
//   └── frame    GPU texture holding the last displayed video frame

use clipper_core::error::ClipperError;
use clipper_media::{FfmpegPlayer, FfmpegTrimmer, VideoFrame};
use eframe::egui;

pub struct AppContext {
    pub player:  FfmpegPlayer,
    pub trimmer: FfmpegTrimmer,
    pub frame:   Option<egui::TextureHandle>,
}

impl AppContext {
    pub fn new(trimmer: FfmpegTrimmer) -> Self {
        Self { player: FfmpegPlayer::new(), trimmer, frame: None }
    }

    /// Upload the newest due frame and collect any decode-worker failure.
    /// Called once per frame before the UI pass.
    pub fn ingest_frames(&mut self, ctx: &egui::Context) -> Option<ClipperError> {
        if let Some(frame) = self.player.poll_frame() {
            self.upload(ctx, frame);
        }
        self.player.take_error()
    }

    /// Drop the displayed frame (a new file was loaded).
    pub fn clear_frame(&mut self) {
        self.frame = None;
    }

    fn upload(&mut self, ctx: &egui::Context, frame: VideoFrame) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize], &frame.data,
        );
        match &mut self.frame {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.frame = Some(ctx.load_texture("video-frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}
