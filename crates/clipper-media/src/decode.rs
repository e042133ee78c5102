// crates/clipper-media/src/decode.rs
//
// LiveDecoder: sequential per-file decoder used by the playback worker.
// Opened at a position, it skips pre-roll frames and then hands out scaled
// RGBA frames one by one until EOF.

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

use crate::helpers::seek::seek_to_secs;

/// Frames wider than this are scaled down for display.
pub const MAX_DISPLAY_WIDTH: u32 = 960;

pub struct DecodedFrame {
    pub timestamp_ms: u64,
    pub width:        u32,
    pub height:       u32,
    pub data:         Vec<u8>, // RGBA, no stride padding
}

pub struct LiveDecoder {
    pub path:       PathBuf,
    ictx:           ffmpeg::format::context::Input,
    decoder:        ffmpeg::decoder::video::Video,
    video_idx:      usize,
    tb_num:         i32,
    tb_den:         i32,
    out_w:          u32,
    out_h:          u32,
    scaler:         SwsContext,
    last_pts:       i64,
    /// Frames with a PTS below this are decoded but not scaled or returned.
    skip_until_pts: i64,
    /// EOF has been sent to the decoder; only buffered frames remain.
    flushed:        bool,
}

impl LiveDecoder {
    /// Open `path` positioned at `start_ms`. The first frame returned by
    /// `next_frame` is the first one at or after `start_ms`.
    pub fn open(path: &Path, start_ms: u64) -> Result<Self> {
        let mut ictx = input(path)?;
        let video_idx = ictx.streams().best(Type::Video)
            .ok_or_else(|| anyhow!("no video stream"))?
            .index();

        let (tb_num, tb_den) = {
            let stream = ictx.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
            let tb = stream.time_base();
            (tb.numerator(), tb.denominator())
        };

        let start_secs = start_ms as f64 / 1000.0;
        seek_to_secs(&mut ictx, start_secs, "live_decoder");

        // Second context for decoder params (avoids borrow conflict with ictx).
        let ictx2   = input(path)?;
        let stream2 = ictx2.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
        let decoder = dec_ctx.decoder().video()?;

        let (out_w, out_h) = display_size(decoder.width(), decoder.height());
        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        )?;

        let skip_until_pts = secs_to_pts(start_secs, tb_num, tb_den);
        Ok(Self {
            path: path.to_path_buf(), ictx, decoder, video_idx,
            tb_num, tb_den, out_w, out_h, scaler,
            last_pts: 0, skip_until_pts, flushed: false,
        })
    }

    /// Decode the next displayable frame, or None at EOF.
    ///
    /// Once the demuxer runs dry the decoder is flushed, so frames held back
    /// for reordering still come out.
    pub fn next_frame(&mut self) -> Option<DecodedFrame> {
        let mut decoded = ffmpeg::util::frame::video::Video::empty();
        loop {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(self.last_pts + 1);
                self.last_pts = pts;
                if pts < self.skip_until_pts { continue; }
                return self.to_rgba(&decoded, pts);
            }
            if self.flushed {
                return None;
            }

            let video_idx = self.video_idx;
            let packet = self.ictx.packets().flatten()
                .find(|(stream, _)| stream.index() == video_idx)
                .map(|(_, packet)| packet);
            match packet {
                Some(packet) => {
                    if let Err(e) = self.decoder.send_packet(&packet) {
                        eprintln!("[decode] packet rejected in {}: {e}", self.path.display());
                    }
                }
                None => {
                    if let Err(e) = self.decoder.send_eof() {
                        eprintln!("[decode] flush failed in {}: {e}", self.path.display());
                    }
                    self.flushed = true;
                }
            }
        }
    }

    fn to_rgba(&mut self, decoded: &ffmpeg::util::frame::video::Video, pts: i64) -> Option<DecodedFrame> {
        let mut out = ffmpeg::util::frame::video::Video::empty();
        if self.scaler.run(decoded, &mut out).is_err() { return None; }
        // Destripe: copy only visible pixels, not stride padding
        let stride    = out.stride(0);
        let raw       = out.data(0);
        let row_bytes = self.out_w as usize * 4;
        let data: Vec<u8> = (0..self.out_h as usize)
            .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
            .copied()
            .collect();
        Some(DecodedFrame {
            timestamp_ms: pts_to_ms(pts, self.tb_num, self.tb_den),
            width:        self.out_w,
            height:       self.out_h,
            data,
        })
    }
}

fn pts_to_ms(pts: i64, tb_num: i32, tb_den: i32) -> u64 {
    let secs = pts as f64 * tb_num as f64 / tb_den.max(1) as f64;
    (secs * 1000.0).max(0.0) as u64
}

fn secs_to_pts(secs: f64, tb_num: i32, tb_den: i32) -> i64 {
    (secs * tb_den as f64 / tb_num.max(1) as f64) as i64
}

/// Output size for a source frame: native below `MAX_DISPLAY_WIDTH`, otherwise
/// scaled to that width with an even height.
pub fn display_size(w: u32, h: u32) -> (u32, u32) {
    if w <= MAX_DISPLAY_WIDTH {
        return (w.max(2), h.max(2));
    }
    let out_h = ((MAX_DISPLAY_WIDTH as f64 * h as f64 / w as f64) as u32).max(2) & !1;
    (MAX_DISPLAY_WIDTH, out_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_frames_keep_native_size() {
        assert_eq!(display_size(640, 480), (640, 480));
    }

    #[test]
    fn large_frames_scale_to_even_height() {
        assert_eq!(display_size(1920, 1080), (960, 540));
        let (_, h) = display_size(1921, 1081);
        assert_eq!(h % 2, 0);
    }

    /// Raw 4:2:0 video in a YUV4MPEG2 container: `frames` flat grey 16x16
    /// frames at 25 fps.
    fn write_y4m(path: &Path, frames: usize) {
        let mut bytes = b"YUV4MPEG2 W16 H16 F25:1 Ip A1:1 C420jpeg\n".to_vec();
        for _ in 0..frames {
            bytes.extend_from_slice(b"FRAME\n");
            bytes.extend(std::iter::repeat(128u8).take(16 * 16 * 3 / 2));
        }
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn decodes_every_frame_then_stays_at_eof() {
        ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.y4m");
        write_y4m(&path, 5);

        let mut dec = LiveDecoder::open(&path, 0).unwrap();
        let mut stamps = Vec::new();
        while let Some(f) = dec.next_frame() {
            assert_eq!((f.width, f.height), (16, 16));
            assert_eq!(f.data.len(), 16 * 16 * 4);
            stamps.push(f.timestamp_ms);
        }
        assert_eq!(stamps.len(), 5);
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        assert!(dec.next_frame().is_none());
    }

    #[test]
    fn open_near_end_still_yields_the_last_frame() {
        ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.y4m");
        write_y4m(&path, 5);

        // Frames start every 40 ms; the last one at 160 ms.
        let mut dec = LiveDecoder::open(&path, 150).unwrap();
        let mut stamps = Vec::new();
        while let Some(f) = dec.next_frame() {
            stamps.push(f.timestamp_ms);
        }
        assert!(!stamps.is_empty() && stamps.len() <= 2, "{stamps:?}");
        assert!(stamps.iter().all(|&ms| ms >= 120), "{stamps:?}");
    }

    #[test]
    fn pts_conversion_uses_time_base() {
        assert_eq!(secs_to_pts(2.0, 1, 90_000), 180_000);
        assert_eq!(secs_to_pts(1.5, 1, 1000), 1500);
        assert_eq!(pts_to_ms(180_000, 1, 90_000), 2_000);
        assert_eq!(pts_to_ms(-5, 1, 1000), 0);
    }
}
