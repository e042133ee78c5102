// crates/clipper-media/src/probe.rs
//
// In-process FFmpeg probing: confirms the file has a video stream and reads
// its duration.

use std::path::Path;
use anyhow::{anyhow, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::input;
use ffmpeg::media::Type;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaInfo {
    /// None when neither the container nor the video stream report one.
    pub duration_ms: Option<u64>,
}

pub fn probe_media(path: &Path) -> Result<MediaInfo> {
    let ctx = input(path)?;
    let stream = ctx.streams().best(Type::Video)
        .ok_or_else(|| anyhow!("no video stream"))?;

    let dur = ctx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    if dur > 0.0 {
        eprintln!("[media] duration {dur:.2}s ← {}", path.display());
        return Ok(MediaInfo { duration_ms: Some((dur * 1000.0) as u64) });
    }

    // Fall back to stream duration
    let tb = stream.time_base();
    let d  = stream.duration() as f64 * tb.numerator() as f64 / tb.denominator().max(1) as f64;
    if d > 0.0 {
        return Ok(MediaInfo { duration_ms: Some((d * 1000.0) as u64) });
    }

    eprintln!("[media] duration unknown ← {}", path.display());
    Ok(MediaInfo { duration_ms: None })
}
