// crates/clipper-media/src/lib.rs
//
// The two collaborators behind clipper-core's traits:
//   FfmpegPlayer : implements `Player` with in-process FFmpeg decoding
//   FfmpegTrimmer: implements `Trimmer` by running the ffmpeg CLI
//
// No egui dependency. Frames leave this crate as plain RGBA buffers.

pub mod decode;
pub mod helpers;
pub mod player;
pub mod probe;
pub mod trim;

pub use player::{FfmpegPlayer, VideoFrame};
pub use trim::FfmpegTrimmer;

use ffmpeg_the_third as ffmpeg;

/// Initialise the FFmpeg libraries. Call once before loading any media.
pub fn init() -> anyhow::Result<()> {
    ffmpeg::init()?;
    ffmpeg::util::log::set_level(ffmpeg::util::log::Level::Error);
    Ok(())
}
