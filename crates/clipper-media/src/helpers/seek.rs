// crates/clipper-media/src/helpers/seek.rs
//
// Seek helper wrapping avformat seek with soft-fail behaviour.
//
// Every decoder open seeks through here. On some containers (and on Windows
// with max_ts=0 on a fresh context) avformat_seek_file returns EPERM; the
// caller then decodes from wherever the demuxer is and its PTS filter drops
// the pre-roll.

use ffmpeg_the_third as ffmpeg;

/// Seek `ictx` to the keyframe at or before `target_secs`.
///
/// Returns `false` when the seek failed. Seeking to 0 is skipped: the demuxer
/// already starts there.
pub fn seek_to_secs(
    ictx:        &mut ffmpeg::format::context::Input,
    target_secs: f64,
    label:       &str,
) -> bool {
    if target_secs <= 0.0 {
        return true;
    }

    let seek_ts = (target_secs * ffmpeg::ffi::AV_TIME_BASE as f64) as i64;
    match ictx.seek(seek_ts, ..=seek_ts) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("[seek] soft-fail in {label} at {target_secs:.3}s: {e}");
            false
        }
    }
}
