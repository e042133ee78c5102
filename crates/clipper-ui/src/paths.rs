// src/paths.rs
// Single source of truth for where the clipper reads and writes.
// Everything is relative to the working directory the app was started in.

use std::ffi::OsString;
use std::path::PathBuf;

use clipper_core::classes::CLASS_LIST_FILE;
use clipper_core::export::OutputLayout;

/// Environment variable naming the ffmpeg executable used for trimming.
pub const FFMPEG_ENV: &str = "FFMPEG_PATH";

pub struct ClipperConfig {
    pub classes_path: PathBuf,
    pub layout:       OutputLayout,
    pub ffmpeg:       PathBuf,
}

impl ClipperConfig {
    pub fn from_env() -> Self {
        Self {
            classes_path: PathBuf::from(CLASS_LIST_FILE),
            layout:       OutputLayout::default(),
            ffmpeg:       ffmpeg_bin(std::env::var_os(FFMPEG_ENV)),
        }
    }
}

/// `$FFMPEG_PATH` when set and non-empty, otherwise `ffmpeg` from `PATH`.
pub fn ffmpeg_bin(from_env: Option<OsString>) -> PathBuf {
    match from_env {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => {
            #[cfg(target_os = "windows")]
            let name = "ffmpeg.exe";
            #[cfg(not(target_os = "windows"))]
            let name = "ffmpeg";
            PathBuf::from(name)
        }
    }
}
