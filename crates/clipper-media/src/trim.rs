// crates/clipper-media/src/trim.rs
//
// FfmpegTrimmer: cuts a time range out of a video by running the ffmpeg CLI
// with stream copy. Blocks until ffmpeg exits.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clipper_core::error::ClipperError;
use clipper_core::export::Trimmer;

/// stderr lines kept in a TrimFailed message.
const STDERR_TAIL_LINES: usize = 6;

pub struct FfmpegTrimmer {
    program: PathBuf,
}

impl FfmpegTrimmer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// `-ss` before `-i` seeks the input; `-t` is the span length. All streams
/// are copied without re-encoding.
pub fn trim_args(source: &Path, start_secs: u64, end_secs: u64, dest: &Path) -> Vec<OsString> {
    let duration = end_secs.saturating_sub(start_secs);
    let mut args: Vec<OsString> = Vec::new();
    args.extend(["-hide_banner", "-loglevel", "error", "-y"].map(OsString::from));
    args.push("-ss".into());
    args.push(start_secs.to_string().into());
    args.push("-i".into());
    args.push(source.as_os_str().to_os_string());
    args.push("-t".into());
    args.push(duration.to_string().into());
    args.extend(["-map", "0", "-c", "copy"].map(OsString::from));
    args.push(dest.as_os_str().to_os_string());
    args
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text  = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

impl Trimmer for FfmpegTrimmer {
    fn trim(&self, source: &Path, start_secs: u64, end_secs: u64, dest: &Path)
        -> Result<(), ClipperError>
    {
        let args = trim_args(source, start_secs, end_secs, dest);
        eprintln!(
            "[trim] {} {}s..{}s → {}",
            source.display(), start_secs, end_secs, dest.display(),
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ClipperError::TrimSpawn { program: self.program.clone(), source })?;

        if !output.status.success() {
            let tail = stderr_tail(&output.stderr);
            eprintln!("[trim] ffmpeg exited with {}: {tail}", output.status);
            let msg = if tail.is_empty() { output.status.to_string() } else { tail };
            return Err(ClipperError::TrimFailed(msg));
        }
        Ok(())
    }
}
