// src/helpers/log.rs
//
// Diagnostic trail of a labeling session: startup config, every video
// loaded, every clip cut, and each error that also went to the status
// banner. Lines go to stderr and, with a seconds timestamp, to
// `video-clipper.log` in the OS temp directory, which is the only record
// left on Windows release builds since they run without a console.
//
//   crate::clipper_log!("[app] cut {start}..{end} [{class}] → {}", dest.display());

use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "video-clipper.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Echo to stderr and append to `log_path()`. A log that cannot be written
/// is skipped rather than reported; the banner already shows user errors.
pub fn vlog(msg: &str) {
    eprintln!("{msg}");
    let _ = append_line(&log_path(), msg);
}

fn append_line(path: &Path, msg: &str) -> std::io::Result<()> {
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut f = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "[{ts}] {msg}")
}

#[macro_export]
macro_rules! clipper_log {
    ($($arg:tt)*) => {
        $crate::helpers::log::vlog(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_accumulate_with_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        append_line(&path, "[app] loaded walk.mp4").unwrap();
        append_line(&path, "[app] trim failed: exit 1").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("] [app] loaded walk.mp4"));
        assert!(lines[1].ends_with("trim failed: exit 1"));
    }

    #[test]
    fn unwritable_log_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        assert!(append_line(&dir.path().join("missing/dir/x.log"), "msg").is_err());
    }
}
