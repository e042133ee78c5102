// crates/clipper-core/src/export.rs
//
// Where clips land on disk, how the trim utility is reached, and the
// append-only operation log.
//
// Layout:
//   trimmed_clips/<class>/<stem>_<10 random alphanumerics>.mp4
//   trim_operations_log.csv   "start, end, class, source, output" per cut

use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::ClipperError;

pub const OUTPUT_ROOT: &str = "trimmed_clips";
pub const LOG_FILE:    &str = "trim_operations_log.csv";
const SUFFIX_LEN:      usize = 10;

/// Something that can cut `[start_secs, end_secs)` out of `source` into `dest`.
///
/// Runs synchronously; the caller blocks until the file is written or the
/// attempt fails.
pub trait Trimmer {
    fn trim(&self, source: &Path, start_secs: u64, end_secs: u64, dest: &Path)
        -> Result<(), ClipperError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    pub root:     PathBuf,
    pub log_path: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self { root: PathBuf::from(OUTPUT_ROOT), log_path: PathBuf::from(LOG_FILE) }
    }
}

impl OutputLayout {
    /// Root both the clip tree and the log under `base`.
    pub fn under(base: &Path) -> Self {
        Self { root: base.join(OUTPUT_ROOT), log_path: base.join(LOG_FILE) }
    }

    pub fn class_dir(&self, class: &str) -> PathBuf {
        self.root.join(class)
    }

    /// Create the class directory if needed and pick an output path that does
    /// not exist yet.
    pub fn prepare_clip_path(&self, class: &str, source: &Path) -> Result<PathBuf, ClipperError> {
        let dir = self.class_dir(class);
        std::fs::create_dir_all(&dir)
            .map_err(|source| ClipperError::CreateDir { path: dir.clone(), source })?;

        let stem = source_stem(source);
        loop {
            let candidate = dir.join(format!("{stem}_{}.mp4", random_suffix()));
            if !candidate.exists() {
                return Ok(candidate);
            }
        }
    }
}

/// File name up to its first `.`: `match.final.mp4` → `match`.
pub fn source_stem(source: &Path) -> String {
    let name = source_name(source);
    match name.split('.').next() {
        Some(s) if !s.is_empty() => s.to_string(),
        _                        => "clip".to_string(),
    }
}

pub fn source_name(source: &Path) -> String {
    source.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string().chars().take(SUFFIX_LEN).collect()
}

/// One line of the operation log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrimRecord {
    pub start:  String,
    pub end:    String,
    pub class:  String,
    pub source: String,
    pub output: PathBuf,
}

impl TrimRecord {
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}\n",
            self.start, self.end, self.class, self.source, self.output.display(),
        )
    }
}

/// Append `record` to the log at `path`, creating the file on first use.
pub fn append_log(path: &Path, record: &TrimRecord) -> std::io::Result<()> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    f.write_all(record.to_line().as_bytes())
}

/// A clip that made it to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedClip {
    pub path:   PathBuf,
    pub record: TrimRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_stops_at_first_dot() {
        assert_eq!(source_stem(Path::new("/videos/match.final.mp4")), "match");
        assert_eq!(source_stem(Path::new("clip.mkv")), "clip");
        assert_eq!(source_stem(Path::new("/videos/.hidden")), "clip");
    }

    #[test]
    fn prepared_path_has_suffix_and_lives_in_class_dir() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::under(dir.path());
        let path = layout.prepare_clip_path("cat", Path::new("/v/walk.mp4")).unwrap();

        assert!(layout.class_dir("cat").is_dir());
        assert_eq!(path.parent(), Some(layout.class_dir("cat").as_path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let suffix = name.strip_prefix("walk_").unwrap().strip_suffix(".mp4").unwrap();
        assert_eq!(suffix.len(), 10);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn prepared_paths_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::under(dir.path());
        let a = layout.prepare_clip_path("dog", Path::new("a.mp4")).unwrap();
        std::fs::write(&a, b"x").unwrap();
        let b = layout.prepare_clip_path("dog", Path::new("a.mp4")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn log_lines_are_comma_space_separated_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join(LOG_FILE);
        let record = TrimRecord {
            start:  "00:00:01".into(),
            end:    "00:00:04".into(),
            class:  "cat".into(),
            source: "walk.mp4".into(),
            output: PathBuf::from("trimmed_clips/cat/walk_abc.mp4"),
        };
        append_log(&log, &record).unwrap();
        append_log(&log, &record).unwrap();

        let text = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "00:00:01, 00:00:04, cat, walk.mp4, trimmed_clips/cat/walk_abc.mp4");
    }
}
