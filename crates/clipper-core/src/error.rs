// crates/clipper-core/src/error.rs
//
// Every failure a user action can produce. The UI turns these into a status
// banner; nothing is swallowed into a console the operator never sees.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipperError {
    #[error("the class list '{}' was not found", .0.display())]
    MissingClassList(PathBuf),

    #[error("the class list '{}' contains no class labels", .0.display())]
    EmptyClassList(PathBuf),

    #[error("could not read the class list '{}': {source}", path.display())]
    ClassListRead {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no video is loaded")]
    NoVideoLoaded,

    #[error("could not open '{}': {msg}", path.display())]
    MediaOpen { path: PathBuf, msg: String },

    #[error("playback could not start: {0}")]
    PlaybackStart(String),

    #[error("invalid {field} time '{text}' (expected HH:MM:SS)")]
    InvalidTime { field: TimeField, text: String },

    #[error("start {start} must be before end {end}")]
    EmptyRange { start: String, end: String },

    #[error("row {0} no longer exists")]
    UnknownRow(u64),

    #[error("class #{0} is not in the class list")]
    UnknownClass(usize),

    #[error("could not create '{}': {source}", path.display())]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start the trim utility '{}': {source}", program.display())]
    TrimSpawn {
        program: PathBuf,
        #[source]
        source:  std::io::Error,
    },

    #[error("trim failed: {0}")]
    TrimFailed(String),

    #[error("clip saved as '{}' but the operation log could not be written: {source}", clip.display())]
    LogWrite {
        clip:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which of a row's two time fields an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Start => f.write_str("start"),
            TimeField::End   => f.write_str("end"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let e = ClipperError::InvalidTime { field: TimeField::End, text: "bad".into() };
        assert_eq!(e.to_string(), "invalid end time 'bad' (expected HH:MM:SS)");
    }

    #[test]
    fn log_failure_still_names_the_saved_clip() {
        let e = ClipperError::LogWrite {
            clip:   PathBuf::from("trimmed_clips/cat/a_x.mp4"),
            source: std::io::Error::other("disk full"),
        };
        assert!(e.to_string().contains("trimmed_clips/cat/a_x.mp4"));
    }
}
