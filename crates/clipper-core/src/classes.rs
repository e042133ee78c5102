// crates/clipper-core/src/classes.rs
//
// The closed set of class labels for a session. Loaded once at startup and
// handed by reference to whatever needs it, never re-read from disk.

use std::path::Path;
use crate::error::ClipperError;

/// File name looked up in the working directory at startup.
pub const CLASS_LIST_FILE: &str = "classes.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassList {
    labels: Vec<String>,
}

impl ClassList {
    /// Read one label per line. Surrounding whitespace is trimmed and blank
    /// lines are skipped. A missing file or a file with no labels is an error.
    pub fn load(path: &Path) -> Result<Self, ClipperError> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClipperError::MissingClassList(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ClipperError::ClassListRead { path: path.to_path_buf(), source });
            }
        };
        let list = Self::parse(&text);
        if list.is_empty() {
            return Err(ClipperError::EmptyClassList(path.to_path_buf()));
        }
        Ok(list)
    }

    pub fn parse(text: &str) -> Self {
        let labels = text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
