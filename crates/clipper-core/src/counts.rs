// crates/clipper-core/src/counts.rs
//
// Per-class clip counts, derived from the output tree on demand.
// Each immediate subdirectory of the root is a class; only regular files
// directly inside it are counted. Nothing is cached between calls.

use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub per_class: BTreeMap<String, usize>,
    pub total:     usize,
}

impl ClassCounts {
    /// Scan `root`. An absent or unreadable root yields an empty snapshot.
    pub fn scan(root: &Path) -> Self {
        let mut counts = Self::default();
        let Ok(entries) = std::fs::read_dir(root) else { return counts };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() { continue; }
            let class = entry.file_name().to_string_lossy().to_string();
            let n = std::fs::read_dir(&path)
                .map(|files| files.flatten().filter(|f| f.path().is_file()).count())
                .unwrap_or(0);
            counts.total += n;
            counts.per_class.insert(class, n);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_files_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("trimmed_clips");
        std::fs::create_dir_all(root.join("cat")).unwrap();
        std::fs::create_dir_all(root.join("dog")).unwrap();
        std::fs::write(root.join("cat/a.mp4"), b"").unwrap();
        std::fs::write(root.join("cat/b.mp4"), b"").unwrap();

        let counts = ClassCounts::scan(&root);
        assert_eq!(counts.per_class.get("cat"), Some(&2));
        assert_eq!(counts.per_class.get("dog"), Some(&0));
        assert_eq!(counts.per_class.len(), 2);
        assert_eq!(counts.total, 2);
    }

    #[test]
    fn absent_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let counts = ClassCounts::scan(&dir.path().join("nope"));
        assert!(counts.per_class.is_empty());
        assert_eq!(counts.total, 0);
    }

    #[test]
    fn nested_dirs_and_stray_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("cat/nested")).unwrap();
        std::fs::write(root.join("cat/nested/deep.mp4"), b"").unwrap();
        std::fs::write(root.join("cat/top.mp4"), b"").unwrap();
        std::fs::write(root.join("stray.txt"), b"").unwrap();

        let counts = ClassCounts::scan(root);
        assert_eq!(counts.per_class.len(), 1);
        assert_eq!(counts.per_class["cat"], 1);
        assert_eq!(counts.total, 1);
    }
}
