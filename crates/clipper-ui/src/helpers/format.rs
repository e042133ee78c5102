// src/helpers/format.rs
//
// Display strings for labels. Timestamp formatting lives in
// clipper_core::helpers::time.

use clipper_core::counts::ClassCounts;

/// One `(class, count)` pair per class folder, in name order.
pub fn class_count_lines(counts: &ClassCounts) -> Vec<(String, String)> {
    counts.per_class.iter()
        .map(|(class, n)| (class.clone(), n.to_string()))
        .collect()
}

pub fn total_files_label(counts: &ClassCounts) -> String {
    format!("Total Files: {}", counts.total)
}

pub fn trimmed_counter_label(count: u64) -> String {
    format!("Trimmed Clips: {count}")
}

/// Keeps the tail of `text` within `max_chars`, prefixing "…" when cut.
/// Output paths are most informative at their end (class folder + file name).
pub fn fit_tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let keep = max_chars - 1;
    let tail: String = text.chars().skip(count - keep).collect();
    format!("…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(trimmed_counter_label(3), "Trimmed Clips: 3");
        let mut counts = ClassCounts::default();
        counts.per_class.insert("dog".into(), 0);
        counts.per_class.insert("cat".into(), 2);
        counts.total = 2;
        assert_eq!(total_files_label(&counts), "Total Files: 2");
        assert_eq!(
            class_count_lines(&counts),
            vec![("cat".to_string(), "2".to_string()), ("dog".to_string(), "0".to_string())],
        );
    }

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_tail("cat/a.mp4", 40), "cat/a.mp4");
    }

    #[test]
    fn long_text_keeps_its_end() {
        let out = fit_tail("trimmed_clips/cat/walk_abcdefghij.mp4", 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.starts_with('…'));
        assert!(out.ends_with("ghij.mp4"));
    }

    #[test]
    fn zero_budget_is_empty() {
        assert_eq!(fit_tail("abc", 0), "");
    }
}
