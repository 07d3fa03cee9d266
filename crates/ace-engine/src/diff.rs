//! Line-diff metrics
//!
//! Order-insensitive multiset comparison of source lines. Deliberately
//! shallow: the gate needs stable counts, not a minimal edit script.

use ace_model::ValidationMetrics;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static BRANCH_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bif\b|\bfor\b|\bwhile\b|\bswitch\b|\bcase\b|\bfunction\b|=>").expect("static pattern")
});

/// Compute diff metrics between original and generated content
///
/// A line counts as removed when the original holds more copies of it than
/// the generated content, and as added in the converse case; identical
/// content therefore yields all-zero counts.
#[must_use]
pub fn line_metrics(original: &str, generated: &str) -> ValidationMetrics {
    let original_counts = line_counts(original);
    let generated_counts = line_counts(generated);

    let mut removed = 0usize;
    for (line, count) in &original_counts {
        let in_generated = generated_counts.get(line).copied().unwrap_or(0);
        removed += count.saturating_sub(in_generated);
    }

    let mut added = 0usize;
    for (line, count) in &generated_counts {
        let in_original = original_counts.get(line).copied().unwrap_or(0);
        added += count.saturating_sub(in_original);
    }

    let original_lines = original.lines().count();
    let lines_changed = added + removed;
    let change_ratio = lines_changed as f64 / original_lines.max(1) as f64;

    let complexity_delta =
        BRANCH_CUE.find_iter(generated).count() as f64 - BRANCH_CUE.find_iter(original).count() as f64;

    ValidationMetrics {
        lines_changed,
        lines_added: added,
        lines_removed: removed,
        files_modified: 1,
        change_ratio,
        complexity_delta,
    }
}

fn line_counts(content: &str) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        *counts.entry(line).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_is_zero() {
        let content = "a\nb\nc\n";
        let metrics = line_metrics(content, content);
        assert_eq!(metrics.lines_changed, 0);
        assert_eq!(metrics.lines_added, 0);
        assert_eq!(metrics.lines_removed, 0);
        assert_eq!(metrics.change_ratio, 0.0);
    }

    #[test]
    fn single_line_replacement() {
        let original = "line one\nline two\nline three\n";
        let generated = "line one\nline 2\nline three\n";
        let metrics = line_metrics(original, generated);
        assert_eq!(metrics.lines_added, 1);
        assert_eq!(metrics.lines_removed, 1);
        assert_eq!(metrics.lines_changed, 2);
    }

    #[test]
    fn pure_deletion() {
        let original = "a\nb\nc\nd\n";
        let generated = "a\n";
        let metrics = line_metrics(original, generated);
        assert_eq!(metrics.lines_removed, 3);
        assert_eq!(metrics.lines_added, 0);
        assert!((metrics.change_ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn duplicate_lines_counted_as_multiset() {
        let original = "x\nx\nx\n";
        let generated = "x\n";
        let metrics = line_metrics(original, generated);
        assert_eq!(metrics.lines_removed, 2);
    }

    #[test]
    fn blank_and_trailing_whitespace_ignored() {
        let original = "a  \n\nb\n";
        let generated = "a\n\n\nb\n";
        let metrics = line_metrics(original, generated);
        assert_eq!(metrics.lines_changed, 0);
    }

    #[test]
    fn complexity_delta_tracks_branches() {
        let original = "const a = 1;\n";
        let generated = "const a = 1;\nif (a) { go(); }\n";
        let metrics = line_metrics(original, generated);
        assert!(metrics.complexity_delta > 0.0);
    }
}
