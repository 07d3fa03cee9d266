//! Validation results
//!
//! The gate's verdict on one generated change: pass/fail plus itemized
//! issues, warnings, and diff metrics.

use serde::{Deserialize, Serialize};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueSeverity {
    /// Fails validation
    Error,
    /// Recorded, does not fail
    Warning,
}

/// Kind of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Changed-line delta beyond the tier threshold
    ScopeExceeded,
    /// Too many original lines deleted
    ExcessiveDeletion,
    /// A critical preservation rule no longer holds
    PreservationViolated,
    /// A requested property is not evidenced in the output
    IntentNotReflected,
    /// Anything else the gate flags
    Other,
}

impl IssueKind {
    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            IssueKind::ScopeExceeded => "scope-exceeded",
            IssueKind::ExcessiveDeletion => "excessive-deletion",
            IssueKind::PreservationViolated => "preservation-violated",
            IssueKind::IntentNotReflected => "intent-not-reflected",
            IssueKind::Other => "other",
        }
    }
}

/// One itemized validation issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue classification
    pub kind: IssueKind,
    /// Severity
    pub severity: IssueSeverity,
    /// What went wrong
    pub message: String,
}

impl ValidationIssue {
    /// Create an error-severity issue
    #[inline]
    #[must_use]
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: IssueSeverity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-severity issue
    #[inline]
    #[must_use]
    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Line-level metrics of a generated change
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Lines added plus lines removed
    pub lines_changed: usize,
    /// Lines present only in the generated content
    pub lines_added: usize,
    /// Lines present only in the original content
    pub lines_removed: usize,
    /// Files touched by the change set
    pub files_modified: usize,
    /// `lines_changed` over the original line count
    pub change_ratio: f64,
    /// Rough structural complexity shift (branch/function count delta)
    pub complexity_delta: f64,
}

/// Verdict of the validation gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True only when there are zero error-severity issues
    pub passed: bool,
    /// Confidence carried from the executing strategy
    pub confidence: f64,
    /// Itemized issues
    pub issues: Vec<ValidationIssue>,
    /// Non-blocking notes
    pub warnings: Vec<String>,
    /// Diff metrics
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    /// Build a result; `passed` is derived from the issues
    #[must_use]
    pub fn new(
        confidence: f64,
        issues: Vec<ValidationIssue>,
        warnings: Vec<String>,
        metrics: ValidationMetrics,
    ) -> Self {
        let passed = !issues.iter().any(|i| i.severity == IssueSeverity::Error);
        Self {
            passed,
            confidence,
            issues,
            warnings,
            metrics,
        }
    }

    /// Number of error-severity issues
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count()
    }

    /// One-line summary for logs and failure reports
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed {
            format!(
                "passed ({} lines changed, {} warnings)",
                self.metrics.lines_changed,
                self.warnings.len()
            )
        } else {
            let kinds: Vec<&str> = self
                .issues
                .iter()
                .filter(|i| i.severity == IssueSeverity::Error)
                .map(|i| i.kind.name())
                .collect();
            format!("failed: {}", kinds.join(", "))
        }
    }
}
