//! Execution reports
//!
//! What the result consumer receives for one change intent: the outcome
//! (applied changes or a proposal), the gate's verdict, and an ordered
//! human-readable step log.

use ace_model::{Approach, FileChange, IntentId, ValidationResult};
use serde::{Deserialize, Serialize};

/// Terminal outcome of one execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Validated changes, ready for the consumer to commit
    Applied {
        /// One entry per modified file
        changes: Vec<FileChange>,
        /// The passing gate verdict
        validation: ValidationResult,
    },
    /// A non-applied proposal requiring human approval
    ///
    /// The proposal's `new_content` is the unmodified original; the intended
    /// diff is carried in its reasoning. Consumers must never commit it.
    Proposed {
        /// The proposal
        proposal: FileChange,
    },
}

impl Outcome {
    /// Whether changes were actually applied
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    /// The applied changes, empty for a proposal
    #[must_use]
    pub fn changes(&self) -> &[FileChange] {
        match self {
            Outcome::Applied { changes, .. } => changes,
            Outcome::Proposed { .. } => &[],
        }
    }
}

/// One entry of the execution log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    /// Step name (analyze, generate, validate, ...)
    pub step: String,
    /// What happened
    pub detail: String,
    /// Wall time spent in the step
    pub elapsed_ms: u64,
}

impl StepLog {
    /// Create a log entry
    #[inline]
    #[must_use]
    pub fn new(step: impl Into<String>, detail: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            step: step.into(),
            detail: detail.into(),
            elapsed_ms,
        }
    }
}

/// Full report for one executed change intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// The intent this report belongs to
    pub intent_id: IntentId,
    /// The tier that produced the outcome (after any fallbacks)
    pub approach: Approach,
    /// Attempts consumed
    pub attempts: u32,
    /// Terminal outcome
    pub outcome: Outcome,
    /// Ordered step log
    pub log: Vec<StepLog>,
    /// Completion timestamp
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl ExecutionReport {
    /// Ordered, human-readable step descriptions
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.log
            .iter()
            .map(|entry| format!("[{}] {} ({}ms)", entry.step, entry.detail, entry.elapsed_ms))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::ValidationMetrics;

    #[test]
    fn outcome_accessors() {
        let applied = Outcome::Applied {
            changes: vec![FileChange::modify("a.tsx", "old", "new", "edit")],
            validation: ValidationResult::new(0.9, vec![], vec![], ValidationMetrics::default()),
        };
        assert!(applied.is_applied());
        assert_eq!(applied.changes().len(), 1);

        let proposed = Outcome::Proposed {
            proposal: FileChange::modify("a.tsx", "old", "old", "proposal"),
        };
        assert!(!proposed.is_applied());
        assert!(proposed.changes().is_empty());
    }

    #[test]
    fn describe_orders_steps() {
        let report = ExecutionReport {
            intent_id: IntentId::new(),
            approach: Approach::Direct,
            attempts: 1,
            outcome: Outcome::Proposed {
                proposal: FileChange::modify("a.tsx", "x", "x", "p"),
            },
            log: vec![
                StepLog::new("generate", "called provider", 12),
                StepLog::new("validate", "passed", 1),
            ],
            completed_at: chrono::Utc::now(),
        };

        let lines = report.describe();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[generate]"));
        assert!(lines[1].starts_with("[validate]"));
    }
}
