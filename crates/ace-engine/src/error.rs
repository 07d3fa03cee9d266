//! Engine error taxonomy
//!
//! Resolution ambiguity is not here: it is a valid low-confidence outcome.
//! Over-deletion, scope, preservation, and intent violations are handled
//! locally by the executor's retry/fallback loop; only budget exhaustion and
//! genuinely unrecoverable conditions surface to the caller.

use ace_analyzer::AnalyzerError;
use ace_model::ValidationResult;
use ace_repo::ProviderError;
use std::time::Duration;

/// Terminal engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Generation stayed materially shorter than the original after the
    /// corrective retry
    #[error(
        "over-deletion: generated content is {actual_ratio:.2} of the original (threshold {threshold:.2})"
    )]
    OverDeletion {
        /// Observed generated/original length ratio
        actual_ratio: f64,
        /// Configured threshold
        threshold: f64,
    },

    /// The attempt budget ran out without a passing validation
    #[error("attempts exhausted after {attempts} tries")]
    AttemptsExhausted {
        /// Attempts consumed
        attempts: u32,
        /// The last gate verdict, carrying the issues that explain why
        last_validation: Option<ValidationResult>,
    },

    /// Impact analysis failed
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalyzerError),

    /// A provider call failed outside the retryable attempt path
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A step exceeded its declared timeout
    #[error("step timed out after {0:?}")]
    StepTimeout(Duration),

    /// The broad-scope sweep found nothing worth changing
    #[error("no viable target: {0}")]
    NoViableTarget(String),
}

impl EngineError {
    /// The last validation result attached to this error, if any
    #[inline]
    #[must_use]
    pub fn last_validation(&self) -> Option<&ValidationResult> {
        match self {
            EngineError::AttemptsExhausted {
                last_validation, ..
            } => last_validation.as_ref(),
            _ => None,
        }
    }

    /// Whether this failure classifies as over-deletion
    #[inline]
    #[must_use]
    pub fn is_over_deletion(&self) -> bool {
        matches!(self, EngineError::OverDeletion { .. })
    }
}
