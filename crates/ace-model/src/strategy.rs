//! Change strategies
//!
//! A [`ChangeStrategy`] is the executable plan for one approach tier: an
//! ordered step list, a validation level, and an optional nested fallback.

use crate::assessment::Approach;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of a strategy step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Study the target before generating
    Analyze,
    /// Drive the text-generation provider
    Generate,
    /// Sanity-check the raw generation before gating
    Verify,
    /// Run the validation gate
    Validate,
    /// Accept the change as the execution's output
    Apply,
}

impl StepKind {
    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Analyze => "analyze",
            StepKind::Generate => "generate",
            StepKind::Verify => "verify",
            StepKind::Validate => "validate",
            StepKind::Apply => "apply",
        }
    }
}

/// One step of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStep {
    /// Step kind
    pub kind: StepKind,
    /// Whether failure of this step fails the attempt
    pub required: bool,
    /// Optional per-step timeout
    pub timeout: Option<Duration>,
}

impl StrategyStep {
    /// Create a required step
    #[inline]
    #[must_use]
    pub fn required(kind: StepKind) -> Self {
        Self {
            kind,
            required: true,
            timeout: None,
        }
    }

    /// Create an optional step
    #[inline]
    #[must_use]
    pub fn optional(kind: StepKind) -> Self {
        Self {
            kind,
            required: false,
            timeout: None,
        }
    }

    /// With a timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Strictness of gate checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationLevel {
    /// Scope and deletion checks only
    Basic,
    /// Plus preservation rules
    Standard,
    /// Plus intent reflection
    Strict,
    /// Everything, and warnings escalate scrutiny
    Paranoid,
}

impl ValidationLevel {
    /// Level used by an approach tier
    #[inline]
    #[must_use]
    pub fn for_approach(approach: Approach) -> Self {
        match approach {
            Approach::Direct => ValidationLevel::Basic,
            Approach::Guided => ValidationLevel::Standard,
            Approach::Conservative => ValidationLevel::Strict,
            Approach::HumanReview => ValidationLevel::Paranoid,
        }
    }
}

/// Executable plan for one approach tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStrategy {
    /// Approach this strategy executes
    pub approach: Approach,
    /// Confidence carried into execution (discounted on fallback)
    pub confidence: f64,
    /// Ordered steps
    pub steps: Vec<StrategyStep>,
    /// Gate strictness
    pub validation_level: ValidationLevel,
    /// Nested fallback strategy, if any
    pub fallback: Option<Box<ChangeStrategy>>,
}

impl ChangeStrategy {
    /// Fixed step list for an approach tier
    ///
    /// `analyze_timeout` applies only to the conservative tier's analyze
    /// step, which is the one step that declares a timeout by default.
    #[must_use]
    pub fn for_approach(approach: Approach, confidence: f64, analyze_timeout: Duration) -> Self {
        let steps = match approach {
            Approach::Direct => vec![
                StrategyStep::required(StepKind::Generate),
                StrategyStep::required(StepKind::Validate),
                StrategyStep::required(StepKind::Apply),
            ],
            Approach::Guided => vec![
                StrategyStep::required(StepKind::Analyze),
                StrategyStep::required(StepKind::Generate),
                StrategyStep::required(StepKind::Validate),
                StrategyStep::required(StepKind::Apply),
            ],
            Approach::Conservative => vec![
                StrategyStep::required(StepKind::Analyze).with_timeout(analyze_timeout),
                StrategyStep::required(StepKind::Generate),
                StrategyStep::optional(StepKind::Verify),
                StrategyStep::required(StepKind::Validate),
                StrategyStep::required(StepKind::Apply),
            ],
            Approach::HumanReview => vec![
                StrategyStep::required(StepKind::Analyze),
                StrategyStep::required(StepKind::Generate),
            ],
        };

        Self {
            approach,
            confidence: confidence.clamp(0.0, 1.0),
            steps,
            validation_level: ValidationLevel::for_approach(approach),
            fallback: None,
        }
    }

    /// Build the full strategy chain for an approach, nesting each fallback
    /// tier with its confidence discounted by `discount` per level
    #[must_use]
    pub fn chain(
        approach: Approach,
        confidence: f64,
        discount: f64,
        analyze_timeout: Duration,
    ) -> Self {
        let mut root = Self::for_approach(approach, confidence, analyze_timeout);
        if let Some(next) = approach.next_fallback() {
            root.fallback = Some(Box::new(Self::chain(
                next,
                confidence * discount,
                discount,
                analyze_timeout,
            )));
        }
        root
    }

    /// Number of strategies in the chain, including this one
    #[must_use]
    pub fn chain_len(&self) -> usize {
        1 + self.fallback.as_ref().map_or(0, |f| f.chain_len())
    }

    /// Whether the step list contains a step of `kind`
    #[inline]
    #[must_use]
    pub fn has_step(&self, kind: StepKind) -> bool {
        self.steps.iter().any(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn direct_tier_steps() {
        let s = ChangeStrategy::for_approach(Approach::Direct, 0.85, TIMEOUT);
        assert_eq!(s.steps.len(), 3);
        assert!(s.has_step(StepKind::Generate));
        assert!(!s.has_step(StepKind::Analyze));
        assert_eq!(s.validation_level, ValidationLevel::Basic);
    }

    #[test]
    fn conservative_tier_has_analyze_timeout() {
        let s = ChangeStrategy::for_approach(Approach::Conservative, 0.4, TIMEOUT);
        let analyze = s.steps.iter().find(|s| s.kind == StepKind::Analyze).unwrap();
        assert_eq!(analyze.timeout, Some(TIMEOUT));
        assert_eq!(s.validation_level, ValidationLevel::Strict);
    }

    #[test]
    fn human_review_tier_never_applies() {
        let s = ChangeStrategy::for_approach(Approach::HumanReview, 0.2, TIMEOUT);
        assert!(!s.has_step(StepKind::Apply));
        assert_eq!(s.validation_level, ValidationLevel::Paranoid);
    }

    #[test]
    fn chain_discounts_confidence() {
        let chain = ChangeStrategy::chain(Approach::Direct, 1.0, 0.8, TIMEOUT);
        assert_eq!(chain.chain_len(), 4);

        let guided = chain.fallback.as_ref().unwrap();
        assert_eq!(guided.approach, Approach::Guided);
        assert!((guided.confidence - 0.8).abs() < 1e-9);

        let conservative = guided.fallback.as_ref().unwrap();
        assert!((conservative.confidence - 0.64).abs() < 1e-9);

        let review = conservative.fallback.as_ref().unwrap();
        assert_eq!(review.approach, Approach::HumanReview);
        assert!(review.fallback.is_none());
    }

    #[test]
    fn chain_from_bottom_tier_is_single() {
        let chain = ChangeStrategy::chain(Approach::HumanReview, 0.2, 0.8, TIMEOUT);
        assert_eq!(chain.chain_len(), 1);
    }
}
