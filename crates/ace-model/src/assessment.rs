//! Confidence assessment
//!
//! Maps resolution and analysis quality onto one of four execution
//! approaches, with an ordered fallback list.

use crate::intent::RiskTier;
use serde::{Deserialize, Serialize};

/// Execution approach tier
///
/// Ordering is by commitment: [`Approach::Direct`] applies changes with the
/// least ceremony, [`Approach::HumanReview`] never applies at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Approach {
    /// High-confidence direct application
    Direct,
    /// Medium-confidence guided generation
    Guided,
    /// Low-confidence conservative generation
    Conservative,
    /// Very low confidence: proposal only, requires human approval
    HumanReview,
}

impl Approach {
    /// Confidence boundaries between tiers
    pub const BOUNDARIES: [f64; 3] = [0.35, 0.6, 0.8];

    /// Select the approach for an aggregate confidence score
    ///
    /// Total and deterministic over [0, 1]; a score exactly at a boundary
    /// resolves to the higher tier.
    #[inline]
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Approach::Direct
        } else if confidence >= 0.6 {
            Approach::Guided
        } else if confidence >= 0.35 {
            Approach::Conservative
        } else {
            Approach::HumanReview
        }
    }

    /// Canonical tier name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Approach::Direct => "high-confidence-direct",
            Approach::Guided => "medium-confidence-guided",
            Approach::Conservative => "low-confidence-conservative",
            Approach::HumanReview => "very-low-confidence-human-review",
        }
    }

    /// The next more conservative tier, if any
    #[inline]
    #[must_use]
    pub fn next_fallback(&self) -> Option<Approach> {
        match self {
            Approach::Direct => Some(Approach::Guided),
            Approach::Guided => Some(Approach::Conservative),
            Approach::Conservative => Some(Approach::HumanReview),
            Approach::HumanReview => None,
        }
    }

    /// Ordered list of lower-commitment tiers below this one
    #[must_use]
    pub fn fallbacks(&self) -> Vec<Approach> {
        let mut out = Vec::new();
        let mut current = *self;
        while let Some(next) = current.next_fallback() {
            out.push(next);
            current = next;
        }
        out
    }

    /// Whether this tier is allowed to apply changes automatically
    #[inline]
    #[must_use]
    pub fn auto_applies(&self) -> bool {
        !matches!(self, Approach::HumanReview)
    }

    /// Whether the broad-scope sweep runs at this tier when no target is bound
    #[inline]
    #[must_use]
    pub fn supports_broad_scope(&self) -> bool {
        matches!(
            self,
            Approach::Guided | Approach::Conservative | Approach::HumanReview
        )
    }
}

impl std::fmt::Display for Approach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four independently computable confidence factors, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    /// How unambiguous the captured edit or instruction is
    pub visual_clarity: f64,
    /// How well the target component is understood
    pub component_understanding: f64,
    /// Inverse of the change's structural complexity
    pub change_complexity: f64,
    /// How much supporting context is available
    pub context_completeness: f64,
}

impl ConfidenceFactors {
    /// Create factors, clamping each to [0, 1]
    #[must_use]
    pub fn new(
        visual_clarity: f64,
        component_understanding: f64,
        change_complexity: f64,
        context_completeness: f64,
    ) -> Self {
        Self {
            visual_clarity: visual_clarity.clamp(0.0, 1.0),
            component_understanding: component_understanding.clamp(0.0, 1.0),
            change_complexity: change_complexity.clamp(0.0, 1.0),
            context_completeness: context_completeness.clamp(0.0, 1.0),
        }
    }

    /// Weighted mean of the factors
    #[must_use]
    pub fn aggregate(&self, weights: &AssessorWeights) -> f64 {
        let total = weights.visual_clarity
            + weights.component_understanding
            + weights.change_complexity
            + weights.context_completeness;
        if total <= 0.0 {
            return 0.0;
        }
        (self.visual_clarity * weights.visual_clarity
            + self.component_understanding * weights.component_understanding
            + self.change_complexity * weights.change_complexity
            + self.context_completeness * weights.context_completeness)
            / total
    }
}

/// Fixed factor weights
///
/// The defaults are the documented, stable weighting used across the
/// engine: clarity and component understanding dominate (0.30 each),
/// complexity and context contribute 0.20 each. Every factor is monotone in
/// the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessorWeights {
    /// Weight of `visual_clarity`
    pub visual_clarity: f64,
    /// Weight of `component_understanding`
    pub component_understanding: f64,
    /// Weight of `change_complexity`
    pub change_complexity: f64,
    /// Weight of `context_completeness`
    pub context_completeness: f64,
}

impl Default for AssessorWeights {
    fn default() -> Self {
        Self {
            visual_clarity: 0.30,
            component_understanding: 0.30,
            change_complexity: 0.20,
            context_completeness: 0.20,
        }
    }
}

/// Result of confidence assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// Aggregate confidence in [0, 1]
    pub confidence: f64,
    /// The contributing factors
    pub factors: ConfidenceFactors,
    /// Selected approach
    pub approach: Approach,
    /// Ordered lower-commitment tiers below the selected one
    pub fallbacks: Vec<Approach>,
    /// Overall risk level
    pub risk: RiskTier,
}

impl ConfidenceAssessment {
    /// Build an assessment from factors and a risk tier
    #[must_use]
    pub fn from_factors(factors: ConfidenceFactors, weights: &AssessorWeights, risk: RiskTier) -> Self {
        let confidence = factors.aggregate(weights);
        let approach = Approach::from_confidence(confidence);
        Self {
            confidence,
            factors,
            approach,
            fallbacks: approach.fallbacks(),
            risk,
        }
    }

    /// Cap the approach at `ceiling`, keeping the fallback list consistent
    ///
    /// Used when an unresolved target forbids the direct tier.
    #[must_use]
    pub fn capped_at(mut self, ceiling: Approach) -> Self {
        if self.approach < ceiling {
            self.approach = ceiling;
            self.fallbacks = ceiling.fallbacks();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_resolves_to_higher_tier() {
        assert_eq!(Approach::from_confidence(0.8), Approach::Direct);
        assert_eq!(Approach::from_confidence(0.6), Approach::Guided);
        assert_eq!(Approach::from_confidence(0.35), Approach::Conservative);
        assert_eq!(Approach::from_confidence(0.349), Approach::HumanReview);
    }

    #[test]
    fn fallbacks_are_ordered_tails() {
        assert_eq!(
            Approach::Direct.fallbacks(),
            vec![Approach::Guided, Approach::Conservative, Approach::HumanReview]
        );
        assert_eq!(Approach::HumanReview.fallbacks(), vec![]);
    }

    #[test]
    fn human_review_never_applies() {
        assert!(Approach::Direct.auto_applies());
        assert!(!Approach::HumanReview.auto_applies());
    }

    #[test]
    fn aggregate_uses_documented_weights() {
        let factors = ConfidenceFactors::new(1.0, 1.0, 0.0, 0.0);
        let agg = factors.aggregate(&AssessorWeights::default());
        assert!((agg - 0.6).abs() < 1e-9);
    }

    #[test]
    fn aggregate_is_monotone_in_each_factor() {
        let weights = AssessorWeights::default();
        let low = ConfidenceFactors::new(0.5, 0.5, 0.5, 0.5);
        for raised in [
            ConfidenceFactors::new(0.9, 0.5, 0.5, 0.5),
            ConfidenceFactors::new(0.5, 0.9, 0.5, 0.5),
            ConfidenceFactors::new(0.5, 0.5, 0.9, 0.5),
            ConfidenceFactors::new(0.5, 0.5, 0.5, 0.9),
        ] {
            assert!(raised.aggregate(&weights) > low.aggregate(&weights));
        }
    }

    #[test]
    fn capped_assessment_demotes_direct() {
        let factors = ConfidenceFactors::new(0.95, 0.95, 0.95, 0.95);
        let assessment =
            ConfidenceAssessment::from_factors(factors, &AssessorWeights::default(), RiskTier::Low);
        assert_eq!(assessment.approach, Approach::Direct);

        let capped = assessment.capped_at(Approach::Guided);
        assert_eq!(capped.approach, Approach::Guided);
        assert_eq!(
            capped.fallbacks,
            vec![Approach::Conservative, Approach::HumanReview]
        );
    }

    #[test]
    fn capped_assessment_leaves_lower_tiers_alone() {
        let factors = ConfidenceFactors::new(0.2, 0.2, 0.2, 0.2);
        let assessment =
            ConfidenceAssessment::from_factors(factors, &AssessorWeights::default(), RiskTier::High);
        assert_eq!(assessment.approach, Approach::HumanReview);

        let capped = assessment.capped_at(Approach::Guided);
        assert_eq!(capped.approach, Approach::HumanReview);
    }
}
