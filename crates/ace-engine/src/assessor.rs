//! Confidence assessment
//!
//! Combines resolver confidence, analyzer certainty, and contextual
//! completeness into the four named factors, aggregates them under the
//! documented weights, and selects the execution approach.

use crate::config::EngineConfig;
use ace_model::{
    Approach, ChangeIntent, ChangeMagnitude, ComplexityTier, ConfidenceAssessment,
    ConfidenceFactors, ImpactAnalysis,
};
use ace_repo::RepoModel;

/// The confidence assessor
#[derive(Debug, Clone)]
pub struct ConfidenceAssessor {
    config: EngineConfig,
}

impl ConfidenceAssessor {
    /// Create an assessor
    #[inline]
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Assess an intent and its impact analysis
    ///
    /// An unresolved target caps the approach at the guided tier: only
    /// guided-and-below strategies carry the broad-scope path.
    #[must_use]
    pub fn assess(
        &self,
        intent: &ChangeIntent,
        impact: &ImpactAnalysis,
        model: &RepoModel,
    ) -> ConfidenceAssessment {
        let factors = ConfidenceFactors::new(
            intent.confidence,
            component_understanding(intent),
            change_complexity(impact),
            context_completeness(intent, model),
        );

        let risk = intent.risk.max(impact.expected_scope.risk);
        let assessment = ConfidenceAssessment::from_factors(factors, &self.config.weights, risk);

        let assessment = if intent.is_resolved() {
            assessment
        } else {
            assessment.capped_at(Approach::Guided)
        };

        tracing::debug!(
            confidence = assessment.confidence,
            approach = assessment.approach.name(),
            risk = ?assessment.risk,
            "confidence assessed"
        );
        assessment
    }
}

/// How well the target component is understood
fn component_understanding(intent: &ChangeIntent) -> f64 {
    match &intent.target {
        Some(target) => {
            let base = match target.complexity {
                ComplexityTier::Simple => 0.9,
                ComplexityTier::Moderate => 0.7,
                ComplexityTier::Complex => 0.5,
            };
            if target.content.is_some() {
                base
            } else {
                base - 0.1
            }
        }
        None => 0.3,
    }
}

/// Inverse structural complexity of the change itself
fn change_complexity(impact: &ImpactAnalysis) -> f64 {
    let magnitude_score = match impact.expected_scope.magnitude {
        ChangeMagnitude::Minimal => 0.9,
        ChangeMagnitude::Moderate => 0.7,
        ChangeMagnitude::Significant => 0.5,
        ChangeMagnitude::Major => 0.3,
    };
    // With no concrete edits the mapping quality is unknown, not perfect.
    let mapping_score = if impact.direct_changes.is_empty() {
        0.5
    } else {
        impact.mean_direct_confidence()
    };
    0.5 * magnitude_score + 0.5 * mapping_score
}

/// How much supporting context is available
fn context_completeness(intent: &ChangeIntent, model: &RepoModel) -> f64 {
    let mut score: f64 = 0.5;
    if intent
        .target
        .as_ref()
        .is_some_and(|t| t.content.is_some())
    {
        score += 0.2;
    }
    if intent.request.is_visual() {
        score += 0.15;
    }
    if !model.is_empty() {
        score += 0.15;
    }
    score.min(1.0)
}
