//! Property tests for the tier mapping, strategy chains, and analyzer
//! determinism.

use ace_analyzer::ImpactAnalyzer;
use ace_model::{
    Approach, AssessorWeights, ChangeRequest, ChangeStrategy, ChangeType, ConfidenceFactors,
    ElementDescriptor, PropertyDelta, VisualEdit,
};
use ace_test_utils::{button_component, sample_model};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::time::Duration;

#[test]
fn tier_mapping_at_boundaries_resolves_upward() {
    assert_eq!(Approach::from_confidence(0.8), Approach::Direct);
    assert_eq!(Approach::from_confidence(0.6), Approach::Guided);
    assert_eq!(Approach::from_confidence(0.35), Approach::Conservative);
}

proptest! {
    // Total and deterministic over the whole score range.
    #[test]
    fn tier_mapping_is_total_and_deterministic(confidence in 0.0f64..=1.0) {
        let first = Approach::from_confidence(confidence);
        let second = Approach::from_confidence(confidence);
        prop_assert_eq!(first, second);

        let expected = if confidence >= 0.8 {
            Approach::Direct
        } else if confidence >= 0.6 {
            Approach::Guided
        } else if confidence >= 0.35 {
            Approach::Conservative
        } else {
            Approach::HumanReview
        };
        prop_assert_eq!(first, expected);
    }

    // Higher confidence never selects a more conservative tier.
    #[test]
    fn tier_mapping_is_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Approach::from_confidence(high) <= Approach::from_confidence(low));
    }

    // Raising any factor never lowers the aggregate.
    #[test]
    fn aggregate_is_monotone_in_factors(
        base in 0.0f64..=1.0,
        bump in 0.0f64..=0.5,
    ) {
        let weights = AssessorWeights::default();
        let before = ConfidenceFactors::new(base, base, base, base).aggregate(&weights);
        let after = ConfidenceFactors::new((base + bump).min(1.0), base, base, base)
            .aggregate(&weights);
        prop_assert!(after >= before - 1e-12);
    }

    // Every fallback link discounts confidence by exactly the factor.
    #[test]
    fn strategy_chain_discount_is_exact(confidence in 0.0f64..=1.0) {
        let chain = ChangeStrategy::chain(
            Approach::Direct,
            confidence,
            0.8,
            Duration::from_secs(5),
        );

        let mut expected = confidence;
        let mut cursor = Some(&chain);
        while let Some(strategy) = cursor {
            prop_assert!((strategy.confidence - expected.clamp(0.0, 1.0)).abs() < 1e-9);
            expected *= 0.8;
            cursor = strategy.fallback.as_deref();
        }
    }
}

#[test]
fn analyzer_is_idempotent_over_repeated_runs() {
    let model = sample_model();
    let target = button_component();
    let element = ElementDescriptor::new("button").with_selector(".cta-button");
    let request = ChangeRequest::Visual(VisualEdit::new(
        element,
        vec![PropertyDelta::styling("font-size", "14px", "16px")],
    ));
    let intent = ace_model::ChangeIntent::new(
        ChangeType::Styling,
        "bump button size",
        request,
        Some(target.clone()),
        0.9,
    );

    let analyzer = ImpactAnalyzer::default();
    let runs: Vec<_> = (0..4)
        .map(|_| analyzer.analyze(&intent, &target, &model).expect("analysis succeeds"))
        .collect();

    for pair in runs.windows(2) {
        assert_eq!(pair[0].expected_scope, pair[1].expected_scope);
        assert_eq!(
            pair[0]
                .preservation_rules
                .iter()
                .map(|r| (r.name.clone(), r.pattern.clone(), r.critical))
                .collect::<Vec<_>>(),
            pair[1]
                .preservation_rules
                .iter()
                .map(|r| (r.name.clone(), r.pattern.clone(), r.critical))
                .collect::<Vec<_>>()
        );
        assert_eq!(pair[0].direct_changes.len(), pair[1].direct_changes.len());
    }
}

#[test]
fn fallback_lists_are_strict_tails() {
    assert_eq!(
        Approach::Direct.fallbacks(),
        vec![Approach::Guided, Approach::Conservative, Approach::HumanReview]
    );
    assert_eq!(
        Approach::Guided.fallbacks(),
        vec![Approach::Conservative, Approach::HumanReview]
    );
    assert_eq!(Approach::Conservative.fallbacks(), vec![Approach::HumanReview]);
    assert!(Approach::HumanReview.fallbacks().is_empty());
}
