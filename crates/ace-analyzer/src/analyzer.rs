//! Impact analyzer
//!
//! Given a resolved intent and its target component, computes the direct
//! changes in the target's styling idiom, cascade signals, preservation
//! rules, validation checks, and the expected-scope estimate.

use crate::cascade;
use crate::idiom::IdiomTable;
use crate::preservation;
use ace_model::{
    ChangeIntent, DirectChange, ExpectedScope, ImpactAnalysis, StylingIdiom, TargetComponent,
    ValidationCheck,
};
use ace_repo::RepoModel;

/// Analyzer errors
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// No strategy registered for the component's styling idiom
    #[error("no idiom strategy registered for {0:?}")]
    UnsupportedIdiom(StylingIdiom),

    /// The component's content was not hydrated before analysis
    #[error("component {0} has no content; hydrate it before analysis")]
    MissingContent(String),
}

/// Impact analyzer with an injected idiom strategy table
#[derive(Debug)]
pub struct ImpactAnalyzer {
    idioms: IdiomTable,
}

impl ImpactAnalyzer {
    /// Create an analyzer with a custom strategy table
    #[inline]
    #[must_use]
    pub fn new(idioms: IdiomTable) -> Self {
        Self { idioms }
    }

    /// Analyze one intent against its hydrated target component
    ///
    /// Deterministic: the same (intent, component) pair always yields the
    /// same scope estimate and preservation rules.
    ///
    /// # Errors
    /// - [`AnalyzerError::MissingContent`] when `target.content` is unset
    /// - [`AnalyzerError::UnsupportedIdiom`] when no strategy covers the
    ///   component's idiom
    pub fn analyze(
        &self,
        intent: &ChangeIntent,
        target: &TargetComponent,
        model: &RepoModel,
    ) -> Result<ImpactAnalysis, AnalyzerError> {
        let content = target
            .content
            .as_deref()
            .ok_or_else(|| AnalyzerError::MissingContent(target.name.clone()))?;

        let strategy = self
            .idioms
            .for_idiom(target.styling)
            .ok_or(AnalyzerError::UnsupportedIdiom(target.styling))?;

        let deltas = intent.request.deltas();
        let direct_changes: Vec<DirectChange> = deltas
            .iter()
            .map(|delta| strategy.convert(delta, model.theme()))
            .collect();

        let cascade_changes = cascade::signals_for(deltas, target, model);
        let preservation_rules = preservation::rules_for(content);

        let required = cascade_changes.iter().filter(|c| c.required).count();
        let expected_scope = ExpectedScope::from_counts(direct_changes.len(), required);

        tracing::debug!(
            component = %target.name,
            direct = direct_changes.len(),
            cascades = cascade_changes.len(),
            magnitude = expected_scope.magnitude.name(),
            "impact analysis complete"
        );

        Ok(ImpactAnalysis {
            direct_changes,
            cascade_changes,
            preservation_rules,
            validation_checks: default_checks(),
            expected_scope,
        })
    }
}

impl Default for ImpactAnalyzer {
    fn default() -> Self {
        Self::new(IdiomTable::with_defaults())
    }
}

/// The named checks the gate runs, in order
fn default_checks() -> Vec<ValidationCheck> {
    vec![
        ValidationCheck::new("scope", "changed-line delta stays within the tier threshold"),
        ValidationCheck::new("deletion", "no more than half the original lines are removed"),
        ValidationCheck::new(
            "preservation",
            "critical rule match-counts are equal in original and generated content",
        ),
        ValidationCheck::new(
            "intent-reflection",
            "every requested property is evidenced in the generated content",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::{
        ChangeMagnitude, ChangeRequest, ChangeType, ElementDescriptor, PropertyDelta, VisualEdit,
    };
    use ace_repo::ThemeTable;

    const SOURCE: &str = r#"
import React from 'react';

export function Title() {
    return <h1 className="text-sm">Hello</h1>;
}
"#;

    fn font_size_intent(target: &TargetComponent) -> ChangeIntent {
        let edit = VisualEdit::new(
            ElementDescriptor::new("h1"),
            vec![PropertyDelta::styling("font-size", "14px", "16px")],
        );
        ChangeIntent::new(
            ChangeType::Styling,
            "bump title size",
            ChangeRequest::Visual(edit),
            Some(target.clone()),
            0.85,
        )
    }

    fn hydrated_target() -> TargetComponent {
        TargetComponent::new("Title", "src/Title.tsx", StylingIdiom::UtilityClasses)
            .with_content(SOURCE)
    }

    #[test]
    fn utility_font_size_maps_with_high_confidence() {
        let analyzer = ImpactAnalyzer::default();
        let model = RepoModel::new().with_theme(ThemeTable::with_defaults());
        let target = hydrated_target();
        let intent = font_size_intent(&target);

        let analysis = analyzer.analyze(&intent, &target, &model).unwrap();

        assert_eq!(analysis.direct_changes.len(), 1);
        assert_eq!(analysis.direct_changes[0].replacement, "text-base");
        assert!(analysis.direct_changes[0].confidence >= 0.9);
        assert_eq!(analysis.expected_scope.magnitude, ChangeMagnitude::Minimal);
    }

    #[test]
    fn analysis_is_idempotent() {
        let analyzer = ImpactAnalyzer::default();
        let model = RepoModel::new().with_theme(ThemeTable::with_defaults());
        let target = hydrated_target();
        let intent = font_size_intent(&target);

        let first = analyzer.analyze(&intent, &target, &model).unwrap();
        let second = analyzer.analyze(&intent, &target, &model).unwrap();

        assert_eq!(first.expected_scope, second.expected_scope);
        assert_eq!(
            first
                .preservation_rules
                .iter()
                .map(|r| (&r.name, &r.pattern))
                .collect::<Vec<_>>(),
            second
                .preservation_rules
                .iter()
                .map(|r| (&r.name, &r.pattern))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn missing_content_is_an_error() {
        let analyzer = ImpactAnalyzer::default();
        let model = RepoModel::new();
        let target =
            TargetComponent::new("Title", "src/Title.tsx", StylingIdiom::UtilityClasses);
        let intent = font_size_intent(&target);

        let err = analyzer.analyze(&intent, &target, &model).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingContent(_)));
    }

    #[test]
    fn token_cascade_grows_expected_scope() {
        let analyzer = ImpactAnalyzer::default();
        let model = RepoModel::new()
            .with_theme(ThemeTable::with_defaults())
            .with_design_tokens();
        let target = hydrated_target();
        let intent = font_size_intent(&target);

        let analysis = analyzer.analyze(&intent, &target, &model).unwrap();

        assert_eq!(analysis.required_cascades().count(), 1);
        // 1 direct * 2 + 1 required cascade * 3
        assert_eq!(analysis.expected_scope.lines, 5);
        assert_eq!(analysis.expected_scope.files, 2);
    }

    #[test]
    fn preservation_rules_come_from_content_cues() {
        let analyzer = ImpactAnalyzer::default();
        let model = RepoModel::new();
        let target = hydrated_target();
        let intent = font_size_intent(&target);

        let analysis = analyzer.analyze(&intent, &target, &model).unwrap();
        let names: Vec<&str> = analysis
            .preservation_rules
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        assert!(names.contains(&"preserve exports"));
        assert!(names.contains(&"preserve imports"));
        assert!(!names.contains(&"preserve props interface"));
        assert!(names.contains(&"preserve functionality"));
    }
}
