//! Validation gate
//!
//! Scores generated content against scope, deletion, preservation, and
//! intent-reflection constraints, in that order, short-circuiting on the
//! first critical violation. Nothing leaves the engine without passing here.

use crate::config::EngineConfig;
use crate::diff;
use ace_analyzer::{to_camel_case, utility_prefix};
use ace_model::{
    ChangeIntent, ImpactAnalysis, ChangeMagnitude, IssueKind, ValidationIssue, ValidationLevel,
    ValidationMetrics, ValidationResult,
};

/// The validation gate
#[derive(Debug, Clone)]
pub struct ValidationGate {
    scope_multiplier: f64,
    minimal_line_cap: usize,
    deletion_cap: f64,
}

impl ValidationGate {
    /// Gate with thresholds from the engine configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            scope_multiplier: config.scope_multiplier,
            minimal_line_cap: config.minimal_line_cap,
            deletion_cap: config.deletion_cap,
        }
    }

    /// Validate generated content against the original
    ///
    /// All four checks run at every level; the level only adds advisory
    /// warnings at higher strictness. `confidence` is carried through from
    /// the executing strategy.
    #[must_use]
    pub fn validate(
        &self,
        original: &str,
        generated: &str,
        intent: &ChangeIntent,
        confidence: f64,
        impact: &ImpactAnalysis,
        level: ValidationLevel,
    ) -> ValidationResult {
        let metrics = diff::line_metrics(original, generated);
        let mut warnings = Vec::new();

        // 1. Scope
        if let Some(issue) = self.check_scope(&metrics, impact) {
            return ValidationResult::new(confidence, vec![issue], warnings, metrics);
        }

        // 2. Excessive deletion
        if let Some(issue) = self.check_deletion(original, &metrics) {
            return ValidationResult::new(confidence, vec![issue], warnings, metrics);
        }

        // 3. Preservation
        for rule in &impact.preservation_rules {
            if rule.holds_between(original, generated) {
                continue;
            }
            let message = format!(
                "rule '{}' count changed: {} in original, {} in generated",
                rule.name,
                rule.match_count(original),
                rule.match_count(generated)
            );
            if rule.critical {
                let issue = ValidationIssue::error(IssueKind::PreservationViolated, message);
                return ValidationResult::new(confidence, vec![issue], warnings, metrics);
            }
            warnings.push(message);
        }

        // 4. Intent reflection
        if let Some(issue) = check_reflection(generated, intent, impact) {
            return ValidationResult::new(confidence, vec![issue], warnings, metrics);
        }

        if level >= ValidationLevel::Strict && metrics.change_ratio > 0.25 {
            warnings.push(format!(
                "change ratio {:.2} is high for this tier",
                metrics.change_ratio
            ));
        }
        if level == ValidationLevel::Paranoid && metrics.complexity_delta != 0.0 {
            warnings.push(format!(
                "structural complexity shifted by {:+.0}",
                metrics.complexity_delta
            ));
        }

        ValidationResult::new(confidence, Vec::new(), warnings, metrics)
    }

    fn check_scope(
        &self,
        metrics: &ValidationMetrics,
        impact: &ImpactAnalysis,
    ) -> Option<ValidationIssue> {
        // A floor of 2 expected lines keeps estimate-free (instruction-only)
        // intents from failing on any edit at all.
        let expected = impact.expected_scope.lines.max(2);
        let allowed = (expected as f64 * self.scope_multiplier).ceil() as usize;

        if metrics.lines_changed > allowed {
            return Some(ValidationIssue::error(
                IssueKind::ScopeExceeded,
                format!(
                    "{} lines changed, at most {} allowed ({}x of {} expected)",
                    metrics.lines_changed, allowed, self.scope_multiplier, expected
                ),
            ));
        }

        if impact.expected_scope.magnitude == ChangeMagnitude::Minimal
            && metrics.lines_changed > self.minimal_line_cap
        {
            return Some(ValidationIssue::error(
                IssueKind::ScopeExceeded,
                format!(
                    "{} lines changed exceeds the {}-line cap for a minimal change",
                    metrics.lines_changed, self.minimal_line_cap
                ),
            ));
        }

        None
    }

    fn check_deletion(
        &self,
        original: &str,
        metrics: &ValidationMetrics,
    ) -> Option<ValidationIssue> {
        let original_lines = original.lines().filter(|l| !l.trim().is_empty()).count();
        if original_lines == 0 {
            return None;
        }
        let deleted_share = metrics.lines_removed as f64 / original_lines as f64;
        if deleted_share > self.deletion_cap {
            return Some(ValidationIssue::error(
                IssueKind::ExcessiveDeletion,
                format!(
                    "{:.0}% of original lines deleted (cap {:.0}%)",
                    deleted_share * 100.0,
                    self.deletion_cap * 100.0
                ),
            ));
        }
        None
    }
}

/// Evidence check for every requested property delta
///
/// Accepted evidence, in order: the property name itself, its camelCase
/// form, the analyzer's mapped replacement, the requested value, or the
/// property's utility prefix.
fn check_reflection(
    generated: &str,
    intent: &ChangeIntent,
    impact: &ImpactAnalysis,
) -> Option<ValidationIssue> {
    let lowered = generated.to_lowercase();

    for delta in intent.request.deltas() {
        let property = delta.property.to_lowercase();

        if lowered.contains(&property) {
            continue;
        }
        if lowered.contains(&to_camel_case(&property).to_lowercase()) && property.contains('-') {
            continue;
        }
        let mapped = impact
            .direct_changes
            .iter()
            .find(|c| c.property.eq_ignore_ascii_case(&delta.property))
            .map(|c| c.replacement.to_lowercase());
        if mapped.as_deref().is_some_and(|m| lowered.contains(m)) {
            continue;
        }
        if lowered.contains(&delta.after.to_lowercase()) {
            continue;
        }
        if utility_prefix(&property)
            .is_some_and(|prefix| lowered.contains(&format!("{prefix}-")))
        {
            continue;
        }

        return Some(ValidationIssue::error(
            IssueKind::IntentNotReflected,
            format!("no evidence of the requested '{}' change", delta.property),
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::{
        ChangeRequest, ChangeType, DirectChange, ElementDescriptor, ExpectedScope,
        PreservationRule, PropertyDelta, VisualEdit,
    };

    const ORIGINAL: &str = r#"import React from 'react';

export function Title() {
    return <h1 className="text-sm">Hello</h1>;
}
"#;

    fn gate() -> ValidationGate {
        ValidationGate::from_config(&EngineConfig::default())
    }

    fn font_size_intent() -> ChangeIntent {
        let edit = VisualEdit::new(
            ElementDescriptor::new("h1"),
            vec![PropertyDelta::styling("font-size", "14px", "16px")],
        );
        ChangeIntent::new(
            ChangeType::Styling,
            "bump title",
            ChangeRequest::Visual(edit),
            None,
            0.85,
        )
    }

    fn impact() -> ImpactAnalysis {
        ImpactAnalysis {
            direct_changes: vec![DirectChange::new(
                "font-size",
                Some("14px".to_string()),
                "text-base",
                0.9,
            )],
            cascade_changes: vec![],
            preservation_rules: vec![PreservationRule::critical(
                "preserve exports",
                r"(?m)^\s*export\s",
            )],
            validation_checks: vec![],
            expected_scope: ExpectedScope::from_counts(1, 0),
        }
    }

    #[test]
    fn clean_change_passes() {
        let generated = ORIGINAL.replace("text-sm", "text-base");
        let result = gate().validate(
            ORIGINAL,
            &generated,
            &font_size_intent(),
            0.85,
            &impact(),
            ValidationLevel::Standard,
        );

        assert!(result.passed, "issues: {:?}", result.issues);
        assert_eq!(result.metrics.lines_changed, 2);
    }

    #[test]
    fn identical_content_passes_with_zero_changes() {
        let result = gate().validate(
            ORIGINAL,
            ORIGINAL,
            &font_size_intent(),
            0.85,
            &impact(),
            ValidationLevel::Standard,
        );

        // The original's own utility prefix is accepted reflection evidence.
        assert!(result.passed, "issues: {:?}", result.issues);
        assert_eq!(result.metrics.lines_changed, 0);
    }

    #[test]
    fn lost_export_fails_preservation() {
        let generated = ORIGINAL.replace("export function", "function");
        let result = gate().validate(
            ORIGINAL,
            &generated,
            &font_size_intent(),
            0.85,
            &impact(),
            ValidationLevel::Standard,
        );

        assert!(!result.passed);
        assert_eq!(result.issues[0].kind, IssueKind::PreservationViolated);
    }

    #[test]
    fn rewrite_fails_scope() {
        let generated = "const x = 1;\nconst y = 2;\nconst z = 3;\nconst w = 4;\n\
                         const v = 5;\nconst u = 6;\nconst t = 7;\nexport { x };\n";
        let result = gate().validate(
            ORIGINAL,
            generated,
            &font_size_intent(),
            0.85,
            &impact(),
            ValidationLevel::Standard,
        );

        assert!(!result.passed);
        assert_eq!(result.issues[0].kind, IssueKind::ScopeExceeded);
    }

    #[test]
    fn heavy_deletion_fails() {
        // Same line count budget but most of the original gone.
        let generated = "import React from 'react';\n";
        let mut wide_impact = impact();
        wide_impact.expected_scope = ExpectedScope::from_counts(10, 2);
        let result = gate().validate(
            ORIGINAL,
            generated,
            &font_size_intent(),
            0.85,
            &wide_impact,
            ValidationLevel::Standard,
        );

        assert!(!result.passed);
        assert_eq!(result.issues[0].kind, IssueKind::ExcessiveDeletion);
    }

    #[test]
    fn unreflected_intent_fails() {
        // Change something unrelated; no font-size evidence anywhere.
        let original = "export const greeting = 'hello';\nconst pad = 1;\n";
        let generated = "export const greeting = 'goodbye';\nconst pad = 1;\n";
        let mut no_proxy_impact = impact();
        no_proxy_impact.preservation_rules = vec![];
        let result = gate().validate(
            original,
            generated,
            &font_size_intent(),
            0.85,
            &no_proxy_impact,
            ValidationLevel::Strict,
        );

        assert!(!result.passed);
        assert_eq!(result.issues[0].kind, IssueKind::IntentNotReflected);
    }

    #[test]
    fn paranoid_level_warns_on_complexity_shift() {
        let generated = ORIGINAL.replace(
            "return <h1 className=\"text-sm\">Hello</h1>;",
            "if (true) { return <h1 className=\"text-base\">Hello</h1>; }",
        );
        let result = gate().validate(
            ORIGINAL,
            &generated,
            &font_size_intent(),
            0.85,
            &impact(),
            ValidationLevel::Paranoid,
        );

        assert!(result.passed);
        assert!(!result.warnings.is_empty());
    }
}
