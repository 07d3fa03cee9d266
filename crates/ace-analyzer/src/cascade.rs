//! Cascade-change signals
//!
//! Advisory, never auto-applied: they only influence scope estimation (when
//! required) and surface in the analysis for callers to act on.

use ace_model::{CascadeChange, PropertyDelta, TargetComponent};
use ace_repo::RepoModel;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Properties managed by shared design-token systems
static TOKEN_MANAGED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "color",
        "background-color",
        "font-size",
        "margin",
        "margin-top",
        "margin-bottom",
        "margin-left",
        "margin-right",
        "padding",
        "padding-top",
        "padding-bottom",
        "padding-left",
        "padding-right",
        "gap",
    ]
    .into_iter()
    .collect()
});

/// Derive cascade signals for a change at `target`
#[must_use]
pub fn signals_for(
    deltas: &[PropertyDelta],
    target: &TargetComponent,
    model: &RepoModel,
) -> Vec<CascadeChange> {
    let mut signals = Vec::new();

    if target.has_dependents() {
        let importers = target.dependents.join(", ");
        signals.push(
            CascadeChange::advisory(
                format!("parent container may need adjustment (imported by: {importers})"),
                0.4,
            )
            .on_component(target.dependents[0].clone()),
        );
    }

    let touches_tokens = deltas
        .iter()
        .any(|d| TOKEN_MANAGED.contains(d.property.to_lowercase().as_str()));
    if touches_tokens && model.has_design_tokens() {
        signals.push(CascadeChange::required(
            "design-token consistency: changed value should come from the shared token scale",
            0.8,
        ));
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::StylingIdiom;

    fn delta(property: &str) -> PropertyDelta {
        PropertyDelta::styling(property, "a", "b")
    }

    fn component(dependents: Vec<String>) -> TargetComponent {
        TargetComponent::new("Card", "src/Card.tsx", StylingIdiom::UtilityClasses)
            .with_dependents(dependents)
    }

    #[test]
    fn dependents_produce_parent_signal() {
        let model = RepoModel::new();
        let target = component(vec!["Grid".to_string()]);
        let signals = signals_for(&[delta("color")], &target, &model);

        assert_eq!(signals.len(), 1);
        assert!(!signals[0].required);
        assert!(signals[0].description.contains("Grid"));
    }

    #[test]
    fn token_properties_require_consistency_when_repo_has_tokens() {
        let model = RepoModel::new().with_design_tokens();
        let target = component(vec![]);
        let signals = signals_for(&[delta("font-size")], &target, &model);

        assert_eq!(signals.len(), 1);
        assert!(signals[0].required);
    }

    #[test]
    fn no_token_signal_without_token_system() {
        let model = RepoModel::new();
        let target = component(vec![]);
        let signals = signals_for(&[delta("font-size")], &target, &model);
        assert!(signals.is_empty());
    }

    #[test]
    fn non_token_property_is_quiet() {
        let model = RepoModel::new().with_design_tokens();
        let target = component(vec![]);
        let signals = signals_for(&[delta("display")], &target, &model);
        assert!(signals.is_empty());
    }
}
