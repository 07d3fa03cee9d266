//! Intent resolver
//!
//! Maps a change request onto a classified, optionally target-bound
//! [`ChangeIntent`]. Resolution never errors: an unresolved target is a
//! valid low-confidence outcome, not a failure.

use crate::classify;
use crate::selector;
use ace_model::{
    ChangeIntent, ChangeRequest, ChangeType, DeltaCategory, NaturalLanguageEdit, RiskTier,
    ScopeBreadth, TargetComponent, VisualEdit,
};
use ace_repo::RepoModel;

/// Default cap on fallback candidates considered for a visual edit
pub const DEFAULT_CANDIDATE_CAP: usize = 5;

/// Lower clamp bound for natural-language confidence
pub const NL_CONFIDENCE_FLOOR: f64 = 0.3;
/// Upper clamp bound for natural-language confidence
pub const NL_CONFIDENCE_CEILING: f64 = 0.9;

/// The intent resolver
#[derive(Debug, Clone)]
pub struct IntentResolver {
    candidate_cap: usize,
}

impl IntentResolver {
    /// Create a resolver with the default candidate cap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidate_cap: DEFAULT_CANDIDATE_CAP,
        }
    }

    /// With a custom candidate cap
    #[inline]
    #[must_use]
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap.max(1);
        self
    }

    /// Resolve a request against the repository model
    #[must_use]
    pub fn resolve(&self, request: &ChangeRequest, model: &RepoModel) -> ChangeIntent {
        let intent = match request {
            ChangeRequest::Visual(edit) => self.resolve_visual(request, edit, model),
            ChangeRequest::NaturalLanguage(edit) => self.resolve_natural(request, edit, model),
        };

        tracing::debug!(
            id = %intent.id,
            change_type = intent.change_type.name(),
            resolved = intent.is_resolved(),
            confidence = intent.confidence,
            "intent resolved"
        );
        intent
    }

    fn resolve_visual(
        &self,
        request: &ChangeRequest,
        edit: &VisualEdit,
        model: &RepoModel,
    ) -> ChangeIntent {
        let change_type = dominant_delta_type(edit);

        let (target, quality) = match edit
            .element
            .selector
            .as_deref()
            .and_then(|s| selector::exact(model, s))
        {
            Some(component) => (Some(component.clone()), 1.0),
            None => {
                let candidates =
                    selector::fallback_candidates(model, &edit.element, self.candidate_cap);
                match candidates.first() {
                    Some(best) => (Some(best.component.clone()), best.quality),
                    None => (None, 0.0),
                }
            }
        };

        let (scope, confidence) = match &target {
            Some(component) => {
                let discount = component.complexity.confidence_discount();
                (ScopeBreadth::Narrow, (0.4 + 0.55 * quality) * discount)
            }
            None => (ScopeBreadth::Broad, 0.35),
        };

        let description = request.summary();
        ChangeIntent::new(change_type, description, request.clone(), target, confidence)
            .with_scope(scope)
            .with_risk(risk_for(scope))
    }

    fn resolve_natural(
        &self,
        request: &ChangeRequest,
        edit: &NaturalLanguageEdit,
        model: &RepoModel,
    ) -> ChangeIntent {
        let change_type = classify::change_type(&edit.instruction);
        let scope = classify::scope_breadth(&edit.instruction);
        let specificity = classify::specificity(&edit.instruction);

        let target = self.natural_target(edit, model);

        let mut confidence = 0.35 + 0.2 * specificity;
        if target.is_some() {
            confidence += 0.25;
        }
        if edit.target_hint.is_some() {
            confidence += 0.05;
        }
        let confidence = confidence.clamp(NL_CONFIDENCE_FLOOR, NL_CONFIDENCE_CEILING);

        let scope = if target.is_none() && scope == ScopeBreadth::Narrow {
            // Unanchored narrow requests still need the broad-scope path.
            ScopeBreadth::Broad
        } else {
            scope
        };

        ChangeIntent::new(
            change_type,
            edit.instruction.clone(),
            request.clone(),
            target,
            confidence,
        )
        .with_scope(scope)
        .with_risk(risk_for(scope))
    }

    /// Target resolution order for natural language: explicit hint (as a
    /// selector, then as a name), then common UI-region keyword
    fn natural_target(
        &self,
        edit: &NaturalLanguageEdit,
        model: &RepoModel,
    ) -> Option<TargetComponent> {
        if let Some(hint) = edit.target_hint.as_deref() {
            if let Some(component) = selector::exact(model, hint) {
                return Some(component.clone());
            }
            if let Some(component) = model.component_named(hint) {
                return Some(component.clone());
            }
            let lowered = hint.to_lowercase();
            if let Some(component) = model
                .components()
                .iter()
                .find(|c| c.name.to_lowercase().contains(&lowered))
            {
                return Some(component.clone());
            }
        }

        let region = classify::region_hint(&edit.instruction)?;
        model
            .components()
            .iter()
            .find(|c| c.name.to_lowercase().contains(region))
            .cloned()
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Change type implied by the request's delta categories (majority wins)
fn dominant_delta_type(edit: &VisualEdit) -> ChangeType {
    let mut styling = 0usize;
    let mut content = 0usize;
    let mut layout = 0usize;
    let mut structure = 0usize;
    for delta in &edit.deltas {
        match delta.category {
            DeltaCategory::Styling => styling += 1,
            DeltaCategory::Content => content += 1,
            DeltaCategory::Layout => layout += 1,
            DeltaCategory::Structure => structure += 1,
        }
    }

    let max = styling.max(content).max(layout).max(structure);
    if max == 0 {
        ChangeType::General
    } else if styling == max {
        ChangeType::Styling
    } else if content == max {
        ChangeType::Content
    } else if layout == max {
        ChangeType::Layout
    } else {
        ChangeType::Structure
    }
}

fn risk_for(scope: ScopeBreadth) -> RiskTier {
    match scope {
        ScopeBreadth::Narrow => RiskTier::Low,
        ScopeBreadth::Moderate => RiskTier::Medium,
        ScopeBreadth::Broad => RiskTier::High,
    }
}
