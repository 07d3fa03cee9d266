//! Visual-edit target matching
//!
//! Exact selector lookup against the repository model's table, with a
//! scored tag-and-class fallback across all indexed components.

use ace_model::{ElementDescriptor, TargetComponent};
use ace_repo::RepoModel;

/// A scored fallback candidate
#[derive(Debug, Clone)]
pub struct SelectorMatch<'a> {
    /// Matching component
    pub component: &'a TargetComponent,
    /// Match quality in [0, 1]
    pub quality: f64,
}

/// Exact selector lookup
#[inline]
#[must_use]
pub fn exact<'a>(model: &'a RepoModel, selector: &str) -> Option<&'a TargetComponent> {
    model.lookup_selector(selector)
}

/// Score every indexed component against the element descriptor and return
/// at most `top_n` candidates, best first
#[must_use]
pub fn fallback_candidates<'a>(
    model: &'a RepoModel,
    element: &ElementDescriptor,
    top_n: usize,
) -> Vec<SelectorMatch<'a>> {
    let mut scored: Vec<SelectorMatch<'a>> = model
        .components()
        .iter()
        .filter_map(|component| {
            let quality = match_quality(component, element);
            (quality > 0.0).then_some(SelectorMatch { component, quality })
        })
        .collect();

    scored.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_n);
    scored
}

/// Quality of one component as a match for the element
///
/// Class names found in the component's cached content weigh most; a class
/// or tag echoing the component's name also counts. Tag presence alone is a
/// weak signal.
fn match_quality(component: &TargetComponent, element: &ElementDescriptor) -> f64 {
    let mut score: f64 = 0.0;
    let name = component.name.to_lowercase();
    let content = component.content.as_deref().unwrap_or("");

    for class in &element.classes {
        let class = class.to_lowercase();
        if !content.is_empty() && content.contains(&class) {
            score += 0.4;
        }
        if class.replace(['-', '_'], "").contains(&name) {
            score += 0.3;
        }
    }

    if !element.tag.is_empty() {
        if name == element.tag.to_lowercase() {
            score += 0.3;
        }
        if !content.is_empty() && content.contains(&format!("<{}", element.tag.to_lowercase())) {
            score += 0.2;
        }
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::StylingIdiom;

    fn model() -> RepoModel {
        RepoModel::new()
            .with_component(
                TargetComponent::new("Header", "src/Header.tsx", StylingIdiom::UtilityClasses)
                    .with_content(r#"<header className="site-header dark">"#),
            )
            .with_component(
                TargetComponent::new("Footer", "src/Footer.tsx", StylingIdiom::UtilityClasses)
                    .with_content(r#"<footer className="site-footer">"#),
            )
            .with_component(TargetComponent::new(
                "Button",
                "src/Button.tsx",
                StylingIdiom::UtilityClasses,
            ))
            .with_selector("header.site-header", "Header")
    }

    #[test]
    fn exact_lookup_wins() {
        let model = model();
        let hit = exact(&model, "header.site-header").unwrap();
        assert_eq!(hit.name, "Header");
    }

    #[test]
    fn class_content_match_ranks_first() {
        let model = model();
        let element = ElementDescriptor::new("header")
            .with_classes(vec!["site-header".to_string()]);

        let candidates = fallback_candidates(&model, &element, 5);
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].component.name, "Header");
        assert!(candidates[0].quality >= 0.4);
    }

    #[test]
    fn tag_name_echo_scores() {
        let model = model();
        let element = ElementDescriptor::new("button");
        let candidates = fallback_candidates(&model, &element, 5);
        assert_eq!(candidates[0].component.name, "Button");
    }

    #[test]
    fn top_n_truncates() {
        let model = model();
        let element = ElementDescriptor::new("header")
            .with_classes(vec!["site-header".to_string(), "site-footer".to_string()]);
        let candidates = fallback_candidates(&model, &element, 1);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn no_signal_means_no_candidates() {
        let model = model();
        let element = ElementDescriptor::new("video");
        assert!(fallback_candidates(&model, &element, 5).is_empty());
    }
}
