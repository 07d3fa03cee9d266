//! Symbolic repository model
//!
//! The read-only index of a codebase's UI components, their styling
//! conventions, dependency edges, and the selector lookup table. Built and
//! owned outside the engine; the engine only looks things up.

use crate::index::SelectorIndex;
use crate::tokens::ThemeTable;
use ace_model::TargetComponent;

/// Read-only repository model
#[derive(Debug, Default)]
pub struct RepoModel {
    components: Vec<TargetComponent>,
    selectors: SelectorIndex,
    theme: ThemeTable,
    has_design_tokens: bool,
}

impl RepoModel {
    /// Create an empty model
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a theme table
    #[inline]
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeTable) -> Self {
        self.theme = theme;
        self
    }

    /// Mark the repository as carrying a shared design-token system
    #[inline]
    #[must_use]
    pub fn with_design_tokens(mut self) -> Self {
        self.has_design_tokens = true;
        self
    }

    /// Add a component record
    #[must_use]
    pub fn with_component(mut self, component: TargetComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Map a selector to a component name
    #[must_use]
    pub fn with_selector(self, selector: impl Into<String>, component: impl Into<String>) -> Self {
        self.selectors.insert(selector, component);
        self
    }

    /// All indexed components
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[TargetComponent] {
        &self.components
    }

    /// Look a component up by name
    #[must_use]
    pub fn component_named(&self, name: &str) -> Option<&TargetComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Exact selector lookup, resolving through to the component record
    #[must_use]
    pub fn lookup_selector(&self, selector: &str) -> Option<&TargetComponent> {
        let name = self.selectors.lookup(selector)?;
        self.component_named(&name)
    }

    /// The utility theme table
    #[inline]
    #[must_use]
    pub fn theme(&self) -> &ThemeTable {
        &self.theme
    }

    /// Whether the repository has a shared design-token system
    #[inline]
    #[must_use]
    pub fn has_design_tokens(&self) -> bool {
        self.has_design_tokens
    }

    /// Number of indexed components
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the model indexes no components
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::StylingIdiom;

    fn sample_model() -> RepoModel {
        RepoModel::new()
            .with_component(TargetComponent::new(
                "Header",
                "src/components/Header.tsx",
                StylingIdiom::UtilityClasses,
            ))
            .with_component(TargetComponent::new(
                "Footer",
                "src/components/Footer.tsx",
                StylingIdiom::UtilityClasses,
            ))
            .with_selector(".site-header", "Header")
    }

    #[test]
    fn selector_resolves_to_component() {
        let model = sample_model();
        let header = model.lookup_selector(".site-header").unwrap();
        assert_eq!(header.name, "Header");
    }

    #[test]
    fn unknown_selector_is_none() {
        let model = sample_model();
        assert!(model.lookup_selector(".missing").is_none());
    }

    #[test]
    fn component_lookup_by_name() {
        let model = sample_model();
        assert!(model.component_named("Footer").is_some());
        assert!(model.component_named("Sidebar").is_none());
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn design_token_flag() {
        let model = RepoModel::new().with_design_tokens();
        assert!(model.has_design_tokens());
        assert!(!sample_model().has_design_tokens());
    }
}
