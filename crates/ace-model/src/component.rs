//! Target components
//!
//! A [`TargetComponent`] is a node from the symbolic repository model. The
//! engine only ever looks these up; it never mutates the model they came from.

use serde::{Deserialize, Serialize};

/// Styling idiom used by a component's source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StylingIdiom {
    /// Utility-class system (atomic class tokens in markup)
    UtilityClasses,
    /// Scoped styles (camelCase properties, style objects)
    ScopedStyles,
    /// Component-local style modules
    ComponentStyles,
    /// Plain external stylesheets (kebab-case properties)
    Stylesheet,
}

impl StylingIdiom {
    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StylingIdiom::UtilityClasses => "utility-classes",
            StylingIdiom::ScopedStyles => "scoped-styles",
            StylingIdiom::ComponentStyles => "component-styles",
            StylingIdiom::Stylesheet => "stylesheet",
        }
    }
}

/// Structural complexity of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    /// Small, self-contained
    Simple,
    /// Some internal state or composition
    Moderate,
    /// Heavy state, many children, wide prop surface
    Complex,
}

impl ComplexityTier {
    /// Confidence multiplier applied when resolving against this component
    ///
    /// Simpler components are easier to modify safely, so resolution
    /// confidence is discounted as complexity rises.
    #[inline]
    #[must_use]
    pub fn confidence_discount(&self) -> f64 {
        match self {
            ComplexityTier::Simple => 1.0,
            ComplexityTier::Moderate => 0.9,
            ComplexityTier::Complex => 0.75,
        }
    }
}

/// A component from the symbolic repository model
///
/// `content` is populated lazily by the execution's content cache and is only
/// valid for the duration of a single execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetComponent {
    /// Component name
    pub name: String,
    /// Source file path
    pub file_path: String,
    /// Cached file content, when already fetched
    pub content: Option<String>,
    /// Styling idiom of the source file
    pub styling: StylingIdiom,
    /// Complexity tier
    pub complexity: ComplexityTier,
    /// Names of components that import this one
    pub dependents: Vec<String>,
    /// Names of components this one imports
    pub dependencies: Vec<String>,
    /// Whether the component is exported for reuse
    pub exported: bool,
}

impl TargetComponent {
    /// Create a component record
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, file_path: impl Into<String>, styling: StylingIdiom) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            content: None,
            styling,
            complexity: ComplexityTier::Simple,
            dependents: Vec::new(),
            dependencies: Vec::new(),
            exported: true,
        }
    }

    /// With cached content
    #[inline]
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// With complexity tier
    #[inline]
    #[must_use]
    pub fn with_complexity(mut self, complexity: ComplexityTier) -> Self {
        self.complexity = complexity;
        self
    }

    /// With dependent component names
    #[inline]
    #[must_use]
    pub fn with_dependents(mut self, dependents: Vec<String>) -> Self {
        self.dependents = dependents;
        self
    }

    /// With dependency component names
    #[inline]
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Mark as internal (not exported for reuse)
    #[inline]
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Whether any other component imports this one
    #[inline]
    #[must_use]
    pub fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }
}
