//! Change intents
//!
//! A [`ChangeIntent`] is the resolved, structured form of a request: a
//! classification, an optional bound target, and the resolver's confidence.

use crate::component::TargetComponent;
use crate::request::ChangeRequest;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique intent identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IntentId(pub Ulid);

impl IntentId {
    /// Generate a new intent ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IntentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a requested change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Text or media content
    Content,
    /// Colors, sizes, spacing
    Styling,
    /// Positioning, flow, alignment
    Layout,
    /// Adding/removing/rearranging elements
    Structure,
    /// Interactivity and handlers
    Behavior,
    /// Unclassified
    General,
}

impl ChangeType {
    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChangeType::Content => "content",
            ChangeType::Styling => "styling",
            ChangeType::Layout => "layout",
            ChangeType::Structure => "structure",
            ChangeType::Behavior => "behavior",
            ChangeType::General => "general",
        }
    }
}

/// Breadth of the requested change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScopeBreadth {
    /// One element or component
    Narrow,
    /// A component and its immediate surroundings
    Moderate,
    /// Site-wide or unanchored
    Broad,
}

/// Risk tier for a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Cosmetic, easily reverted
    Low,
    /// Localized behavioral surface
    Medium,
    /// Wide blast radius
    High,
    /// Structural or cross-cutting
    Critical,
}

/// Priority tier for scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Background work
    Low,
    /// Default
    Normal,
    /// User is waiting
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

/// Resolved change intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeIntent {
    /// Intent identifier
    pub id: IntentId,
    /// Change classification
    pub change_type: ChangeType,
    /// Human-readable description
    pub description: String,
    /// The originating request
    pub request: ChangeRequest,
    /// Bound target component; `None` means broad/unresolved scope
    pub target: Option<TargetComponent>,
    /// Inferred breadth
    pub scope: ScopeBreadth,
    /// Resolver confidence in [0, 1]
    pub confidence: f64,
    /// Risk tier
    pub risk: RiskTier,
    /// Priority tier
    pub priority: Priority,
}

impl ChangeIntent {
    /// Create an intent bound to a target
    #[must_use]
    pub fn new(
        change_type: ChangeType,
        description: impl Into<String>,
        request: ChangeRequest,
        target: Option<TargetComponent>,
        confidence: f64,
    ) -> Self {
        Self {
            id: IntentId::new(),
            change_type,
            description: description.into(),
            request,
            target,
            scope: ScopeBreadth::Narrow,
            confidence: confidence.clamp(0.0, 1.0),
            risk: RiskTier::Low,
            priority: Priority::Normal,
        }
    }

    /// With scope breadth
    #[inline]
    #[must_use]
    pub fn with_scope(mut self, scope: ScopeBreadth) -> Self {
        self.scope = scope;
        self
    }

    /// With risk tier
    #[inline]
    #[must_use]
    pub fn with_risk(mut self, risk: RiskTier) -> Self {
        self.risk = risk;
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the intent resolved to a single target component
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::NaturalLanguageEdit;

    fn nl_request(text: &str) -> ChangeRequest {
        ChangeRequest::NaturalLanguage(NaturalLanguageEdit::new(text))
    }

    #[test]
    fn intent_ids_are_unique() {
        assert_ne!(IntentId::new(), IntentId::new());
    }

    #[test]
    fn confidence_is_clamped() {
        let intent = ChangeIntent::new(
            ChangeType::Styling,
            "recolor",
            nl_request("make it blue"),
            None,
            1.4,
        );
        assert_eq!(intent.confidence, 1.0);
    }

    #[test]
    fn unresolved_intent() {
        let intent = ChangeIntent::new(
            ChangeType::General,
            "improve",
            nl_request("make it better"),
            None,
            0.3,
        )
        .with_scope(ScopeBreadth::Broad);

        assert!(!intent.is_resolved());
        assert_eq!(intent.scope, ScopeBreadth::Broad);
    }

    #[test]
    fn change_type_names() {
        assert_eq!(ChangeType::Styling.name(), "styling");
        assert_eq!(ChangeType::General.name(), "general");
    }
}
