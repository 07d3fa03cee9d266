//! ACE data model
//!
//! Shared types for the adaptive change engine:
//! - Change requests (visual edits and natural-language instructions)
//! - Target components from the symbolic repository model
//! - Resolved change intents
//! - Impact analyses (direct changes, cascades, preservation rules, scope)
//! - Confidence assessments and approach tiers
//! - Executable change strategies
//! - File changes and validation results
//!
//! The pipeline flows one way: a [`ChangeRequest`] is resolved into a
//! [`ChangeIntent`], analyzed into an [`ImpactAnalysis`], assessed into a
//! [`ConfidenceAssessment`], executed under a [`ChangeStrategy`], and gated
//! into a [`FileChange`] with a [`ValidationResult`]. Nothing here persists
//! beyond a single execution.

pub mod assessment;
pub mod change;
pub mod component;
pub mod impact;
pub mod intent;
pub mod request;
pub mod strategy;
pub mod validation;

// Re-exports for convenience
pub use assessment::{Approach, AssessorWeights, ConfidenceAssessment, ConfidenceFactors};
pub use change::{FileAction, FileChange};
pub use component::{ComplexityTier, StylingIdiom, TargetComponent};
pub use impact::{
    CascadeChange, ChangeMagnitude, DirectChange, ExpectedScope, ImpactAnalysis, PreservationRule,
    ValidationCheck,
};
pub use intent::{ChangeIntent, ChangeType, IntentId, Priority, RiskTier, ScopeBreadth};
pub use request::{
    ChangeRequest, DeltaCategory, ElementDescriptor, NaturalLanguageEdit, PropertyDelta, VisualEdit,
};
pub use strategy::{ChangeStrategy, StepKind, StrategyStep, ValidationLevel};
pub use validation::{
    IssueKind, IssueSeverity, ValidationIssue, ValidationMetrics, ValidationResult,
};
