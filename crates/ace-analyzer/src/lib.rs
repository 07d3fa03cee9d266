//! ACE impact analysis
//!
//! Converts a resolved [`ChangeIntent`](ace_model::ChangeIntent) into an
//! [`ImpactAnalysis`](ace_model::ImpactAnalysis): concrete direct changes in
//! the target's styling idiom, advisory cascade signals, preservation rules
//! derived from shallow structural cues, and the expected-scope estimate.
//!
//! Idiom handling is a capability-tagged strategy table ([`IdiomTable`])
//! injected into the analyzer; there is no ambient per-language registry.

pub mod analyzer;
pub mod cascade;
pub mod idiom;
pub mod preservation;

// Re-exports for convenience
pub use analyzer::{AnalyzerError, ImpactAnalyzer};
pub use idiom::{
    CamelCaseStrategy, IdiomStrategy, IdiomTable, StylesheetStrategy, UtilityClassStrategy,
    property_confidence, to_camel_case, utility_prefix,
};
pub use preservation::rules_for;
