//! ACE intent resolution
//!
//! Maps change requests — visual DOM edits or natural-language
//! instructions — onto classified [`ChangeIntent`](ace_model::ChangeIntent)s
//! bound (or not) to a target component from the repository model.
//!
//! Resolution never raises: ambiguity is represented as low confidence and
//! an unset target, which downstream stages handle through the broad-scope
//! path.

pub mod classify;
pub mod resolver;
pub mod selector;

// Re-exports for convenience
pub use resolver::{
    IntentResolver, DEFAULT_CANDIDATE_CAP, NL_CONFIDENCE_CEILING, NL_CONFIDENCE_FLOOR,
};
pub use selector::SelectorMatch;
