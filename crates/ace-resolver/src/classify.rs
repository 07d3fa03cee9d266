//! Instruction classification
//!
//! Keyword pattern sets over lowercased instructions: change-type
//! classification, scope-breadth inference, and specificity scoring.

use ace_model::{ChangeType, ScopeBreadth};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword sets per change type, checked in declaration order
static CHANGE_TYPE_KEYWORDS: &[(ChangeType, &[&str])] = &[
    (
        ChangeType::Styling,
        &[
            "color", "colour", "font", "size", "bold", "italic", "background", "shade", "style",
            "bigger", "smaller", "larger", "dark", "light", "spacing", "border", "round",
        ],
    ),
    (
        ChangeType::Layout,
        &[
            "align", "center", "centre", "position", "move", "layout", "column", "row", "stack",
            "side by side", "spread", "gap between",
        ],
    ),
    (
        ChangeType::Content,
        &[
            "text", "copy", "wording", "label", "title", "headline", "rename", "says", "word",
            "sentence", "paragraph",
        ],
    ),
    (
        ChangeType::Structure,
        &[
            "add ", "remove", "delete", "insert", "new section", "element", "duplicate",
            "reorder", "swap",
        ],
    ),
    (
        ChangeType::Behavior,
        &[
            "click", "hover", "toggle", "open", "close", "submit", "scroll", "animate", "link",
            "navigate",
        ],
    ),
];

/// Qualifiers that widen the scope to the whole application
static BROAD_QUALIFIERS: &[&str] = &[
    "all ", "every", "everywhere", "entire", "whole", "across", "global", "throughout",
    "site-wide", "sitewide",
];

/// Qualifiers that widen the scope to a page or section
static MODERATE_QUALIFIERS: &[&str] = &["page", "screen", "section", "area"];

/// Vagueness markers that reduce instruction specificity
static VAGUE_MARKERS: &[&str] = &[
    "better", "nicer", "improve", "cleaner", "modern", "pop", "fresh", "polish", "prettier",
    "somehow",
];

/// Common UI-region names a target can be inferred from
static REGION_NAMES: &[&str] = &[
    "header", "footer", "hero", "navbar", "navigation", "nav", "sidebar", "button", "card",
    "banner", "menu", "form", "modal", "title",
];

static UNIT_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?\s*(?:px|rem|em|%|vh|vw|pt)").expect("static pattern"));
static COLOR_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#[0-9a-fA-F]{3,8}\b|\brgb\(|\b(?:red|blue|green|white|black|gray|grey|orange|purple|yellow|pink|teal)\b")
        .expect("static pattern")
});
static ALIGNMENT_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:center|centre|left|right|top|bottom|middle)\b").expect("static pattern")
});

/// Classify an instruction into a change type
///
/// The type with the most keyword hits wins; no hits at all classifies as
/// [`ChangeType::General`].
#[must_use]
pub fn change_type(instruction: &str) -> ChangeType {
    let lowered = instruction.to_lowercase();
    let mut best = ChangeType::General;
    let mut best_hits = 0usize;

    for (candidate, keywords) in CHANGE_TYPE_KEYWORDS {
        let mut hits = keywords.iter().filter(|k| lowered.contains(**k)).count();
        // A concrete color mention is a styling cue even without the word "color".
        if *candidate == ChangeType::Styling && COLOR_CUE.is_match(&lowered) {
            hits += 1;
        }
        if hits > best_hits {
            best = *candidate;
            best_hits = hits;
        }
    }
    best
}

/// Infer scope breadth from qualifier words
#[must_use]
pub fn scope_breadth(instruction: &str) -> ScopeBreadth {
    let lowered = instruction.to_lowercase();
    if BROAD_QUALIFIERS.iter().any(|q| lowered.contains(q)) {
        ScopeBreadth::Broad
    } else if MODERATE_QUALIFIERS.iter().any(|q| lowered.contains(q)) {
        ScopeBreadth::Moderate
    } else {
        ScopeBreadth::Narrow
    }
}

/// Specificity of an instruction, in [0, 1]
///
/// Concrete units, colors, and alignment keywords raise it; vagueness
/// markers lower it.
#[must_use]
pub fn specificity(instruction: &str) -> f64 {
    let lowered = instruction.to_lowercase();
    let mut score: f64 = 0.5;

    if UNIT_CUE.is_match(&lowered) {
        score += 0.15;
    }
    if COLOR_CUE.is_match(&lowered) {
        score += 0.15;
    }
    if ALIGNMENT_CUE.is_match(&lowered) {
        score += 0.1;
    }

    let vague_hits = VAGUE_MARKERS.iter().filter(|m| lowered.contains(**m)).count();
    score -= 0.15 * vague_hits as f64;

    score.clamp(0.0, 1.0)
}

/// Name a common UI region mentioned by the instruction, if any
#[must_use]
pub fn region_hint(instruction: &str) -> Option<&'static str> {
    let lowered = instruction.to_lowercase();
    REGION_NAMES.iter().find(|r| lowered.contains(**r)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styling_instruction() {
        assert_eq!(change_type("make the title blue and bold"), ChangeType::Styling);
    }

    #[test]
    fn layout_instruction() {
        assert_eq!(change_type("center the cards in a row"), ChangeType::Layout);
    }

    #[test]
    fn content_instruction() {
        assert_eq!(
            change_type("change the headline text to say Welcome"),
            ChangeType::Content
        );
    }

    #[test]
    fn vague_instruction_is_general() {
        assert_eq!(change_type("make it better"), ChangeType::General);
    }

    #[test]
    fn broad_qualifiers_widen_scope() {
        assert_eq!(scope_breadth("make all buttons rounder"), ScopeBreadth::Broad);
        assert_eq!(scope_breadth("every heading should be bold"), ScopeBreadth::Broad);
        assert_eq!(scope_breadth("fix the pricing page spacing"), ScopeBreadth::Moderate);
        assert_eq!(scope_breadth("make the cta bigger"), ScopeBreadth::Narrow);
    }

    #[test]
    fn specificity_rewards_concrete_values() {
        assert!(specificity("set font size to 16px") > specificity("make the font bigger"));
        assert!(specificity("paint it #336699") > 0.5);
    }

    #[test]
    fn specificity_penalizes_vagueness() {
        assert!(specificity("make it better") < 0.5);
        assert!(specificity("improve it somehow, nicer and cleaner") < 0.2);
    }

    #[test]
    fn region_hints() {
        assert_eq!(region_hint("make the header sticky"), Some("header"));
        assert_eq!(region_hint("change the copyright"), None);
    }
}
