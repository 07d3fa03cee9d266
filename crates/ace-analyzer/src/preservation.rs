//! Preservation-rule generation
//!
//! Rules are derived from shallow structural cues already visible in the
//! file, not from a parse tree. Each rule carries the detection pattern the
//! gate will count in both the original and the generated content.

use ace_model::PreservationRule;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern counted by the "preserve exports" rule
pub const EXPORT_PATTERN: &str = r"(?m)^\s*export\s";
/// Pattern counted by the "preserve imports" rule
pub const IMPORT_PATTERN: &str = r"(?m)^\s*import\s";
/// Pattern counted by the "preserve props interface" rule
pub const PROPS_PATTERN: &str = r"(?:interface|type)\s+\w*Props\b";
/// Pattern counted by the catch-all "preserve functionality" rule
pub const FUNCTIONALITY_PATTERN: &str =
    r"(?m)\bfunction\s+[A-Za-z_]\w*|\bconst\s+[A-Za-z_]\w*\s*=\s*(?:async\s+)?\(|\buse[A-Z]\w*\s*\(";

static EXPORT_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(EXPORT_PATTERN).expect("static pattern"));
static IMPORT_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(IMPORT_PATTERN).expect("static pattern"));
static PROPS_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(PROPS_PATTERN).expect("static pattern"));

/// Generate preservation rules for a source file
///
/// Export, import, and typed-props rules are added when the corresponding
/// cue is present; the functionality rule is the always-on catch-all. All
/// generated rules are critical.
#[must_use]
pub fn rules_for(content: &str) -> Vec<PreservationRule> {
    let mut rules = Vec::with_capacity(4);

    if EXPORT_CUE.is_match(content) {
        rules.push(PreservationRule::critical("preserve exports", EXPORT_PATTERN));
    }
    if IMPORT_CUE.is_match(content) {
        rules.push(PreservationRule::critical("preserve imports", IMPORT_PATTERN));
    }
    if PROPS_CUE.is_match(content) {
        rules.push(PreservationRule::critical(
            "preserve props interface",
            PROPS_PATTERN,
        ));
    }
    rules.push(PreservationRule::critical(
        "preserve functionality",
        FUNCTIONALITY_PATTERN,
    ));

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"
import React from 'react';

interface ButtonProps {
    label: string;
}

export function Button({ label }: ButtonProps) {
    const handleClick = () => {
        console.log(label);
    };
    return <button onClick={handleClick}>{label}</button>;
}
"#;

    #[test]
    fn full_component_gets_all_rules() {
        let rules = rules_for(COMPONENT);
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "preserve exports",
                "preserve imports",
                "preserve props interface",
                "preserve functionality"
            ]
        );
        assert!(rules.iter().all(|r| r.critical));
    }

    #[test]
    fn bare_snippet_gets_only_catch_all() {
        let rules = rules_for("const x = 1;\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "preserve functionality");
    }

    #[test]
    fn rule_counts_are_stable() {
        let rules = rules_for(COMPONENT);
        let export_rule = rules.iter().find(|r| r.name == "preserve exports").unwrap();
        assert_eq!(export_rule.match_count(COMPONENT), 1);
        assert!(export_rule.holds_between(COMPONENT, COMPONENT));
    }

    #[test]
    fn functionality_pattern_counts_hooks_and_functions() {
        let rules = rules_for(COMPONENT);
        let func_rule = rules
            .iter()
            .find(|r| r.name == "preserve functionality")
            .unwrap();
        // `function Button` and the `const handleClick = (` arrow
        assert_eq!(func_rule.match_count(COMPONENT), 2);
    }
}
