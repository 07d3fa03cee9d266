//! Prompt construction and response extraction
//!
//! Prompts grow constraints as confidence drops: direct prompts carry the
//! file and a minimal instruction, guided prompts add preservation rules and
//! expected scope, conservative prompts add hard structural constraints and
//! a line budget. The provider's response format is never assumed.

use ace_model::{Approach, ChangeIntent, ImpactAnalysis};

/// Build the generation prompt for a tier
#[must_use]
pub fn for_approach(
    approach: Approach,
    intent: &ChangeIntent,
    content: &str,
    impact: &ImpactAnalysis,
    line_budget: usize,
) -> String {
    match approach {
        Approach::Direct => direct(intent, content),
        Approach::Guided => guided(intent, content, impact),
        // Human-review never generates; the conservative prompt is the
        // most constrained one a provider ever sees.
        Approach::Conservative | Approach::HumanReview => {
            conservative(intent, content, impact, line_budget)
        }
    }
}

fn direct(intent: &ChangeIntent, content: &str) -> String {
    format!(
        "Apply this change to the file below: {description}\n\n\
         Return the complete updated file.\n\n\
         {content}",
        description = intent.description,
        content = content,
    )
}

fn guided(intent: &ChangeIntent, content: &str, impact: &ImpactAnalysis) -> String {
    let rules = rule_lines(impact);
    let changes = change_lines(impact);
    format!(
        "Apply this change to the file below: {description}\n\n\
         Concrete edits:\n{changes}\n\
         You must preserve:\n{rules}\n\
         Expected scope: about {lines} changed lines across {files} file(s).\n\
         Return the complete updated file.\n\n\
         {content}",
        description = intent.description,
        changes = changes,
        rules = rules,
        lines = impact.expected_scope.lines,
        files = impact.expected_scope.files,
        content = content,
    )
}

fn conservative(
    intent: &ChangeIntent,
    content: &str,
    impact: &ImpactAnalysis,
    line_budget: usize,
) -> String {
    let rules = rule_lines(impact);
    let changes = change_lines(impact);
    format!(
        "Apply this change to the file below: {description}\n\n\
         Concrete edits:\n{changes}\n\
         Hard constraints:\n\
         - Do not add, remove, or reorder imports or exports.\n\
         - Do not change the file's structure, props, or function signatures.\n\
         - Change at most {budget} lines.\n\
         You must preserve:\n{rules}\n\
         Return the complete updated file with only the specific change.\n\n\
         {content}",
        description = intent.description,
        changes = changes,
        budget = line_budget,
        rules = rules,
        content = content,
    )
}

/// Corrective prompt after an over-deletion, quoting the size mismatch
#[must_use]
pub fn over_deletion_feedback(
    intent: &ChangeIntent,
    content: &str,
    generated_len: usize,
    original_len: usize,
) -> String {
    format!(
        "Your previous output was {generated_len} characters but the original \
         file is {original_len} characters; most of the file was dropped.\n\
         Apply only this change: {description}\n\
         Return the complete file with only the specific change.\n\n\
         {content}",
        generated_len = generated_len,
        original_len = original_len,
        description = intent.description,
        content = content,
    )
}

fn rule_lines(impact: &ImpactAnalysis) -> String {
    if impact.preservation_rules.is_empty() {
        return "- existing behavior\n".to_string();
    }
    impact
        .preservation_rules
        .iter()
        .map(|r| format!("- {}\n", r.name))
        .collect()
}

fn change_lines(impact: &ImpactAnalysis) -> String {
    if impact.direct_changes.is_empty() {
        return "- as described above\n".to_string();
    }
    impact
        .direct_changes
        .iter()
        .map(|c| match &c.current {
            Some(current) => format!("- {}: {} -> {}\n", c.property, current, c.replacement),
            None => format!("- {}: {}\n", c.property, c.replacement),
        })
        .collect()
}

/// Extract file content from an arbitrarily formatted provider response
///
/// A fenced code block wins when present (the first one, language tag
/// ignored); otherwise the whole trimmed response is the content.
#[must_use]
pub fn extract_content(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after_fence = &trimmed[fence_start..];
        let mut lines = after_fence.lines();
        lines.next(); // opening fence, possibly with a language tag

        let mut body: Vec<&str> = Vec::new();
        let mut closed = false;
        for line in lines {
            if line.trim_start().starts_with("```") {
                closed = true;
                break;
            }
            body.push(line);
        }
        if closed && !body.is_empty() {
            let mut out = body.join("\n");
            out.push('\n');
            return out;
        }
    }

    let mut out = trimmed.to_string();
    out.push('\n');
    out
}
