//! Broad-scope relevance scoring
//!
//! When no target component is bound, every indexed component is scored
//! for relevance to the intent and the best few are swept independently.

use ace_model::{ChangeIntent, ChangeType, TargetComponent};
use ace_repo::RepoModel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Score awarded for a name/path keyword match
pub const KEYWORD_SCORE: i32 = 50;
/// Score for text-content density on content-type requests
pub const CONTENT_DENSITY_SCORE: i32 = 30;
/// Score for styling markers on styling-type requests
pub const STYLING_MARKER_SCORE: i32 = 20;
/// Score for layout-keyword names on layout-type requests
pub const LAYOUT_NAME_SCORE: i32 = 40;
/// Score for page-level naming
pub const PAGE_NAME_SCORE: i32 = 15;
/// Score for exported/reusable components
pub const EXPORTED_SCORE: i32 = 10;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "make", "with", "this", "that", "more", "less", "into", "then", "them", "look", "very",
        "like", "should", "every", "from",
    ]
    .into_iter()
    .collect()
});

static TEXT_NODE_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">[^<>{}]{3,}<").expect("static pattern"));
static STYLING_MARKER_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"className=|class=|style=|styled"#).expect("static pattern"));

static LAYOUT_NAME_KEYWORDS: &[&str] = &[
    "container", "layout", "grid", "flex", "wrapper", "row", "column", "section", "stack",
];

/// A component with its relevance score
#[derive(Debug, Clone)]
pub struct RankedComponent<'a> {
    /// The scored component
    pub component: &'a TargetComponent,
    /// Relevance score (higher is better)
    pub score: i32,
}

/// Rank all indexed components by relevance to the intent, best first,
/// truncated to `cap`
#[must_use]
pub fn rank<'a>(intent: &ChangeIntent, model: &'a RepoModel, cap: usize) -> Vec<RankedComponent<'a>> {
    let keywords = keywords_of(&intent.description);

    let mut ranked: Vec<RankedComponent<'a>> = model
        .components()
        .iter()
        .map(|component| RankedComponent {
            component,
            score: score(component, intent, &keywords),
        })
        .filter(|r| r.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(cap);
    ranked
}

fn score(component: &TargetComponent, intent: &ChangeIntent, keywords: &[String]) -> i32 {
    let mut total = 0;
    let name = component.name.to_lowercase();
    let path = component.file_path.to_lowercase();
    let content = component.content.as_deref().unwrap_or("");

    if keywords
        .iter()
        .any(|k| name.contains(k.as_str()) || path.contains(k.as_str()))
    {
        total += KEYWORD_SCORE;
    }

    match intent.change_type {
        ChangeType::Content => {
            if TEXT_NODE_CUE.find_iter(content).count() >= 2 {
                total += CONTENT_DENSITY_SCORE;
            }
        }
        ChangeType::Styling => {
            if STYLING_MARKER_CUE.is_match(content) {
                total += STYLING_MARKER_SCORE;
            }
        }
        ChangeType::Layout => {
            if LAYOUT_NAME_KEYWORDS.iter().any(|k| name.contains(k)) {
                total += LAYOUT_NAME_SCORE;
            }
        }
        _ => {}
    }

    if name.contains("page") || path.contains("/pages/") {
        total += PAGE_NAME_SCORE;
    }

    if component.exported {
        total += EXPORTED_SCORE;
    }

    total
}

/// Meaningful lowercase words of the description
fn keywords_of(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
