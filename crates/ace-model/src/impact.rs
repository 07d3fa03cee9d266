//! Impact analysis
//!
//! Owned per [`ChangeIntent`](crate::intent::ChangeIntent): the concrete
//! direct changes, advisory cascade signals, preservation rules, validation
//! checks, and the expected-scope estimate.

use crate::intent::RiskTier;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A concrete property/value edit at the target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectChange {
    /// Property being changed
    pub property: String,
    /// Current value, when known
    pub current: Option<String>,
    /// Replacement value in the target idiom (utility token, camelCase pair, ...)
    pub replacement: String,
    /// Analyzer confidence in this mapping, in [0, 1]
    pub confidence: f64,
}

impl DirectChange {
    /// Create a direct change
    #[inline]
    #[must_use]
    pub fn new(
        property: impl Into<String>,
        current: Option<String>,
        replacement: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            property: property.into(),
            current,
            replacement: replacement.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Advisory signal that a change may require adjustment elsewhere
///
/// Cascade changes are never auto-applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeChange {
    /// What may need adjusting
    pub description: String,
    /// Affected component, when identifiable
    pub component: Option<String>,
    /// Whether downstream scope estimation must count this change
    pub required: bool,
    /// Confidence the cascade applies, in [0, 1]
    pub confidence: f64,
}

impl CascadeChange {
    /// Create an optional (advisory-only) cascade signal
    #[inline]
    #[must_use]
    pub fn advisory(description: impl Into<String>, confidence: f64) -> Self {
        Self {
            description: description.into(),
            component: None,
            required: false,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Create a required cascade signal
    #[inline]
    #[must_use]
    pub fn required(description: impl Into<String>, confidence: f64) -> Self {
        Self {
            description: description.into(),
            component: None,
            required: true,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// With an affected component name
    #[inline]
    #[must_use]
    pub fn on_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

/// An invariant that must hold equally in original and generated content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreservationRule {
    /// Rule name (e.g. "preserve exports")
    pub name: String,
    /// Detection pattern (regex over source lines)
    pub pattern: String,
    /// Whether a violation fails validation outright
    pub critical: bool,
}

impl PreservationRule {
    /// Create a critical rule
    #[inline]
    #[must_use]
    pub fn critical(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            critical: true,
        }
    }

    /// Create a non-critical rule
    #[inline]
    #[must_use]
    pub fn advisory(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            critical: false,
        }
    }

    /// Count pattern matches in `content`
    ///
    /// An unparseable pattern counts as zero matches; rules are generated
    /// internally so this only happens on hand-built rules.
    #[must_use]
    pub fn match_count(&self, content: &str) -> usize {
        match Regex::new(&self.pattern) {
            Ok(re) => re.find_iter(content).count(),
            Err(_) => 0,
        }
    }

    /// Whether the rule holds equally between two contents
    #[inline]
    #[must_use]
    pub fn holds_between(&self, original: &str, generated: &str) -> bool {
        self.match_count(original) == self.match_count(generated)
    }
}

/// A named validation check for the gate to run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Check name
    pub name: String,
    /// What the check asserts
    pub description: String,
}

impl ValidationCheck {
    /// Create a check
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Magnitude tier derived from the expected changed-line count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeMagnitude {
    /// At most 3 expected lines
    Minimal,
    /// At most 10
    Moderate,
    /// At most 25
    Significant,
    /// More
    Major,
}

impl ChangeMagnitude {
    /// Classify an expected line count
    #[inline]
    #[must_use]
    pub fn from_lines(lines: usize) -> Self {
        match lines {
            0..=3 => ChangeMagnitude::Minimal,
            4..=10 => ChangeMagnitude::Moderate,
            11..=25 => ChangeMagnitude::Significant,
            _ => ChangeMagnitude::Major,
        }
    }

    /// Risk tier implied by this magnitude
    #[inline]
    #[must_use]
    pub fn risk(&self) -> RiskTier {
        match self {
            ChangeMagnitude::Minimal => RiskTier::Low,
            ChangeMagnitude::Moderate => RiskTier::Medium,
            ChangeMagnitude::Significant | ChangeMagnitude::Major => RiskTier::High,
        }
    }

    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChangeMagnitude::Minimal => "minimal",
            ChangeMagnitude::Moderate => "moderate",
            ChangeMagnitude::Significant => "significant",
            ChangeMagnitude::Major => "major",
        }
    }
}

/// Estimated scope of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedScope {
    /// Estimated changed-line count
    pub lines: usize,
    /// Estimated changed-file count
    pub files: usize,
    /// Magnitude tier
    pub magnitude: ChangeMagnitude,
    /// Risk tier
    pub risk: RiskTier,
}

impl ExpectedScope {
    /// Derive the scope estimate from change counts
    ///
    /// Each direct change is expected to touch ~2 lines, each required
    /// cascade ~3 lines plus one extra file.
    #[must_use]
    pub fn from_counts(direct_changes: usize, required_cascades: usize) -> Self {
        let lines = direct_changes * 2 + required_cascades * 3;
        let files = 1 + required_cascades;
        let magnitude = ChangeMagnitude::from_lines(lines);
        Self {
            lines,
            files,
            magnitude,
            risk: magnitude.risk(),
        }
    }
}

/// Full impact analysis for one intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    /// Concrete edits at the target
    pub direct_changes: Vec<DirectChange>,
    /// Advisory cascade signals
    pub cascade_changes: Vec<CascadeChange>,
    /// Invariants the generated content must preserve
    pub preservation_rules: Vec<PreservationRule>,
    /// Named checks the gate runs
    pub validation_checks: Vec<ValidationCheck>,
    /// Scope estimate
    pub expected_scope: ExpectedScope,
}

impl ImpactAnalysis {
    /// Required cascade changes
    pub fn required_cascades(&self) -> impl Iterator<Item = &CascadeChange> {
        self.cascade_changes.iter().filter(|c| c.required)
    }

    /// Critical preservation rules
    pub fn critical_rules(&self) -> impl Iterator<Item = &PreservationRule> {
        self.preservation_rules.iter().filter(|r| r.critical)
    }

    /// Mean confidence across direct changes (1.0 when empty)
    #[must_use]
    pub fn mean_direct_confidence(&self) -> f64 {
        if self.direct_changes.is_empty() {
            return 1.0;
        }
        let sum: f64 = self.direct_changes.iter().map(|c| c.confidence).sum();
        sum / self.direct_changes.len() as f64
    }
}
