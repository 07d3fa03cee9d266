//! Engine configuration
//!
//! Every tunable resolves through one documented precedence order:
//! 1. an explicit `with_*` builder override,
//! 2. an `ACE_*` environment variable,
//! 3. the documented default.
//!
//! Construct with [`EngineConfig::from_env`] and apply builder overrides
//! after it; [`EngineConfig::default`] ignores the environment entirely.

use ace_model::AssessorWeights;
use std::str::FromStr;
use std::time::Duration;

/// Default attempt budget per change intent
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default over-deletion threshold (generated/original length ratio)
pub const DEFAULT_OVER_DELETION_THRESHOLD: f64 = 0.8;
/// Default confidence discount applied per fallback step
pub const DEFAULT_FALLBACK_DISCOUNT: f64 = 0.8;
/// Default cap on broad-scope candidates
pub const DEFAULT_CANDIDATE_CAP: usize = 5;
/// Default analyze-step timeout (conservative tier)
pub const DEFAULT_ANALYZE_TIMEOUT: Duration = Duration::from_secs(10);
/// Default multiplier over the expected-scope line estimate
pub const DEFAULT_SCOPE_MULTIPLIER: f64 = 3.0;
/// Default changed-line cap for minimal-magnitude changes
pub const DEFAULT_MINIMAL_LINE_CAP: usize = 5;
/// Default cap on the deleted share of original lines
pub const DEFAULT_DELETION_CAP: f64 = 0.5;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Attempt budget per change intent
    pub max_attempts: u32,
    /// Generated/original length ratio below which a generation is
    /// over-deletion
    pub over_deletion_threshold: f64,
    /// Confidence discount per fallback step
    pub fallback_discount: f64,
    /// Broad-scope candidate cap
    pub candidate_cap: usize,
    /// Analyze-step timeout for the conservative tier
    pub analyze_timeout: Duration,
    /// Allowed multiple of the expected changed-line estimate
    pub scope_multiplier: f64,
    /// Changed-line cap when the expected magnitude is minimal
    pub minimal_line_cap: usize,
    /// Deleted share of original lines that fails validation
    pub deletion_cap: f64,
    /// Confidence factor weights
    pub weights: AssessorWeights,
}

impl EngineConfig {
    /// Configuration with documented defaults, ignoring the environment
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration resolved from the environment over the defaults
    ///
    /// Recognized variables: `ACE_MAX_ATTEMPTS`,
    /// `ACE_OVER_DELETION_THRESHOLD`, `ACE_FALLBACK_DISCOUNT`,
    /// `ACE_CANDIDATE_CAP`, `ACE_ANALYZE_TIMEOUT_SECS`,
    /// `ACE_SCOPE_MULTIPLIER`, `ACE_MINIMAL_LINE_CAP`, `ACE_DELETION_CAP`.
    /// Unparseable values fall through to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_or("ACE_MAX_ATTEMPTS", defaults.max_attempts),
            over_deletion_threshold: env_or(
                "ACE_OVER_DELETION_THRESHOLD",
                defaults.over_deletion_threshold,
            ),
            fallback_discount: env_or("ACE_FALLBACK_DISCOUNT", defaults.fallback_discount),
            candidate_cap: env_or("ACE_CANDIDATE_CAP", defaults.candidate_cap),
            analyze_timeout: Duration::from_secs(env_or(
                "ACE_ANALYZE_TIMEOUT_SECS",
                defaults.analyze_timeout.as_secs(),
            )),
            scope_multiplier: env_or("ACE_SCOPE_MULTIPLIER", defaults.scope_multiplier),
            minimal_line_cap: env_or("ACE_MINIMAL_LINE_CAP", defaults.minimal_line_cap),
            deletion_cap: env_or("ACE_DELETION_CAP", defaults.deletion_cap),
            weights: defaults.weights,
        }
    }

    /// With an attempt budget
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// With an over-deletion threshold
    #[inline]
    #[must_use]
    pub fn with_over_deletion_threshold(mut self, threshold: f64) -> Self {
        self.over_deletion_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// With a fallback confidence discount
    #[inline]
    #[must_use]
    pub fn with_fallback_discount(mut self, discount: f64) -> Self {
        self.fallback_discount = discount.clamp(0.0, 1.0);
        self
    }

    /// With a broad-scope candidate cap
    #[inline]
    #[must_use]
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap.max(1);
        self
    }

    /// With an analyze-step timeout
    #[inline]
    #[must_use]
    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    /// With assessor weights
    #[inline]
    #[must_use]
    pub fn with_weights(mut self, weights: AssessorWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            over_deletion_threshold: DEFAULT_OVER_DELETION_THRESHOLD,
            fallback_discount: DEFAULT_FALLBACK_DISCOUNT,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            analyze_timeout: DEFAULT_ANALYZE_TIMEOUT,
            scope_multiplier: DEFAULT_SCOPE_MULTIPLIER,
            minimal_line_cap: DEFAULT_MINIMAL_LINE_CAP,
            deletion_cap: DEFAULT_DELETION_CAP,
            weights: AssessorWeights::default(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.over_deletion_threshold, 0.8);
        assert_eq!(config.fallback_discount, 0.8);
        assert_eq!(config.candidate_cap, 5);
    }

    #[test]
    fn builder_overrides_clamp() {
        let config = EngineConfig::new()
            .with_max_attempts(0)
            .with_over_deletion_threshold(1.5)
            .with_candidate_cap(0);

        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.over_deletion_threshold, 1.0);
        assert_eq!(config.candidate_cap, 1);
    }

    #[test]
    fn env_resolution_prefers_variable() {
        std::env::set_var("ACE_MAX_ATTEMPTS", "7");
        let config = EngineConfig::from_env();
        assert_eq!(config.max_attempts, 7);
        std::env::remove_var("ACE_MAX_ATTEMPTS");
    }

    #[test]
    fn unparseable_env_falls_through() {
        std::env::set_var("ACE_CANDIDATE_CAP", "lots");
        let config = EngineConfig::from_env();
        assert_eq!(config.candidate_cap, DEFAULT_CANDIDATE_CAP);
        std::env::remove_var("ACE_CANDIDATE_CAP");
    }

    #[test]
    fn builder_wins_over_env() {
        std::env::set_var("ACE_FALLBACK_DISCOUNT", "0.5");
        let config = EngineConfig::from_env().with_fallback_discount(0.9);
        assert!((config.fallback_discount - 0.9).abs() < 1e-9);
        std::env::remove_var("ACE_FALLBACK_DISCOUNT");
    }
}
