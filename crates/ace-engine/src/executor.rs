//! Strategy executor
//!
//! Drives one change intent through its strategy chain as an explicit state
//! machine: `analyze -> generate -> (verify) -> validate -> apply`, with
//! bounded attempts, an over-deletion guard with one corrective retry, and
//! fallback escalation to more conservative tiers.
//!
//! # Invariants
//! - At most `max_attempts` attempts per intent; each fallback swap carries
//!   the chain's already-discounted confidence.
//! - Over-deletion is retried exactly once with corrective feedback, then
//!   fails terminally; it never escalates through the fallback chain.
//! - Nothing is returned as applied without a passing gate verdict.
//! - The human-review tier never applies; its terminal output is a proposal
//!   embedding the unmodified original.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::gate::ValidationGate;
use crate::prompt;
use crate::relevance;
use crate::report::{Outcome, StepLog};
use ace_analyzer::{AnalyzerError, ImpactAnalyzer};
use ace_model::{
    Approach, ChangeIntent, ChangeStrategy, ConfidenceAssessment, FileChange, ImpactAnalysis,
    StepKind, TargetComponent, ValidationResult,
};
use ace_repo::{ContentAccessor, ContentCache, ProviderError, RepoModel, TextGenerator};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of one full execution
#[derive(Debug)]
pub struct Execution {
    /// Terminal outcome
    pub outcome: Outcome,
    /// Tier that produced the outcome
    pub approach: Approach,
    /// Attempts consumed
    pub attempts: u32,
    /// Ordered step log
    pub log: Vec<StepLog>,
}

/// Why one attempt failed (internal to the retry loop)
#[derive(Debug)]
enum AttemptError {
    /// Generation stayed short after the corrective retry
    OverDeletion { ratio: f64 },
    /// The gate rejected the generation
    Gate(ValidationResult),
    /// The provider call failed
    Provider(ProviderError),
    /// A step exceeded its timeout
    Timeout(Duration),
    /// Impact analysis failed (terminal)
    Analysis(AnalyzerError),
    /// The step list was inconsistent
    Incomplete(&'static str),
}

impl std::fmt::Display for AttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptError::OverDeletion { ratio } => {
                write!(f, "over-deletion at {:.0}% of original", ratio * 100.0)
            }
            AttemptError::Gate(validation) => write!(f, "{}", validation.summary()),
            AttemptError::Provider(e) => write!(f, "{e}"),
            AttemptError::Timeout(d) => write!(f, "timed out after {d:?}"),
            AttemptError::Analysis(e) => write!(f, "{e}"),
            AttemptError::Incomplete(what) => f.write_str(what),
        }
    }
}

/// Result of one successful attempt
enum AttemptOutcome {
    Applied {
        change: FileChange,
        validation: ValidationResult,
    },
    Proposed(FileChange),
}

/// The strategy executor
pub struct StrategyExecutor {
    config: EngineConfig,
    generator: Arc<dyn TextGenerator>,
    accessor: Arc<dyn ContentAccessor>,
    analyzer: Arc<ImpactAnalyzer>,
    gate: ValidationGate,
}

impl StrategyExecutor {
    /// Create an executor
    #[must_use]
    pub fn new(
        config: EngineConfig,
        generator: Arc<dyn TextGenerator>,
        accessor: Arc<dyn ContentAccessor>,
        analyzer: Arc<ImpactAnalyzer>,
    ) -> Self {
        let gate = ValidationGate::from_config(&config);
        Self {
            config,
            generator,
            accessor,
            analyzer,
            gate,
        }
    }

    /// Execute one intent under its assessment
    ///
    /// A bound target runs the single-file path with the precomputed impact
    /// analysis; an unbound intent runs the broad-scope sweep.
    ///
    /// # Errors
    /// Terminal failures only: over-deletion after the corrective retry,
    /// attempt-budget exhaustion (carrying the last gate verdict), analysis
    /// failures, and an empty broad-scope candidate set.
    pub async fn execute(
        &self,
        intent: &ChangeIntent,
        assessment: &ConfidenceAssessment,
        impact: Option<&ImpactAnalysis>,
        model: &RepoModel,
        cache: &ContentCache,
    ) -> Result<Execution, EngineError> {
        let execution = match (&intent.target, impact) {
            (Some(target), Some(impact)) => {
                self.execute_bound(intent, target, impact, assessment, model)
                    .await?
            }
            _ => self.execute_broad(intent, assessment, model, cache).await?,
        };

        tracing::info!(
            intent = %intent.id,
            approach = execution.approach.name(),
            attempts = execution.attempts,
            applied = execution.outcome.is_applied(),
            "execution finished"
        );
        Ok(execution)
    }

    /// Single-target path with retries and fallback escalation
    async fn execute_bound(
        &self,
        intent: &ChangeIntent,
        target: &TargetComponent,
        impact: &ImpactAnalysis,
        assessment: &ConfidenceAssessment,
        model: &RepoModel,
    ) -> Result<Execution, EngineError> {
        let content = target
            .content
            .clone()
            .ok_or_else(|| AnalyzerError::MissingContent(target.name.clone()))?;

        let mut strategy = ChangeStrategy::chain(
            assessment.approach,
            assessment.confidence,
            self.config.fallback_discount,
            self.config.analyze_timeout,
        );

        let mut log = Vec::new();
        let mut attempts = 0u32;
        let mut last_validation: Option<ValidationResult> = None;

        loop {
            attempts += 1;
            tracing::debug!(
                intent = %intent.id,
                attempt = attempts,
                tier = strategy.approach.name(),
                "starting attempt"
            );

            match self
                .attempt(&strategy, intent, target, &content, impact, model, &mut log)
                .await
            {
                Ok(AttemptOutcome::Applied { change, validation }) => {
                    return Ok(Execution {
                        outcome: Outcome::Applied {
                            changes: vec![change],
                            validation,
                        },
                        approach: strategy.approach,
                        attempts,
                        log,
                    });
                }
                Ok(AttemptOutcome::Proposed(proposal)) => {
                    return Ok(Execution {
                        outcome: Outcome::Proposed { proposal },
                        approach: strategy.approach,
                        attempts,
                        log,
                    });
                }
                Err(AttemptError::OverDeletion { ratio }) => {
                    return Err(EngineError::OverDeletion {
                        actual_ratio: ratio,
                        threshold: self.config.over_deletion_threshold,
                    });
                }
                Err(AttemptError::Analysis(e)) => return Err(EngineError::Analysis(e)),
                Err(AttemptError::Gate(validation)) => {
                    last_validation = Some(validation);
                }
                Err(failure) => {
                    log.push(StepLog::new("attempt", format!("failed: {failure}"), 0));
                }
            }

            if attempts >= self.config.max_attempts {
                return Err(EngineError::AttemptsExhausted {
                    attempts,
                    last_validation,
                });
            }
            if let Some(fallback) = strategy.fallback.take() {
                strategy = *fallback;
                log.push(StepLog::new(
                    "fallback",
                    format!(
                        "escalating to {} (confidence {:.2})",
                        strategy.approach.name(),
                        strategy.confidence
                    ),
                    0,
                ));
            }
        }
    }

    /// Broad-scope sweep: rank all components, run each top candidate
    /// through an independent generate -> validate cycle, return all passers
    async fn execute_broad(
        &self,
        intent: &ChangeIntent,
        assessment: &ConfidenceAssessment,
        model: &RepoModel,
        cache: &ContentCache,
    ) -> Result<Execution, EngineError> {
        let ranked = relevance::rank(intent, model, self.config.candidate_cap);
        if ranked.is_empty() {
            return Err(EngineError::NoViableTarget(
                "no indexed component scored above zero for this request".to_string(),
            ));
        }
        tracing::debug!(
            intent = %intent.id,
            candidates = ranked.len(),
            "broad-scope sweep"
        );

        let mut strategy = ChangeStrategy::chain(
            assessment.approach,
            assessment.confidence,
            self.config.fallback_discount,
            self.config.analyze_timeout,
        );
        let mut log = Vec::new();
        let mut attempts = 0u32;
        let mut last_validation: Option<ValidationResult> = None;

        loop {
            attempts += 1;

            if strategy.approach == Approach::HumanReview {
                let best = ranked[0].component;
                let hydrated = self.hydrate(best, cache).await?;
                let impact = self.analyzer.analyze(intent, &hydrated, model)?;
                let content = hydrated.content.clone().unwrap_or_default();
                let proposal = build_proposal(intent, &hydrated, &content, &impact);
                log.push(StepLog::new(
                    "propose",
                    format!("proposal for {} (not applied)", hydrated.name),
                    0,
                ));
                return Ok(Execution {
                    outcome: Outcome::Proposed { proposal },
                    approach: strategy.approach,
                    attempts,
                    log,
                });
            }

            let mut changes = Vec::new();
            let mut passing_validation: Option<ValidationResult> = None;

            for candidate in &ranked {
                let hydrated = match self.hydrate(candidate.component, cache).await {
                    Ok(hydrated) => hydrated,
                    Err(e) => {
                        log.push(StepLog::new(
                            "analyze",
                            format!("skipping {}: {e}", candidate.component.name),
                            0,
                        ));
                        continue;
                    }
                };
                let impact = match self.analyzer.analyze(intent, &hydrated, model) {
                    Ok(impact) => impact,
                    Err(e) => {
                        log.push(StepLog::new(
                            "analyze",
                            format!("skipping {}: {e}", hydrated.name),
                            0,
                        ));
                        continue;
                    }
                };
                let content = match &hydrated.content {
                    Some(content) => content.clone(),
                    None => continue,
                };

                match self
                    .attempt(&strategy, intent, &hydrated, &content, &impact, model, &mut log)
                    .await
                {
                    Ok(AttemptOutcome::Applied { change, validation }) => {
                        changes.push(change);
                        passing_validation = Some(validation);
                    }
                    Ok(AttemptOutcome::Proposed(_)) => {
                        // Not reachable below the human-review tier.
                    }
                    Err(AttemptError::Gate(validation)) => {
                        last_validation = Some(validation);
                    }
                    Err(failure) => {
                        log.push(StepLog::new(
                            "attempt",
                            format!("{} failed: {failure}", hydrated.name),
                            0,
                        ));
                    }
                }
            }

            if let Some(mut validation) = passing_validation {
                validation.metrics.files_modified = changes.len();
                return Ok(Execution {
                    outcome: Outcome::Applied {
                        changes,
                        validation,
                    },
                    approach: strategy.approach,
                    attempts,
                    log,
                });
            }

            if attempts >= self.config.max_attempts {
                return Err(EngineError::AttemptsExhausted {
                    attempts,
                    last_validation,
                });
            }
            if let Some(fallback) = strategy.fallback.take() {
                strategy = *fallback;
                log.push(StepLog::new(
                    "fallback",
                    format!("escalating to {}", strategy.approach.name()),
                    0,
                ));
            }
        }
    }

    /// One attempt: walk the strategy's step list
    #[allow(clippy::too_many_arguments)]
    async fn attempt(
        &self,
        strategy: &ChangeStrategy,
        intent: &ChangeIntent,
        target: &TargetComponent,
        content: &str,
        impact: &ImpactAnalysis,
        model: &RepoModel,
        log: &mut Vec<StepLog>,
    ) -> Result<AttemptOutcome, AttemptError> {
        let mut working_impact = impact.clone();
        let mut generated: Option<String> = None;
        let mut verdict: Option<ValidationResult> = None;

        for step in &strategy.steps {
            let started = Instant::now();
            match step.kind {
                StepKind::Analyze => {
                    let result = with_timeout(step.timeout, async {
                        self.analyzer.analyze(intent, target, model)
                    })
                    .await?;
                    working_impact = result.map_err(AttemptError::Analysis)?;
                    log.push(StepLog::new(
                        "analyze",
                        format!(
                            "{} direct changes, {} rules, {} magnitude",
                            working_impact.direct_changes.len(),
                            working_impact.preservation_rules.len(),
                            working_impact.expected_scope.magnitude.name()
                        ),
                        elapsed_ms(started),
                    ));
                }
                StepKind::Generate => {
                    if strategy.approach == Approach::HumanReview {
                        let proposal = build_proposal(intent, target, content, &working_impact);
                        log.push(StepLog::new(
                            "propose",
                            format!("proposal for {} (not applied)", target.name),
                            elapsed_ms(started),
                        ));
                        return Ok(AttemptOutcome::Proposed(proposal));
                    }

                    let text = self
                        .generate_with_guard(
                            strategy,
                            intent,
                            content,
                            &working_impact,
                            step.timeout,
                            log,
                        )
                        .await?;
                    log.push(StepLog::new(
                        "generate",
                        format!("{} chars generated", text.len()),
                        elapsed_ms(started),
                    ));
                    generated = Some(text);
                }
                StepKind::Verify => {
                    if let Some(text) = &generated {
                        let suspicious = text.trim().is_empty() || text.contains("```");
                        if suspicious {
                            log.push(StepLog::new(
                                "verify",
                                "raw output still carries fencing or is empty",
                                elapsed_ms(started),
                            ));
                            if step.required {
                                return Err(AttemptError::Incomplete(
                                    "verify step rejected output",
                                ));
                            }
                        } else {
                            log.push(StepLog::new("verify", "raw output sane", elapsed_ms(started)));
                        }
                    }
                }
                StepKind::Validate => {
                    let text = generated
                        .as_deref()
                        .ok_or(AttemptError::Incomplete("validate before generate"))?;
                    let validation = self.gate.validate(
                        content,
                        text,
                        intent,
                        strategy.confidence,
                        &working_impact,
                        strategy.validation_level,
                    );
                    log.push(StepLog::new(
                        "validate",
                        validation.summary(),
                        elapsed_ms(started),
                    ));
                    if !validation.passed {
                        return Err(AttemptError::Gate(validation));
                    }
                    verdict = Some(validation);
                }
                StepKind::Apply => {
                    let text = generated
                        .take()
                        .ok_or(AttemptError::Incomplete("apply before generate"))?;
                    let validation = verdict
                        .take()
                        .ok_or(AttemptError::Incomplete("apply without validation"))?;
                    let change = FileChange::modify(
                        target.file_path.clone(),
                        content,
                        text,
                        format!(
                            "{} via {} ({} lines changed)",
                            intent.description,
                            strategy.approach.name(),
                            validation.metrics.lines_changed
                        ),
                    );
                    log.push(StepLog::new(
                        "apply",
                        format!("change accepted for {}", target.file_path),
                        elapsed_ms(started),
                    ));
                    return Ok(AttemptOutcome::Applied { change, validation });
                }
            }
        }

        Err(AttemptError::Incomplete("strategy ended without a terminal step"))
    }

    /// Generation with the over-deletion guard: one corrective retry, then a
    /// terminal over-deletion failure
    async fn generate_with_guard(
        &self,
        strategy: &ChangeStrategy,
        intent: &ChangeIntent,
        content: &str,
        impact: &ImpactAnalysis,
        timeout: Option<Duration>,
        log: &mut Vec<StepLog>,
    ) -> Result<String, AttemptError> {
        let line_budget = (impact.expected_scope.lines.max(2) as f64
            * self.config.scope_multiplier)
            .ceil() as usize;
        let prompt_text =
            prompt::for_approach(strategy.approach, intent, content, impact, line_budget);

        let raw = with_timeout(timeout, self.generator.generate_text(&prompt_text))
            .await?
            .map_err(AttemptError::Provider)?;
        let first = prompt::extract_content(&raw);

        let ratio = length_ratio(&first, content);
        if ratio >= self.config.over_deletion_threshold {
            return Ok(first);
        }

        log.push(StepLog::new(
            "generate",
            format!(
                "over-deletion suspected ({:.0}% of original), retrying with feedback",
                ratio * 100.0
            ),
            0,
        ));

        let feedback = prompt::over_deletion_feedback(intent, content, first.len(), content.len());
        let raw_retry = self
            .generator
            .generate_text(&feedback)
            .await
            .map_err(AttemptError::Provider)?;
        let second = prompt::extract_content(&raw_retry);

        let retry_ratio = length_ratio(&second, content);
        if retry_ratio >= self.config.over_deletion_threshold {
            return Ok(second);
        }

        Err(AttemptError::OverDeletion { ratio: retry_ratio })
    }

    /// Clone a component with its content resolved through the cache
    async fn hydrate(
        &self,
        component: &TargetComponent,
        cache: &ContentCache,
    ) -> Result<TargetComponent, ProviderError> {
        let content = cache.resolve(component, self.accessor.as_ref()).await?;
        Ok(component.clone().with_content(content))
    }
}

/// Build the human-review proposal: unmodified original content, with the
/// intended diff carried in the reasoning
fn build_proposal(
    intent: &ChangeIntent,
    target: &TargetComponent,
    content: &str,
    impact: &ImpactAnalysis,
) -> FileChange {
    let mut reasoning = format!(
        "PROPOSAL ONLY - requires human approval, nothing has been applied.\n\
         Intended change for {}: {}\n",
        target.name, intent.description
    );
    for change in &impact.direct_changes {
        match &change.current {
            Some(current) => reasoning.push_str(&format!(
                "- {}: {} -> {}\n",
                change.property, current, change.replacement
            )),
            None => {
                reasoning.push_str(&format!("- {}: {}\n", change.property, change.replacement));
            }
        }
    }
    FileChange::modify(target.file_path.clone(), content, content, reasoning)
}

/// Generated/original character-length ratio (1.0 for an empty original)
fn length_ratio(generated: &str, original: &str) -> f64 {
    if original.is_empty() {
        return 1.0;
    }
    generated.len() as f64 / original.len() as f64
}

async fn with_timeout<F, T>(timeout: Option<Duration>, fut: F) -> Result<T, AttemptError>
where
    F: Future<Output = T>,
{
    match timeout {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| AttemptError::Timeout(d)),
        None => Ok(fut.await),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::{
        ChangeRequest, ChangeType, DirectChange, ExpectedScope, NaturalLanguageEdit, StylingIdiom,
    };

    #[test]
    fn length_ratio_of_empty_original_is_full() {
        assert_eq!(length_ratio("anything", ""), 1.0);
    }

    #[test]
    fn length_ratio_tracks_shrinkage() {
        assert!((length_ratio("ab", "abcd") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn proposal_embeds_unmodified_original() {
        let target = TargetComponent::new("Card", "src/Card.tsx", StylingIdiom::UtilityClasses);
        let intent = ChangeIntent::new(
            ChangeType::Styling,
            "soften the card corners",
            ChangeRequest::NaturalLanguage(NaturalLanguageEdit::new("soften the card corners")),
            Some(target.clone()),
            0.2,
        );
        let impact = ImpactAnalysis {
            direct_changes: vec![DirectChange::new(
                "border-radius",
                Some("0".to_string()),
                "rounded-lg",
                0.8,
            )],
            cascade_changes: vec![],
            preservation_rules: vec![],
            validation_checks: vec![],
            expected_scope: ExpectedScope::from_counts(1, 0),
        };

        let content = "export function Card() {}\n";
        let proposal = build_proposal(&intent, &target, content, &impact);

        assert_eq!(proposal.new_content, content);
        assert_eq!(proposal.old_content, content);
        assert!(proposal.reasoning.contains("PROPOSAL ONLY"));
        assert!(proposal.reasoning.contains("border-radius"));
        assert!(proposal.reasoning.contains("rounded-lg"));
    }
}
