//! Change engine facade
//!
//! Wires the pipeline end to end for one request:
//! resolve -> hydrate -> analyze -> assess -> execute -> gate, producing an
//! [`ExecutionReport`] or a terminal [`EngineError`]. Requests in a batch
//! are independent and run concurrently; each owns its retry counters and
//! its execution-scoped content cache.

use crate::assessor::ConfidenceAssessor;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::executor::StrategyExecutor;
use crate::report::ExecutionReport;
use ace_analyzer::ImpactAnalyzer;
use ace_model::{ChangeRequest, ExpectedScope, ImpactAnalysis};
use ace_repo::{ContentAccessor, ContentCache, RepoModel, TextGenerator};
use ace_resolver::IntentResolver;
use std::sync::Arc;

/// The adaptive change engine
pub struct ChangeEngine {
    resolver: IntentResolver,
    analyzer: Arc<ImpactAnalyzer>,
    assessor: ConfidenceAssessor,
    executor: StrategyExecutor,
    accessor: Arc<dyn ContentAccessor>,
}

impl ChangeEngine {
    /// Create an engine with the default impact analyzer
    #[must_use]
    pub fn new(
        config: EngineConfig,
        generator: Arc<dyn TextGenerator>,
        accessor: Arc<dyn ContentAccessor>,
    ) -> Self {
        Self::with_analyzer(config, generator, accessor, ImpactAnalyzer::default())
    }

    /// Create an engine with a custom impact analyzer (custom idiom table)
    #[must_use]
    pub fn with_analyzer(
        config: EngineConfig,
        generator: Arc<dyn TextGenerator>,
        accessor: Arc<dyn ContentAccessor>,
        analyzer: ImpactAnalyzer,
    ) -> Self {
        let analyzer = Arc::new(analyzer);
        Self {
            resolver: IntentResolver::new().with_candidate_cap(config.candidate_cap),
            assessor: ConfidenceAssessor::new(config.clone()),
            executor: StrategyExecutor::new(
                config,
                generator,
                accessor.clone(),
                analyzer.clone(),
            ),
            analyzer,
            accessor,
        }
    }

    /// Execute one change request
    ///
    /// The request is discarded after one report (or failure); nothing about
    /// it persists inside the engine.
    ///
    /// # Errors
    /// Terminal failures only; retryable conditions are consumed by the
    /// executor's attempt loop. The error carries the last gate verdict when
    /// one exists, so callers can explain why the change was refused.
    pub async fn execute(
        &self,
        request: &ChangeRequest,
        model: &RepoModel,
    ) -> Result<ExecutionReport, EngineError> {
        tracing::info!(summary = %request.summary(), "executing change request");

        let mut intent = self.resolver.resolve(request, model);
        let cache = ContentCache::new();

        let impact = match intent.target.take() {
            Some(target) => {
                let content = cache.resolve(&target, self.accessor.as_ref()).await?;
                let hydrated = target.with_content(content);
                intent.target = Some(hydrated.clone());
                Some(self.analyzer.analyze(&intent, &hydrated, model)?)
            }
            None => None,
        };

        let assessment = match &impact {
            Some(impact) => self.assessor.assess(&intent, impact, model),
            None => self
                .assessor
                .assess(&intent, &unanchored_impact(), model),
        };

        let execution = self
            .executor
            .execute(&intent, &assessment, impact.as_ref(), model, &cache)
            .await?;

        Ok(ExecutionReport {
            intent_id: intent.id,
            approach: execution.approach,
            attempts: execution.attempts,
            outcome: execution.outcome,
            log: execution.log,
            completed_at: chrono::Utc::now(),
        })
    }

    /// Execute independent requests concurrently
    ///
    /// Results come back in request order; one request's terminal failure
    /// does not disturb the others.
    pub async fn execute_batch(
        &self,
        requests: &[ChangeRequest],
        model: &RepoModel,
    ) -> Vec<Result<ExecutionReport, EngineError>> {
        futures::future::join_all(requests.iter().map(|request| self.execute(request, model)))
            .await
    }
}

/// Placeholder analysis for assessing unanchored intents
///
/// The executor never uses this; it only feeds the assessor's
/// change-complexity and risk factors before the broad-scope sweep computes
/// real per-candidate analyses.
fn unanchored_impact() -> ImpactAnalysis {
    ImpactAnalysis {
        direct_changes: vec![],
        cascade_changes: vec![],
        preservation_rules: vec![],
        validation_checks: vec![],
        expected_scope: ExpectedScope::from_counts(0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanchored_impact_is_empty_and_minimal() {
        let impact = unanchored_impact();
        assert!(impact.direct_changes.is_empty());
        assert_eq!(impact.expected_scope.files, 1);
    }
}
