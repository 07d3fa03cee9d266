//! ACE engine - adaptive confidence-driven change execution
//!
//! The pipeline core: scores a resolved change intent into one of four
//! execution approaches, drives a provider-agnostic text-generation call
//! through the selected strategy with bounded retries and fallback
//! escalation, and validates every generated change against scope,
//! preservation, and intent-reflection constraints before it leaves.
//!
//! # Example
//!
//! ```rust,ignore
//! use ace_engine::{ChangeEngine, EngineConfig};
//! use std::sync::Arc;
//!
//! # async fn example(generator: Arc<dyn ace_repo::TextGenerator>,
//! #                  accessor: Arc<dyn ace_repo::ContentAccessor>,
//! #                  model: ace_repo::RepoModel,
//! #                  request: ace_model::ChangeRequest)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ChangeEngine::new(EngineConfig::from_env(), generator, accessor);
//! let report = engine.execute(&request, &model).await?;
//!
//! for line in report.describe() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod assessor;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod executor;
pub mod gate;
pub mod prompt;
pub mod relevance;
pub mod report;

// Re-exports for convenience
pub use assessor::ConfidenceAssessor;
pub use config::EngineConfig;
pub use engine::ChangeEngine;
pub use error::EngineError;
pub use executor::{Execution, StrategyExecutor};
pub use gate::ValidationGate;
pub use report::{ExecutionReport, Outcome, StepLog};
