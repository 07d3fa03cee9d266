//! ACE repository interfaces
//!
//! The engine's consumed collaborators:
//! - [`RepoModel`]: the read-only symbolic repository model (components,
//!   selector lookup, styling conventions, utility theme table)
//! - [`ContentAccessor`]: lazy file-content reads
//! - [`TextGenerator`]: the single text-generation call the executor drives
//! - [`ContentCache`]: execution-scoped content caching
//!
//! Everything here is read-only from the engine's perspective; persistence
//! and committing belong to external collaborators.

pub mod index;
pub mod model;
pub mod providers;
pub mod tokens;

// Re-exports for convenience
pub use index::SelectorIndex;
pub use model::RepoModel;
pub use providers::{
    ContentAccessor, ContentCache, FsContentAccessor, ModelContentAccessor, ProviderError,
    TextGenerator,
};
pub use tokens::ThemeTable;
