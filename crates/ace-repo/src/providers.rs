//! Collaborator provider interfaces
//!
//! The engine consumes two external capabilities: reading file content on
//! demand, and a single blocking text-generation call. Both are cooperative
//! suspension points; no other contract is assumed of either provider.

use crate::model::RepoModel;
use ace_model::TargetComponent;
use dashmap::DashMap;
use std::time::Duration;

/// Errors surfaced by collaborator providers
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// File content could not be read
    #[error("content read failed for {path}: {reason}")]
    Read {
        /// Requested path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The text-generation call itself failed
    #[error("text generation failed: {0}")]
    Generation(String),

    /// A provider call exceeded its deadline
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),
}

/// Lazy file-content accessor
#[async_trait::async_trait]
pub trait ContentAccessor: Send + Sync {
    /// Read the content of `path`
    async fn read(&self, path: &str) -> Result<String, ProviderError>;
}

/// Text-generation provider
///
/// The engine is provider-agnostic: responses may be fenced, prefixed, or
/// raw, and the executor extracts content accordingly.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue one blocking generation call
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Content accessor over the local filesystem
#[derive(Debug, Default, Clone)]
pub struct FsContentAccessor;

#[async_trait::async_trait]
impl ContentAccessor for FsContentAccessor {
    async fn read(&self, path: &str) -> Result<String, ProviderError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProviderError::Read {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Execution-scoped component content cache
///
/// Populated on first read and dropped with the execution; the repository
/// model itself is never mutated.
#[derive(Debug, Default)]
pub struct ContentCache {
    by_path: DashMap<String, String>,
}

impl ContentCache {
    /// Create an empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_path: DashMap::new(),
        }
    }

    /// Resolve a component's content
    ///
    /// Order: content already carried by the record, then the cache, then a
    /// provider read (which populates the cache).
    pub async fn resolve(
        &self,
        component: &TargetComponent,
        accessor: &dyn ContentAccessor,
    ) -> Result<String, ProviderError> {
        if let Some(content) = &component.content {
            return Ok(content.clone());
        }
        if let Some(cached) = self.by_path.get(&component.file_path) {
            return Ok(cached.value().clone());
        }

        tracing::debug!(path = %component.file_path, "fetching component content");
        let content = accessor.read(&component.file_path).await?;
        self.by_path
            .insert(component.file_path.clone(), content.clone());
        Ok(content)
    }

    /// Number of cached files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether the cache is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// Accessor serving content straight from the repository model's records
///
/// Useful when the indexer already embedded file content in the model.
#[derive(Debug)]
pub struct ModelContentAccessor<'a> {
    model: &'a RepoModel,
}

impl<'a> ModelContentAccessor<'a> {
    /// Wrap a repository model
    #[inline]
    #[must_use]
    pub fn new(model: &'a RepoModel) -> Self {
        Self { model }
    }
}

#[async_trait::async_trait]
impl ContentAccessor for ModelContentAccessor<'_> {
    async fn read(&self, path: &str) -> Result<String, ProviderError> {
        self.model
            .components()
            .iter()
            .find(|c| c.file_path == path)
            .and_then(|c| c.content.clone())
            .ok_or_else(|| ProviderError::Read {
                path: path.to_string(),
                reason: "no cached content in repository model".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_model::StylingIdiom;

    struct CountingAccessor {
        reads: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ContentAccessor for CountingAccessor {
        async fn read(&self, _path: &str) -> Result<String, ProviderError> {
            self.reads
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok("file content".to_string())
        }
    }

    #[tokio::test]
    async fn cache_reads_once() {
        let cache = ContentCache::new();
        let accessor = CountingAccessor {
            reads: std::sync::atomic::AtomicUsize::new(0),
        };
        let component =
            TargetComponent::new("Button", "src/Button.tsx", StylingIdiom::UtilityClasses);

        let first = cache.resolve(&component, &accessor).await.unwrap();
        let second = cache.resolve(&component, &accessor).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(accessor.reads.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn fs_accessor_reads_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Button.tsx");
        std::fs::write(&path, "export function Button() {}\n").unwrap();

        let accessor = FsContentAccessor;
        let content = accessor.read(path.to_str().unwrap()).await.unwrap();
        assert!(content.contains("Button"));

        let missing = accessor.read("/definitely/not/here.tsx").await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn embedded_content_skips_accessor() {
        let cache = ContentCache::new();
        let accessor = CountingAccessor {
            reads: std::sync::atomic::AtomicUsize::new(0),
        };
        let component = TargetComponent::new("Hero", "src/Hero.tsx", StylingIdiom::ScopedStyles)
            .with_content("embedded");

        let content = cache.resolve(&component, &accessor).await.unwrap();
        assert_eq!(content, "embedded");
        assert_eq!(accessor.reads.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }
}
