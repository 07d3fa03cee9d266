//! Selector lookup table
//!
//! Exact-match DOM-selector to component-name index. Thread-safe for
//! concurrent reads; built once by the indexer, read-only afterwards.

use dashmap::DashMap;

/// Selector-to-component lookup table
#[derive(Debug, Default)]
pub struct SelectorIndex {
    by_selector: DashMap<String, String>,
}

impl SelectorIndex {
    /// Create an empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_selector: DashMap::new(),
        }
    }

    /// Map a selector to a component name
    pub fn insert(&self, selector: impl Into<String>, component: impl Into<String>) {
        self.by_selector.insert(selector.into(), component.into());
    }

    /// Exact selector lookup
    #[must_use]
    pub fn lookup(&self, selector: &str) -> Option<String> {
        self.by_selector.get(selector).map(|e| e.value().clone())
    }

    /// Number of mapped selectors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_selector.len()
    }

    /// Whether the index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}
