//! Utility theme table
//!
//! Maps (property, value) pairs onto the repository's utility-class tokens.
//! The table is part of the repository's styling conventions; the analyzer
//! only looks values up and synthesizes arbitrary-value tokens on miss.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lookup table from (property, value) to a utility token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeTable {
    entries: IndexMap<String, String>,
}

impl ThemeTable {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with a conventional utility scale
    ///
    /// Covers the enumerable properties the analyzer maps most often:
    /// font sizes, a small color palette, and the 4px spacing scale.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (property, value, token) in [
            ("font-size", "12px", "text-xs"),
            ("font-size", "14px", "text-sm"),
            ("font-size", "16px", "text-base"),
            ("font-size", "18px", "text-lg"),
            ("font-size", "20px", "text-xl"),
            ("font-size", "24px", "text-2xl"),
            ("color", "#ffffff", "text-white"),
            ("color", "#000000", "text-black"),
            ("color", "#ef4444", "text-red-500"),
            ("color", "#3b82f6", "text-blue-500"),
            ("color", "#22c55e", "text-green-500"),
            ("background-color", "#ffffff", "bg-white"),
            ("background-color", "#000000", "bg-black"),
            ("background-color", "#3b82f6", "bg-blue-500"),
            ("margin", "4px", "m-1"),
            ("margin", "8px", "m-2"),
            ("margin", "16px", "m-4"),
            ("margin", "24px", "m-6"),
            ("padding", "4px", "p-1"),
            ("padding", "8px", "p-2"),
            ("padding", "16px", "p-4"),
            ("padding", "24px", "p-6"),
            ("font-weight", "700", "font-bold"),
            ("font-weight", "600", "font-semibold"),
            ("text-align", "center", "text-center"),
            ("text-align", "right", "text-right"),
        ] {
            table.insert(property, value, token);
        }
        table
    }

    /// Register a token mapping
    pub fn insert(&mut self, property: &str, value: &str, token: &str) {
        self.entries
            .insert(Self::key(property, value), token.to_string());
    }

    /// Exact token lookup for a (property, value) pair
    #[must_use]
    pub fn token_for(&self, property: &str, value: &str) -> Option<&str> {
        self.entries
            .get(&Self::key(property, value))
            .map(String::as_str)
    }

    /// Number of registered mappings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no mappings
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(property: &str, value: &str) -> String {
        format!("{}:{}", property.trim().to_lowercase(), value.trim().to_lowercase())
    }
}
