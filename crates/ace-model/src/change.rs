//! File changes
//!
//! The [`FileChange`] is the engine's unit of output.

use serde::{Deserialize, Serialize};

/// Action a change performs on its file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileAction {
    /// Modify an existing file
    Modify,
    /// Create a new file
    Create,
    /// Delete an existing file
    Delete,
}

/// One validated source-file modification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the affected file
    pub file_path: String,
    /// Action performed
    pub action: FileAction,
    /// Content before the change
    pub old_content: String,
    /// Content after the change
    pub new_content: String,
    /// Why the change looks the way it does
    pub reasoning: String,
}

impl FileChange {
    /// Create a modification
    #[inline]
    #[must_use]
    pub fn modify(
        file_path: impl Into<String>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            action: FileAction::Modify,
            old_content: old_content.into(),
            new_content: new_content.into(),
            reasoning: reasoning.into(),
        }
    }

    /// Ratio of new content length to old content length
    ///
    /// 1.0 for an empty original.
    #[must_use]
    pub fn retention_ratio(&self) -> f64 {
        if self.old_content.is_empty() {
            return 1.0;
        }
        self.new_content.len() as f64 / self.old_content.len() as f64
    }

    /// Swap old and new content (revert direction)
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            file_path: self.file_path.clone(),
            action: self.action,
            old_content: self.new_content.clone(),
            new_content: self.old_content.clone(),
            reasoning: format!("revert of: {}", self.reasoning),
        }
    }
}
