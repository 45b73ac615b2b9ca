//! Unsubmitted reply text, keyed by comment ID

use crate::types::CommentId;
use std::collections::HashMap;

/// Per-comment reply drafts
#[derive(Debug, Clone, Default)]
pub struct DraftBuffers {
    drafts: HashMap<CommentId, String>,
}

impl DraftBuffers {
    /// Create empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft for a comment
    pub fn set(&mut self, id: CommentId, text: impl Into<String>) {
        self.drafts.insert(id, text.into());
    }

    /// Draft for a comment
    pub fn get(&self, id: &CommentId) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    /// Remove and return the draft, empty if there was none
    pub fn take(&mut self, id: &CommentId) -> String {
        self.drafts.remove(id).unwrap_or_default()
    }

    /// Drop the draft for a comment
    pub fn remove(&mut self, id: &CommentId) -> Option<String> {
        self.drafts.remove(id)
    }

    /// Number of comments with a draft
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
