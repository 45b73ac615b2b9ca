//! Comment data models

use crate::types::{CommentId, ReplyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A reply attached to exactly one comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Unique reply identifier
    pub id: ReplyId,
    /// Reply body, may be empty
    pub text: String,
    /// When the reply was created
    pub created_at: DateTime<Utc>,
}

impl Reply {
    /// Create a reply stamped with the given time
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ReplyId::new(),
            text: text.into(),
            created_at,
        }
    }

    /// Creation time in milliseconds since the epoch
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

/// A top-level comment and its replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Comment body
    pub text: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// Replies in insertion order until sorted
    #[serde(default)]
    replies: Vec<Reply>,
}

impl Comment {
    /// Create a comment with no replies
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new(),
            text: text.into(),
            created_at,
            replies: Vec::new(),
        }
    }

    /// Creation time in milliseconds since the epoch
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// Replies in their current order
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// Number of replies
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Find a reply by ID
    pub fn reply(&self, id: &ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == id)
    }

    /// Append a reply; the only way a reply enters a comment
    pub(crate) fn push_reply(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    /// Reorder replies newest first
    pub(crate) fn sort_replies_by_recency(&mut self) {
        self.replies
            .sort_by(|a, b| newest_first(&a.created_at, &b.created_at));
    }
}

/// Descending timestamp order
///
/// Used with stable sorts, so equal timestamps keep their prior relative order.
pub fn newest_first(a: &DateTime<Utc>, b: &DateTime<Utc>) -> Ordering {
    b.cmp(a)
}
