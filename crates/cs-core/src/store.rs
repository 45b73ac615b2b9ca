//! The comment store
//!
//! An ordered list of comments, each owning an ordered list of replies.
//! Positional operations mirror what a front end sees on screen; the
//! ID-based variants are what anything holding on to a comment across
//! deletes or sorts should use.
//!
//! Every failed operation leaves the published snapshot untouched.

use crate::clock::{Clock, SystemClock};
use crate::comment::{newest_first, Comment, Reply};
use crate::config::StoreConfig;
use crate::error::{CommentSectionError, Result};
use crate::snapshot::Snapshot;
use crate::types::{CommentId, ReplyId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory comment store
pub struct CommentStore {
    clock: Arc<dyn Clock>,
    current: Snapshot,
}

impl CommentStore {
    /// Create an empty store
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            current: Snapshot::default(),
        }
    }

    /// Create an empty store on the wall clock
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Create the starting store, seeded according to config
    pub fn initialize(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::new(clock);
        if config.seed {
            let id = store.add_comment(config.seed_text.clone());
            debug!("Seeded store with comment {}", id);
        }
        store
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Borrow the current snapshot without cloning
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Number of comments
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Total reply count
    pub fn reply_count(&self) -> usize {
        self.current.reply_count()
    }

    /// Comment at a position
    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.current.get(index)
    }

    /// Comment by ID
    pub fn get_by_id(&self, id: &CommentId) -> Option<&Comment> {
        self.current.get_by_id(id)
    }

    /// Position of a comment by ID
    pub fn position(&self, id: &CommentId) -> Option<usize> {
        self.current.position(id)
    }

    /// Append a comment stamped with the current time
    pub fn add_comment(&mut self, text: impl Into<String>) -> CommentId {
        let comment = Comment::new(text, self.clock.now());
        let id = comment.id;
        self.current.begin_mutation().push(Arc::new(comment));
        debug!("Added comment {} at position {}", id, self.len() - 1);
        id
    }

    /// Remove the comment at a position together with its replies
    pub fn delete_comment(&mut self, index: usize) -> Result<Comment> {
        self.check_index(index)?;

        let removed = self.current.begin_mutation().remove(index);
        let removed = Arc::unwrap_or_clone(removed);
        debug!(
            "Deleted comment {} at position {} ({} replies)",
            removed.id,
            index,
            removed.reply_count()
        );
        Ok(removed)
    }

    /// Remove a comment by ID
    pub fn delete_comment_by_id(&mut self, id: &CommentId) -> Result<Comment> {
        let index = self.require_position(id)?;
        self.delete_comment(index)
    }

    /// Append a reply to the comment at a position
    pub fn add_reply(&mut self, index: usize, text: impl Into<String>) -> Result<ReplyId> {
        self.check_index(index)?;

        let reply = Reply::new(text, self.clock.now());
        let reply_id = reply.id;
        let comments = self.current.begin_mutation();
        let comment = Arc::make_mut(&mut comments[index]);
        comment.push_reply(reply);
        debug!("Added reply {} to comment {}", reply_id, comment.id);
        Ok(reply_id)
    }

    /// Append a reply to a comment by ID
    pub fn add_reply_by_id(&mut self, id: &CommentId, text: impl Into<String>) -> Result<ReplyId> {
        let index = self.require_position(id)?;
        self.add_reply(index, text)
    }

    /// Order comments newest first, and each comment's replies newest first
    ///
    /// Stable: records sharing a timestamp keep their prior relative order,
    /// which also makes the operation idempotent.
    pub fn sort_by_recency(&mut self) {
        let comments = self.current.begin_mutation();
        comments.sort_by(|a, b| newest_first(&a.created_at, &b.created_at));
        for comment in comments.iter_mut() {
            let needs_sort = comment
                .replies()
                .windows(2)
                .any(|w| w[0].created_at < w[1].created_at);
            if needs_sort {
                Arc::make_mut(comment).sort_replies_by_recency();
            }
        }
        debug!("Sorted {} comments by recency", comments.len());
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            warn!("Rejected comment index {} (store has {})", index, len);
            return Err(CommentSectionError::OutOfRange { index, len });
        }
        Ok(())
    }

    fn require_position(&self, id: &CommentId) -> Result<usize> {
        self.position(id).ok_or_else(|| {
            warn!("Rejected unknown comment {}", id);
            CommentSectionError::CommentNotFound(id.to_string())
        })
    }
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl fmt::Debug for CommentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
