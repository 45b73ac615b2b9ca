//! Comment section state
//!
//! A [`CommentSection`] is what a front end drives: the store plus the
//! text the user has typed but not yet submitted. Reply drafts are keyed by
//! comment ID, so they stay attached to the right comment when others are
//! deleted or the list is re-sorted.

use crate::clock::Clock;
use crate::config::Config;
use crate::draft::DraftBuffers;
use crate::error::{CommentSectionError, Result};
use crate::snapshot::Snapshot;
use crate::store::CommentStore;
use crate::types::{CommentId, ReplyId};
use crate::validator::TextValidator;
use std::sync::Arc;
use tracing::{debug, info};

/// Store plus unsubmitted input
#[derive(Debug)]
pub struct CommentSection {
    store: CommentStore,
    new_comment: String,
    reply_drafts: DraftBuffers,
    validator: Option<TextValidator>,
}

impl CommentSection {
    /// Wrap a store with no validation
    pub fn new(store: CommentStore) -> Self {
        Self {
            store,
            new_comment: String::new(),
            reply_drafts: DraftBuffers::new(),
            validator: None,
        }
    }

    /// Initialize store and validator from configuration
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let store = CommentStore::initialize(&config.store, clock);
        info!("Comment section started with {} comments", store.len());
        Self::new(store).with_validator(TextValidator::from_config(&config.input))
    }

    /// Validate submitted text
    pub fn with_validator(mut self, validator: TextValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The underlying store
    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Replace the new-comment draft
    pub fn set_new_comment_draft(&mut self, text: impl Into<String>) {
        self.new_comment = text.into();
    }

    /// Current new-comment draft
    pub fn new_comment_draft(&self) -> &str {
        &self.new_comment
    }

    /// Submit the new-comment draft
    ///
    /// The draft is cleared only when the comment is added.
    pub fn submit_comment(&mut self) -> Result<CommentId> {
        self.validate(&self.new_comment)?;
        let text = std::mem::take(&mut self.new_comment);
        Ok(self.store.add_comment(text))
    }

    /// Replace the reply draft of the comment at a position
    pub fn set_reply_draft(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let id = self.id_at(index)?;
        self.reply_drafts.set(id, text);
        Ok(())
    }

    /// Reply draft of the comment at a position
    pub fn reply_draft(&self, index: usize) -> Option<&str> {
        let comment = self.store.get(index)?;
        self.reply_drafts.get(&comment.id)
    }

    /// Reply draft by comment ID
    pub fn reply_draft_by_id(&self, id: &CommentId) -> Option<&str> {
        self.reply_drafts.get(id)
    }

    /// Submit the reply draft of the comment at a position
    ///
    /// A missing draft submits empty text, which the validator may refuse.
    /// On any failure the draft is kept.
    pub fn submit_reply(&mut self, index: usize) -> Result<ReplyId> {
        let id = self.id_at(index)?;
        self.validate(self.reply_drafts.get(&id).unwrap_or_default())?;

        let text = self.reply_drafts.take(&id);
        self.store.add_reply(index, text)
    }

    /// Submit a reply with the given text instead of the draft
    ///
    /// The comment's draft is cleared on success and left as it was on any
    /// failure.
    pub fn submit_reply_with(&mut self, index: usize, text: impl Into<String>) -> Result<ReplyId> {
        let id = self.id_at(index)?;
        let text = text.into();
        self.validate(&text)?;

        let reply_id = self.store.add_reply(index, text)?;
        self.reply_drafts.remove(&id);
        Ok(reply_id)
    }

    /// Delete the comment at a position along with its reply draft
    pub fn delete_comment(&mut self, index: usize) -> Result<()> {
        let removed = self.store.delete_comment(index)?;
        if self.reply_drafts.remove(&removed.id).is_some() {
            debug!("Dropped reply draft of deleted comment {}", removed.id);
        }
        Ok(())
    }

    /// Sort comments and replies newest first
    pub fn sort_by_recency(&mut self) {
        self.store.sort_by_recency();
    }

    /// Number of comments with a pending reply draft
    pub fn pending_reply_drafts(&self) -> usize {
        self.reply_drafts.len()
    }

    fn id_at(&self, index: usize) -> Result<CommentId> {
        match self.store.get(index) {
            Some(comment) => Ok(comment.id),
            None => Err(CommentSectionError::OutOfRange {
                index,
                len: self.store.len(),
            }),
        }
    }

    fn validate(&self, text: &str) -> Result<()> {
        match &self.validator {
            Some(validator) => validator.validate(text),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use pretty_assertions::assert_eq;

    fn section() -> (CommentSection, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_millis(1_000));
        let section = CommentSection::from_config(&Config::default(), clock.clone());
        (section, clock)
    }

    #[test]
    fn test_from_config_seeds_store() {
        let (section, _) = section();
        assert_eq!(section.store().len(), 1);
        assert_eq!(section.new_comment_draft(), "");
    }

    #[test]
    fn test_submit_comment_clears_draft() {
        let (mut section, _) = section();
        section.set_new_comment_draft("Hello");

        let id = section.submit_comment().unwrap();

        assert_eq!(section.new_comment_draft(), "");
        assert_eq!(section.store().get(1).unwrap().id, id);
        assert_eq!(section.store().get(1).unwrap().text, "Hello");
    }

    #[test]
    fn test_rejected_comment_keeps_draft_and_store() {
        let (mut section, _) = section();
        section.set_new_comment_draft("   ");
        let before = section.snapshot();

        let err = section.submit_comment().unwrap_err();

        assert!(matches!(err, CommentSectionError::Validation(_)));
        assert_eq!(section.new_comment_draft(), "   ");
        assert_eq!(section.snapshot(), before);
    }

    #[test]
    fn test_without_validator_empty_text_is_accepted() {
        let store = CommentStore::new(Arc::new(ManualClock::default()));
        let mut section = CommentSection::new(store);
        section.submit_comment().unwrap();
        section.submit_reply(0).unwrap();
        assert_eq!(section.store().get(0).unwrap().replies()[0].text, "");
    }

    #[test]
    fn test_submit_reply_uses_and_clears_draft() {
        let (mut section, clock) = section();
        section.set_reply_draft(0, "Hi").unwrap();
        assert_eq!(section.reply_draft(0), Some("Hi"));

        clock.advance(10);
        section.submit_reply(0).unwrap();

        let replies = section.store().get(0).unwrap().replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "Hi");
        assert_eq!(replies[0].created_at_millis(), 1_010);
        assert!(section.reply_draft(0).is_none());
    }

    #[test]
    fn test_rejected_reply_keeps_draft() {
        let (mut section, _) = section();
        section.set_reply_draft(0, "").unwrap();

        assert!(section.submit_reply(0).is_err());
        assert_eq!(section.reply_draft(0), Some(""));
        assert_eq!(section.store().reply_count(), 0);
    }

    #[test]
    fn test_submit_reply_with_text_clears_draft() {
        let (mut section, _) = section();
        section.set_reply_draft(0, "earlier").unwrap();

        section.submit_reply_with(0, "direct").unwrap();

        let replies = section.store().get(0).unwrap().replies();
        assert_eq!(replies[0].text, "direct");
        assert!(section.reply_draft(0).is_none());
    }

    #[test]
    fn test_rejected_reply_with_text_keeps_earlier_draft() {
        let clock = Arc::new(ManualClock::default());
        let mut config = Config::default();
        config.input.max_length = 5;
        let mut section = CommentSection::from_config(&config, clock);
        section.set_reply_draft(0, "keep").unwrap();

        let err = section.submit_reply_with(0, "way too long").unwrap_err();

        assert!(matches!(err, CommentSectionError::Validation(_)));
        assert_eq!(section.reply_draft(0), Some("keep"));
        assert_eq!(section.store().reply_count(), 0);
    }

    #[test]
    fn test_out_of_range_draft() {
        let (mut section, _) = section();
        let err = section.set_reply_draft(3, "x").unwrap_err();
        assert!(err.is_out_of_range());
        assert!(section.submit_reply(3).unwrap_err().is_out_of_range());
        assert!(section.reply_draft(3).is_none());
    }

    #[test]
    fn test_drafts_follow_comments_through_sort() {
        let (mut section, clock) = section();
        let seed = section.store().get(0).unwrap().id;
        clock.advance(1);
        section.set_new_comment_draft("newer");
        let newer = section.submit_comment().unwrap();

        section.set_reply_draft(0, "for the seed").unwrap();
        section.set_reply_draft(1, "for newer").unwrap();

        section.sort_by_recency();

        assert_eq!(section.store().position(&newer), Some(0));
        assert_eq!(section.reply_draft(0), Some("for newer"));
        assert_eq!(section.reply_draft(1), Some("for the seed"));
        assert_eq!(section.reply_draft_by_id(&seed), Some("for the seed"));
    }

    #[test]
    fn test_drafts_follow_comments_through_delete() {
        let (mut section, _) = section();
        section.set_new_comment_draft("second");
        section.submit_comment().unwrap();
        section.set_new_comment_draft("third");
        section.submit_comment().unwrap();

        section.set_reply_draft(0, "draft 0").unwrap();
        section.set_reply_draft(2, "draft 2").unwrap();

        section.delete_comment(0).unwrap();

        assert_eq!(section.pending_reply_drafts(), 1);
        assert!(section.reply_draft(0).is_none());
        assert_eq!(section.reply_draft(1), Some("draft 2"));
    }
}
