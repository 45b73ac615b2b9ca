//! Immutable views of the comment store
//!
//! A [`Snapshot`] is what the store publishes after every mutation. Holding
//! one never blocks or observes later mutations: the store copies the
//! comment list (and any comment it touches) only when a snapshot still
//! shares it.

use crate::comment::Comment;
use crate::error::Result;
use crate::types::CommentId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Published state of a comment store
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Number of mutations published before this snapshot
    version: u64,
    /// Comments in display order
    comments: Arc<Vec<Arc<Comment>>>,
}

impl Snapshot {
    /// Build a snapshot from owned comments
    pub fn from_comments(comments: impl IntoIterator<Item = Comment>) -> Self {
        Self {
            version: 0,
            comments: Arc::new(comments.into_iter().map(Arc::new).collect()),
        }
    }

    /// Mutation counter
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of comments
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Comment at a position
    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index).map(|c| c.as_ref())
    }

    /// Position of a comment by ID
    pub fn position(&self, id: &CommentId) -> Option<usize> {
        self.comments.iter().position(|c| &c.id == id)
    }

    /// Comment by ID
    pub fn get_by_id(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id).map(|c| c.as_ref())
    }

    /// Iterate comments in order
    pub fn iter(&self) -> impl Iterator<Item = &Comment> + '_ {
        self.comments.iter().map(|c| c.as_ref())
    }

    /// Comments in order, cloned out of the snapshot
    pub fn comments(&self) -> Vec<Comment> {
        self.iter().cloned().collect()
    }

    /// IDs in display order
    pub fn ids(&self) -> Vec<CommentId> {
        self.comments.iter().map(|c| c.id).collect()
    }

    /// Total number of replies across all comments
    pub fn reply_count(&self) -> usize {
        self.comments.iter().map(|c| c.reply_count()).sum()
    }

    /// Export as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether two snapshots share the same comment list allocation
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.comments, &other.comments)
    }

    /// Mutable access for the store; clones the list if another snapshot
    /// still holds it, and bumps the version
    pub(crate) fn begin_mutation(&mut self) -> &mut Vec<Arc<Comment>> {
        self.version += 1;
        Arc::make_mut(&mut self.comments)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Snapshot {}

#[derive(Serialize)]
struct SnapshotView<'a> {
    version: u64,
    comments: Vec<&'a Comment>,
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SnapshotView {
            version: self.version,
            comments: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SnapshotHelper {
            #[serde(default)]
            version: u64,
            comments: Vec<Comment>,
        }

        let helper = SnapshotHelper::deserialize(deserializer)?;
        let mut snapshot = Snapshot::from_comments(helper.comments);
        snapshot.version = helper.version;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::from_millis;
    use pretty_assertions::assert_eq;

    fn sample() -> Snapshot {
        Snapshot::from_comments(vec![
            Comment::new("one", from_millis(1)),
            Comment::new("two", from_millis(2)),
        ])
    }

    #[test]
    fn test_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.get(1).map(|c| c.text.as_str()), Some("two"));
        assert!(snapshot.get(2).is_none());

        let id = snapshot.ids()[0];
        assert_eq!(snapshot.position(&id), Some(0));
        assert_eq!(snapshot.get_by_id(&id).map(|c| c.text.as_str()), Some("one"));
    }

    #[test]
    fn test_mutation_copies_shared_list() {
        let mut snapshot = sample();
        let held = snapshot.clone();
        assert!(snapshot.shares_storage_with(&held));

        snapshot.begin_mutation().remove(0);

        assert!(!snapshot.shares_storage_with(&held));
        assert_eq!(held.len(), 2);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.version(), held.version() + 1);
    }

    #[test]
    fn test_equality_ignores_version() {
        let mut a = sample();
        let b = a.clone();
        a.begin_mutation();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_export() {
        let snapshot = sample();
        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"comments\""));
        assert!(json.contains("\"one\""));

        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
