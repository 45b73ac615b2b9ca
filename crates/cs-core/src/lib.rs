//! cs-core - Core library for comment-section
//!
//! This crate provides an in-memory comment store: top-level comments with
//! replies, positional and ID-based mutation, recency sorting and immutable
//! snapshots, plus the draft state and configuration a front end needs.

pub mod error;
pub mod types;
pub mod clock;
pub mod config;
pub mod comment;
pub mod snapshot;
pub mod store;
pub mod draft;
pub mod validator;
pub mod section;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{CommentSectionError, Result};
pub use section::CommentSection;
pub use snapshot::Snapshot;
pub use store::CommentStore;
pub use types::*;
