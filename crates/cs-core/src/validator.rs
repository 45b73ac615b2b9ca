//! Text validation for submitted comments and replies
//!
//! The store accepts any text. Front ends that want to refuse blank or
//! oversized input run it through a [`TextValidator`] first.

use crate::config::InputConfig;
use crate::error::{CommentSectionError, Result};

/// Maximum text length (default)
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Validator for comment and reply text
#[derive(Debug, Clone)]
pub struct TextValidator {
    allow_empty: bool,
    max_length: usize,
}

impl TextValidator {
    /// Create a validator that rejects blank text
    pub fn new() -> Self {
        Self {
            allow_empty: false,
            max_length: MAX_TEXT_LENGTH,
        }
    }

    /// Create a validator with a custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::new()
        }
    }

    /// Create a validator from input configuration
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            allow_empty: config.allow_empty,
            max_length: config.max_length,
        }
    }

    /// Validate text
    pub fn validate(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();

        if trimmed.is_empty() && !self.allow_empty {
            return Err(CommentSectionError::Validation(
                "Text cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(CommentSectionError::Validation(format!(
                "Text exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for TextValidator {
    fn default() -> Self {
        Self::new()
    }
}
