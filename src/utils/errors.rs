//! Error handling for QuizBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the QuizBuddy application
#[derive(Error, Debug)]
pub enum QuizBuddyError {
    #[error("Invalid question '{prompt}': {reason}")]
    Validation { prompt: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Question bank parse error: {0}")]
    BankParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for QuizBuddy operations
pub type Result<T> = std::result::Result<T, QuizBuddyError>;

impl QuizBuddyError {
    /// Whether the error means the process (or the affected conversation)
    /// cannot continue. Validation, configuration, and bank errors abort
    /// startup; an invariant violation aborts one user's conversation.
    pub fn is_fatal(&self) -> bool {
        match self {
            QuizBuddyError::Validation { .. } => true,
            QuizBuddyError::Config(_) => true,
            QuizBuddyError::InvariantViolation(_) => true,
            QuizBuddyError::BankParse(_) => true,
            QuizBuddyError::Io(_) => true,
            QuizBuddyError::Telegram(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_classes() {
        assert!(QuizBuddyError::Config("bad".to_string()).is_fatal());
        assert!(QuizBuddyError::InvariantViolation("cursor".to_string()).is_fatal());
        assert!(QuizBuddyError::Validation {
            prompt: "q".to_string(),
            reason: "too few options".to_string(),
        }
        .is_fatal());
    }
}
