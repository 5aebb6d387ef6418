//! QuizBuddy Telegram Bot
//!
//! A Telegram bot that runs timed multiple-choice trivia quizzes.
//! This library provides the question bank, the per-user quiz state machine,
//! the in-memory session store, and the teloxide handlers that drive them.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{QuizBuddyError, Result};

// Re-export main components for easy access
pub use models::{Question, QuestionBank, QuizSession};
pub use services::{load_bank, QuizEngine};
pub use state::{ChatState, ConversationContext, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
