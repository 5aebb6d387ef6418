//! Services module
//!
//! This module contains the quiz business logic

pub mod bank;
pub mod engine;

// Re-export commonly used services
pub use bank::load_bank;
pub use engine::{MenuChoice, QuizEngine, QuizEvent, Reply, ReplyButton, Transition};
