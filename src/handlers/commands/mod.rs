//! Command handlers module
//!
//! This module contains handlers for all bot commands

pub mod cancel;
pub mod help;
pub mod start;

pub(crate) const PRIVATE_ONLY_TEXT: &str =
    "QuizBuddy runs quizzes in private chats only. Message me directly!";
