//! Data models module
//!
//! This module contains the core data structures for questions and sessions

pub mod question;
pub mod session;

pub use question::{Question, QuestionBank};
pub use session::QuizSession;
