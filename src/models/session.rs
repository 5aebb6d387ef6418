//! Quiz session model
//!
//! One session per Telegram user, tracking win status and attempt history
//! across rounds and the cursor/score within the current round. Mutated
//! exclusively by the quiz engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user quiz progress and eligibility record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    /// Telegram user id this session belongs to
    pub user_id: i64,
    /// True once the user has cleared the win threshold; never reset
    pub won: bool,
    /// Rounds started, 1 on first play
    pub attempt: u32,
    /// Prompts sampled for the current round, in asking order
    pub question_order: Vec<String>,
    /// 0-based cursor into `question_order`
    pub question_index: usize,
    /// Correct answers so far in the current round
    pub score: usize,
    /// When this session was created
    pub created_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session for a user's first round
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            won: false,
            attempt: 1,
            question_order: Vec::new(),
            question_index: 0,
            score: 0,
            created_at: Utc::now(),
        }
    }

    /// Reset the round state for a fresh attempt with a new sample
    pub fn begin_round(&mut self, question_order: Vec<String>) {
        self.question_order = question_order;
        self.question_index = 0;
        self.score = 0;
    }

    /// Number of questions in the current round
    pub fn round_len(&self) -> usize {
        self.question_order.len()
    }

    /// Whether every question of the current round has been answered
    pub fn round_complete(&self) -> bool {
        self.question_index >= self.question_order.len()
    }

    /// Prompt the cursor points at, if the round is still in progress
    pub fn current_prompt(&self) -> Option<&str> {
        self.question_order
            .get(self.question_index)
            .map(|p| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = QuizSession::new(42);
        assert_eq!(session.user_id, 42);
        assert!(!session.won);
        assert_eq!(session.attempt, 1);
        assert_eq!(session.score, 0);
        assert!(session.question_order.is_empty());
        assert!(session.round_complete());
    }

    #[test]
    fn test_begin_round_resets_cursor_and_score() {
        let mut session = QuizSession::new(42);
        session.begin_round(vec!["a".to_string(), "b".to_string()]);
        session.score = 1;
        session.question_index = 2;

        session.begin_round(vec!["c".to_string(), "d".to_string()]);
        assert_eq!(session.score, 0);
        assert_eq!(session.question_index, 0);
        assert_eq!(session.current_prompt(), Some("c"));
        assert!(!session.round_complete());
    }
}
