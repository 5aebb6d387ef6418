//! Conversation context
//!
//! One context per user: where the conversation stands plus the quiz
//! session, if the user has ever started playing. The session outlives the
//! conversation (an ended chat keeps its win/attempt history).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::QuizSession;

/// Where a user's conversation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatState {
    /// Never interacted, or the store entry was just created
    Idle,
    /// The Yes/No/Help menu is on the table
    AwaitingStart,
    /// A question is waiting for an answer
    InQuestion,
    /// Conversation closed; /start opens a new one
    Ended,
}

/// Per-user conversation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// User this context belongs to
    pub user_id: i64,
    /// Current conversation state
    pub state: ChatState,
    /// Quiz progress across attempts, if the user ever played
    pub session: Option<QuizSession>,
    /// When this context was last touched; drives idle eviction
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a fresh context for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            state: ChatState::Idle,
            session: None,
            updated_at: Utc::now(),
        }
    }

    /// Record activity on this context
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
