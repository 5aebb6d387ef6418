//! Question and question bank models
//!
//! The question bank is built once at startup, validated, and then shared
//! read-only by every session for the lifetime of the process.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{QuizBuddyError, Result};

/// A single multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question text, unique within the bank
    pub prompt: String,
    /// Answer options; order is insignificant until presentation
    pub options: Vec<String>,
    /// The correct answer, always one of `options`
    pub correct: String,
}

impl Question {
    /// Build a question, enforcing the bank invariants: at least two options
    /// and the correct answer present among them.
    pub fn new(prompt: String, options: Vec<String>, correct: String) -> Result<Self> {
        if options.len() < 2 {
            return Err(QuizBuddyError::Validation {
                prompt,
                reason: format!("needs at least 2 options, has {}", options.len()),
            });
        }

        if !options.contains(&correct) {
            return Err(QuizBuddyError::Validation {
                prompt,
                reason: format!("correct answer '{}' is not among the options", correct),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct,
        })
    }
}

/// Immutable, process-wide table of questions plus the post-win and
/// post-loss messages extracted from the raw bank.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
    win_message: String,
    loss_message: String,
}

impl QuestionBank {
    /// Assemble a bank from already-validated questions.
    ///
    /// Fails if two questions share a prompt; the prompt is the bank key.
    pub fn new(
        questions: Vec<Question>,
        win_message: String,
        loss_message: String,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(questions.len());
        for (i, question) in questions.iter().enumerate() {
            if index.insert(question.prompt.clone(), i).is_some() {
                return Err(QuizBuddyError::Validation {
                    prompt: question.prompt.clone(),
                    reason: "duplicate prompt in question bank".to_string(),
                });
            }
        }

        Ok(Self {
            questions,
            index,
            win_message,
            loss_message,
        })
    }

    /// Look up a question by prompt
    pub fn get(&self, prompt: &str) -> Option<&Question> {
        self.index.get(prompt).map(|&i| &self.questions[i])
    }

    /// Number of questions in the bank
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over all prompts in bank order
    pub fn prompts(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.prompt.as_str())
    }

    /// Message sent after a winning round
    pub fn win_message(&self) -> &str {
        &self.win_message
    }

    /// Message sent after a losing round
    pub fn loss_message(&self) -> &str {
        &self.loss_message
    }
}
