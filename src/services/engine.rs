//! Quiz state machine
//!
//! The engine computes, for one user at a time, the next conversation state,
//! the updated session, and the replies to send, given the current state and
//! an inbound event. It never talks to Telegram itself; the handlers render
//! its replies. All transitions are an exhaustive match over the state and
//! event enums, so there is no state a button press can reach that this
//! module has not spelled out.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::QuizConfig;
use crate::models::{QuestionBank, QuizSession};
use crate::state::ChatState;
use crate::utils::errors::{QuizBuddyError, Result};

/// Callback-data action for Yes/No/Help menu buttons
pub const CALLBACK_MENU_PREFIX: &str = "menu";

/// Callback-data action for answer buttons
pub const CALLBACK_ANSWER_PREFIX: &str = "answer";

const GREETING: &str = "👋 Hey there! I'm QuizBuddy, your trivia host.\n\nUp for a quiz?";
const DECLINED: &str = "No worries! Come back any time with /start. 👋";
const ALREADY_WON: &str = "🏆 You've already beaten the quiz. Nothing left to prove!";
const FAREWELL: &str = "Quiz cancelled. See you around! 👋";
const REPLAY_OFFER: &str = "Fancy another round?";

/// Inbound event decoded from a Telegram update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// The /start command
    Start,
    /// The /help command
    Help,
    /// The /cancel command
    Cancel,
    /// A Yes/No/Help menu button press
    Menu(MenuChoice),
    /// An answer button press carrying the selected option text
    Answer(String),
}

/// Choices offered on the start/replay menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Yes,
    No,
    Help,
}

impl MenuChoice {
    /// Decode the payload of a `menu:` callback
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "yes" => Some(MenuChoice::Yes),
            "no" => Some(MenuChoice::No),
            "help" => Some(MenuChoice::Help),
            _ => None,
        }
    }
}

/// One outbound message; buttons are rendered as an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<ReplyButton>,
}

/// A single inline-keyboard button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyButton {
    pub label: String,
    pub data: String,
}

impl Reply {
    /// Plain text reply without a keyboard
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Reply carrying the Yes/No/Help menu
    fn with_menu(text: impl Into<String>) -> Self {
        let menu = [("Yes", "yes"), ("No", "no"), ("Help", "help")];
        Self {
            text: text.into(),
            buttons: menu
                .iter()
                .map(|(label, payload)| ReplyButton {
                    label: label.to_string(),
                    data: format!("{}:{}", CALLBACK_MENU_PREFIX, payload),
                })
                .collect(),
        }
    }
}

/// Result of applying one event: the state and session to store, and the
/// replies to send in order
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ChatState,
    pub session: Option<QuizSession>,
    pub replies: Vec<Reply>,
}

impl Transition {
    /// Leave everything untouched and say nothing (unrecognized input,
    /// stale buttons)
    fn noop(state: ChatState, session: Option<QuizSession>) -> Self {
        Self {
            state,
            session,
            replies: Vec::new(),
        }
    }
}

/// The per-user quiz state machine
#[derive(Debug, Clone)]
pub struct QuizEngine {
    bank: Arc<QuestionBank>,
    config: QuizConfig,
}

impl QuizEngine {
    /// Create the engine, failing fast if the bank cannot cover one round.
    /// This check runs once at startup so sampling never fails per-attempt.
    pub fn new(bank: Arc<QuestionBank>, config: QuizConfig) -> Result<Self> {
        if bank.len() < config.questions {
            return Err(QuizBuddyError::Config(format!(
                "question bank holds {} questions but {} are required per round",
                bank.len(),
                config.questions
            )));
        }

        Ok(Self { bank, config })
    }

    /// Apply one inbound event and compute the next state, the updated
    /// session, and the replies to send.
    pub fn transition<R: Rng>(
        &self,
        user_id: i64,
        state: ChatState,
        session: Option<QuizSession>,
        event: QuizEvent,
        rng: &mut R,
    ) -> Result<Transition> {
        match event {
            QuizEvent::Start => Ok(Transition {
                state: ChatState::AwaitingStart,
                session,
                replies: vec![Reply::with_menu(GREETING)],
            }),
            QuizEvent::Cancel => Ok(Transition {
                state: ChatState::Ended,
                session,
                replies: vec![Reply::text(FAREWELL)],
            }),
            QuizEvent::Help => {
                let reply = if state == ChatState::AwaitingStart {
                    Reply::with_menu(self.rules_text())
                } else {
                    Reply::text(self.rules_text())
                };
                Ok(Transition {
                    state,
                    session,
                    replies: vec![reply],
                })
            }
            QuizEvent::Menu(choice) => match state {
                ChatState::AwaitingStart => match choice {
                    MenuChoice::Help => Ok(Transition {
                        state,
                        session,
                        replies: vec![Reply::with_menu(self.rules_text())],
                    }),
                    MenuChoice::No => Ok(Transition {
                        state: ChatState::Ended,
                        session,
                        replies: vec![Reply::text(DECLINED)],
                    }),
                    MenuChoice::Yes => self.begin_round(user_id, session, rng),
                },
                // Stale menu buttons outside the offer
                _ => Ok(Transition::noop(state, session)),
            },
            QuizEvent::Answer(text) => match state {
                ChatState::InQuestion => self.grade_answer(session, &text, rng),
                // Stale answer buttons after the round ended
                _ => Ok(Transition::noop(state, session)),
            },
        }
    }

    /// Start a fresh round if the user is eligible: create the session on
    /// first play, otherwise count the retry, then sample and ask the first
    /// question.
    fn begin_round<R: Rng>(
        &self,
        user_id: i64,
        session: Option<QuizSession>,
        rng: &mut R,
    ) -> Result<Transition> {
        let mut session = match session {
            Some(s) if s.won => {
                return Ok(Transition {
                    state: ChatState::Ended,
                    session: Some(s),
                    replies: vec![Reply::text(ALREADY_WON)],
                });
            }
            Some(s) if s.attempt >= self.config.retries => {
                let text = format!(
                    "😔 You've used all {} rounds. Thanks for playing!",
                    self.config.retries
                );
                return Ok(Transition {
                    state: ChatState::Ended,
                    session: Some(s),
                    replies: vec![Reply::text(text)],
                });
            }
            Some(mut s) => {
                s.attempt += 1;
                s
            }
            None => QuizSession::new(user_id),
        };

        session.begin_round(self.sample_prompts(rng));
        let first_question = self.present_question(&session, rng)?;

        Ok(Transition {
            state: ChatState::InQuestion,
            session: Some(session),
            replies: vec![first_question],
        })
    }

    /// Score one answer and either ask the next question or close the round.
    fn grade_answer<R: Rng>(
        &self,
        session: Option<QuizSession>,
        answer: &str,
        rng: &mut R,
    ) -> Result<Transition> {
        let mut session = session.ok_or_else(|| {
            QuizBuddyError::InvariantViolation(
                "answer received with no active session".to_string(),
            )
        })?;

        let prompt = session
            .current_prompt()
            .ok_or_else(|| {
                QuizBuddyError::InvariantViolation(format!(
                    "question cursor {} out of bounds for round of {}",
                    session.question_index,
                    session.round_len()
                ))
            })?
            .to_string();

        let question = self.bank.get(&prompt).ok_or_else(|| {
            QuizBuddyError::InvariantViolation(format!(
                "prompt '{}' missing from question bank",
                prompt
            ))
        })?;

        // Exact, case-sensitive comparison
        if question.correct == answer {
            session.score += 1;
        }
        session.question_index += 1;

        if !session.round_complete() {
            let next_question = self.present_question(&session, rng)?;
            return Ok(Transition {
                state: ChatState::InQuestion,
                session: Some(session),
                replies: vec![next_question],
            });
        }

        let summary = format!(
            "🏁 Round over! You got {} out of {} right.",
            session.score,
            session.round_len()
        );
        let verdict = if session.score >= self.config.win_threshold {
            session.won = true;
            self.bank.win_message().to_string()
        } else {
            self.bank.loss_message().to_string()
        };

        Ok(Transition {
            state: ChatState::AwaitingStart,
            session: Some(session),
            replies: vec![
                Reply::text(summary),
                Reply::with_menu(format!("{}\n\n{}", verdict, REPLAY_OFFER)),
            ],
        })
    }

    /// Draw a uniform sample of prompts without replacement.
    /// The constructor guarantees the bank is large enough.
    fn sample_prompts<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        let prompts: Vec<&str> = self.bank.prompts().collect();
        rand::seq::index::sample(rng, prompts.len(), self.config.questions)
            .iter()
            .map(|i| prompts[i].to_string())
            .collect()
    }

    /// Build the message for the question under the cursor, options shuffled
    /// fresh for this presentation.
    fn present_question<R: Rng>(&self, session: &QuizSession, rng: &mut R) -> Result<Reply> {
        let prompt = session.current_prompt().ok_or_else(|| {
            QuizBuddyError::InvariantViolation(
                "presenting a question past the end of the round".to_string(),
            )
        })?;

        let question = self.bank.get(prompt).ok_or_else(|| {
            QuizBuddyError::InvariantViolation(format!(
                "prompt '{}' missing from question bank",
                prompt
            ))
        })?;

        let mut options: Vec<&String> = question.options.iter().collect();
        options.shuffle(rng);

        Ok(Reply {
            text: format!(
                "❓ Question {}/{}\n\n{}",
                session.question_index + 1,
                session.round_len(),
                prompt
            ),
            buttons: options
                .into_iter()
                .map(|option| ReplyButton {
                    label: option.clone(),
                    data: format!("{}:{}", CALLBACK_ANSWER_PREFIX, option),
                })
                .collect(),
        })
    }

    fn rules_text(&self) -> String {
        format!(
            "📖 How it works:\n\n\
             • Each round asks {} randomly picked questions.\n\
             • Tap a button under the question to answer.\n\
             • Get {} or more right and you win.\n\
             • You have up to {} rounds in total.\n\
             • Try to answer each question within {} seconds.",
            self.config.questions,
            self.config.win_threshold,
            self.config.retries,
            self.config.question_time_seconds
        )
    }
}
