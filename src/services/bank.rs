//! Question bank loader and validator
//!
//! Reads the question bank TOML file, extracts the reserved `winner` and
//! `failed` messages, coerces integer values to strings, and validates every
//! question. Runs once at startup; any error here aborts the process before
//! the bot starts serving updates.
//!
//! Expected format:
//!
//! ```toml
//! winner = "You beat the quiz!"
//! failed = "Better luck next time!"
//!
//! ["What is the capital of France?"]
//! options = ["Paris", "Lyon", "Marseille"]
//! correct = "Paris"
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::models::{Question, QuestionBank};
use crate::utils::errors::{QuizBuddyError, Result};

/// Reserved top-level key holding the post-win message
const WINNER_KEY: &str = "winner";

/// Reserved top-level key holding the post-loss message
const FAILED_KEY: &str = "failed";

/// Load and validate a question bank from a TOML file
pub fn load_bank(path: impl AsRef<Path>) -> Result<QuestionBank> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_bank(&raw)
}

/// Parse and validate a question bank from raw TOML text
pub fn parse_bank(raw: &str) -> Result<QuestionBank> {
    let mut table: toml::Table = raw.parse()?;

    let win_message = take_message(&mut table, WINNER_KEY)?;
    let loss_message = take_message(&mut table, FAILED_KEY)?;

    let mut questions = Vec::with_capacity(table.len());
    for (prompt, value) in table {
        debug!(prompt = %prompt, "Checking question");
        questions.push(parse_question(prompt, value)?);
    }

    QuestionBank::new(questions, win_message, loss_message)
}

/// Remove a reserved message key from the raw table
fn take_message(table: &mut toml::Table, key: &str) -> Result<String> {
    match table.remove(key) {
        Some(toml::Value::String(text)) => Ok(text),
        Some(_) => Err(QuizBuddyError::Validation {
            prompt: key.to_string(),
            reason: "reserved message key must hold a string".to_string(),
        }),
        None => Err(QuizBuddyError::Validation {
            prompt: key.to_string(),
            reason: "reserved message key missing from question bank".to_string(),
        }),
    }
}

fn parse_question(prompt: String, value: toml::Value) -> Result<Question> {
    let toml::Value::Table(entry) = value else {
        return Err(QuizBuddyError::Validation {
            prompt,
            reason: "expected a table with 'options' and 'correct'".to_string(),
        });
    };

    let options = match entry.get("options") {
        Some(toml::Value::Array(values)) => values
            .iter()
            .map(|v| coerce_to_string(&prompt, v))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(QuizBuddyError::Validation {
                prompt,
                reason: "'options' must be an array".to_string(),
            })
        }
        None => {
            return Err(QuizBuddyError::Validation {
                prompt,
                reason: "missing 'options'".to_string(),
            })
        }
    };

    let correct = match entry.get("correct") {
        Some(value) => coerce_to_string(&prompt, value)?,
        None => {
            return Err(QuizBuddyError::Validation {
                prompt,
                reason: "missing 'correct'".to_string(),
            })
        }
    };

    Question::new(prompt, options, correct)
}

/// Coerce a raw TOML value to a string.
///
/// Banks may write numeric answers as integers while the correct answer is a
/// string (or vice versa); both sides are stringified uniformly so exact
/// string comparison works for validation and scoring alike.
fn coerce_to_string(prompt: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        other => Err(QuizBuddyError::Validation {
            prompt: prompt.to_string(),
            reason: format!("unsupported value type '{}'", other.type_str()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const VALID_BANK: &str = r#"
winner = "You won!"
failed = "You lost!"

["What is 2 + 2?"]
options = [3, 4, 5]
correct = 4

["Largest planet?"]
options = ["Jupiter", "Saturn"]
correct = "Jupiter"
"#;

    #[test]
    fn test_parse_valid_bank() {
        let bank = parse_bank(VALID_BANK).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.win_message(), "You won!");
        assert_eq!(bank.loss_message(), "You lost!");

        let q = bank.get("What is 2 + 2?").unwrap();
        assert_eq!(q.options, vec!["3", "4", "5"]);
        assert_eq!(q.correct, "4");
    }

    #[test]
    fn test_reserved_keys_are_not_questions() {
        let bank = parse_bank(VALID_BANK).unwrap();
        assert!(bank.get("winner").is_none());
        assert!(bank.get("failed").is_none());
    }

    #[test]
    fn test_missing_winner_rejected() {
        let raw = r#"
failed = "You lost!"

["Q?"]
options = ["a", "b"]
correct = "a"
"#;
        let err = parse_bank(raw).unwrap_err();
        assert_matches!(err, QuizBuddyError::Validation { prompt, .. } if prompt == "winner");
    }

    #[test]
    fn test_missing_failed_rejected() {
        let raw = r#"
winner = "You won!"

["Q?"]
options = ["a", "b"]
correct = "a"
"#;
        let err = parse_bank(raw).unwrap_err();
        assert_matches!(err, QuizBuddyError::Validation { prompt, .. } if prompt == "failed");
    }

    #[test]
    fn test_too_few_options_rejected() {
        let raw = r#"
winner = "w"
failed = "f"

["Short one"]
options = ["only"]
correct = "only"
"#;
        let err = parse_bank(raw).unwrap_err();
        assert_matches!(err, QuizBuddyError::Validation { prompt, .. } if prompt == "Short one");
    }

    #[test]
    fn test_correct_absent_from_options_rejected() {
        let raw = r#"
winner = "w"
failed = "f"

["Off by one"]
options = ["a", "b"]
correct = "c"
"#;
        let err = parse_bank(raw).unwrap_err();
        assert_matches!(err, QuizBuddyError::Validation { prompt, .. } if prompt == "Off by one");
    }

    #[test]
    fn test_integer_correct_matches_integer_options() {
        let raw = r#"
winner = "w"
failed = "f"

["Moon year?"]
options = [1969, 1972]
correct = 1969
"#;
        let bank = parse_bank(raw).unwrap();
        assert_eq!(bank.get("Moon year?").unwrap().correct, "1969");
    }

    #[test]
    fn test_float_options_rejected() {
        let raw = r#"
winner = "w"
failed = "f"

["Pi?"]
options = [3.14, 2.71]
correct = 3.14
"#;
        let err = parse_bank(raw).unwrap_err();
        assert_matches!(err, QuizBuddyError::Validation { .. });
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert_matches!(parse_bank("not [ valid"), Err(QuizBuddyError::BankParse(_)));
    }
}
