//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured before the bot
//! starts serving updates.

use super::Settings;
use crate::utils::errors::{QuizBuddyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_quiz_config(&settings.quiz)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(QuizBuddyError::Config("Bot token is required".to_string()));
    }

    Ok(())
}

/// Validate quiz rules configuration
fn validate_quiz_config(config: &super::QuizConfig) -> Result<()> {
    if config.bank_path.is_empty() {
        return Err(QuizBuddyError::Config(
            "Question bank path is required".to_string(),
        ));
    }

    if config.questions == 0 {
        return Err(QuizBuddyError::Config(
            "Questions per round must be greater than 0".to_string(),
        ));
    }

    if config.retries == 0 {
        return Err(QuizBuddyError::Config(
            "Retries must be greater than 0".to_string(),
        ));
    }

    if config.win_threshold == 0 {
        return Err(QuizBuddyError::Config(
            "Win threshold must be greater than 0".to_string(),
        ));
    }

    if config.win_threshold > config.questions {
        return Err(QuizBuddyError::Config(format!(
            "Win threshold ({}) cannot exceed questions per round ({})",
            config.win_threshold, config.questions
        )));
    }

    if config.question_time_seconds == 0 {
        return Err(QuizBuddyError::Config(
            "Question time budget must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(QuizBuddyError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(QuizBuddyError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
