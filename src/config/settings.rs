//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub quiz: QuizConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Quiz rules configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizConfig {
    /// Path to the question bank TOML file
    pub bank_path: String,
    /// Number of questions sampled per round
    pub questions: usize,
    /// Maximum number of rounds per user
    pub retries: u32,
    /// Minimum correct answers within one round to win
    pub win_threshold: usize,
    /// Advisory per-question time budget, shown in the rules text
    pub question_time_seconds: u64,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Idle entries older than this are evicted; 0 disables eviction
    pub idle_ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files; stdout only when unset
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from the configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("QUIZBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::QuizBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            quiz: QuizConfig {
                bank_path: "quiz.toml".to_string(),
                questions: 3,
                retries: 3,
                win_threshold: 2,
                question_time_seconds: 30,
            },
            session: SessionConfig { idle_ttl_seconds: 0 },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
