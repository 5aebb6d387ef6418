//! Callback query handlers module
//!
//! This module decodes inline keyboard button presses into quiz events.
//! Callback data follows the `action:payload` scheme: `menu:yes|no|help`
//! for the start menu and `answer:<option text>` for answer buttons.

use std::sync::Arc;

use teloxide::{prelude::*, types::{CallbackQuery, ChatId}, Bot};
use tracing::{debug, warn};

use crate::handlers::drive;
use crate::services::engine::{
    MenuChoice, QuizEngine, QuizEvent, CALLBACK_ANSWER_PREFIX, CALLBACK_MENU_PREFIX,
};
use crate::state::SessionStore;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or_else(|| ChatId(user_id));

    debug!(user_id = user_id, callback_data = ?query.data, "Processing callback query");

    // Answer the callback query first to remove the loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data else {
        return Ok(());
    };

    let Some(event) = parse_callback(&data) else {
        warn!(user_id = user_id, data = %data, "Unrecognized callback data");
        return Ok(());
    };

    drive(&bot, chat_id, user_id, event, &engine, &store).await
}

/// Decode `action:payload` callback data into a quiz event
fn parse_callback(data: &str) -> Option<QuizEvent> {
    let (action, payload) = data.split_once(':')?;
    match action {
        CALLBACK_MENU_PREFIX => MenuChoice::parse(payload).map(QuizEvent::Menu),
        CALLBACK_ANSWER_PREFIX => Some(QuizEvent::Answer(payload.to_string())),
        _ => None,
    }
}
