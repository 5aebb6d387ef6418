//! Help command handler

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::handlers::{commands::PRIVATE_ONLY_TEXT, drive};
use crate::services::engine::{QuizEngine, QuizEvent};
use crate::state::SessionStore;
use crate::utils::errors::Result;

/// Handle /help command: show the quiz rules
pub async fn handle_help(
    bot: Bot,
    msg: Message,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring /help without a sender");
        return Ok(());
    };

    let chat_id = msg.chat.id;
    if !chat_id.is_user() {
        bot.send_message(chat_id, PRIVATE_ONLY_TEXT).await?;
        return Ok(());
    }

    drive(
        &bot,
        chat_id,
        user.id.0 as i64,
        QuizEvent::Help,
        &engine,
        &store,
    )
    .await
}
