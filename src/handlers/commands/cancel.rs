//! Cancel command handler

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::handlers::{commands::PRIVATE_ONLY_TEXT, drive};
use crate::services::engine::{QuizEngine, QuizEvent};
use crate::state::SessionStore;
use crate::utils::errors::Result;

/// Handle /cancel command: close the conversation, keeping the session
/// (win status and attempt count survive for the next /start).
pub async fn handle_cancel(
    bot: Bot,
    msg: Message,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring /cancel without a sender");
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
        QuizEvent::Cancel,
        &engine,
        &store,
    )
    .await
}
