//! Start command handler
//!
//! Handles the /start command: greets the user and puts the Yes/No/Help
//! menu on the table.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::handlers::{commands::PRIVATE_ONLY_TEXT, drive};
use crate::services::engine::{QuizEngine, QuizEvent};
use crate::state::SessionStore;
use crate::utils::errors::Result;

/// Handle /start command
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring /start without a sender");
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");

    if !chat_id.is_user() {
        bot.send_message(chat_id, PRIVATE_ONLY_TEXT).await?;
        return Ok(());
    }

    drive(&bot, chat_id, user_id, QuizEvent::Start, &engine, &store).await
}
