//! Message handlers module
//!
//! Free-text messages are not part of the quiz protocol: answers arrive
//! only through the inline keyboard, so typed text at any state counts as
//! unrecognized input and is dropped.

use teloxide::{types::Message, Bot};
use tracing::debug;

use crate::utils::errors::Result;

/// Handle a plain text message
pub async fn handle_message(_bot: Bot, msg: Message) -> Result<()> {
    if let Some(user) = msg.from.as_ref() {
        debug!(
            user_id = user.id.0 as i64,
            chat_id = ?msg.chat.id,
            "Ignoring free-text message"
        );
    }
    Ok(())
}
