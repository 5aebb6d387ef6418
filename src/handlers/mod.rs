//! Handlers module
//!
//! Teloxide-facing handlers plus the shared driver that connects them to the
//! quiz engine and the session store.

pub mod callbacks;
pub mod commands;
pub mod messages;

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup},
    Bot,
};
use tracing::{debug, error};

use crate::services::engine::{QuizEngine, QuizEvent, Reply, ReplyButton, CALLBACK_MENU_PREFIX};
use crate::state::{ChatState, SessionStore};
use crate::utils::errors::Result;

const ABORTED_TEXT: &str = "Something went wrong on our side and the quiz was aborted. Sorry!";

/// Run one inbound event through the quiz engine for one user.
///
/// The per-user entry lock is held across the whole read-transition-send-
/// store sequence, so at most one transition is in flight per user at any
/// time. A fatal engine error is logged, ends that user's conversation, and
/// never touches anyone else's session.
pub async fn drive(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    event: QuizEvent,
    engine: &QuizEngine,
    store: &SessionStore,
) -> Result<()> {
    let entry = store.entry(user_id).await;
    let mut context = entry.lock().await;

    let outcome = {
        let mut rng = rand::thread_rng();
        engine.transition(user_id, context.state, context.session.clone(), event, &mut rng)
    };

    match outcome {
        Ok(transition) => {
            debug!(
                user_id = user_id,
                from = ?context.state,
                to = ?transition.state,
                "Quiz transition applied"
            );
            context.state = transition.state;
            context.session = transition.session;
            context.touch();

            for reply in transition.replies {
                send_reply(bot, chat_id, reply).await?;
            }
            Ok(())
        }
        Err(e) => {
            error!(user_id = user_id, error = %e, "Quiz transition failed, aborting conversation");
            context.state = ChatState::Ended;
            context.touch();
            bot.send_message(chat_id, ABORTED_TEXT).await?;
            Ok(())
        }
    }
}

/// Send one engine reply, rendering its buttons as an inline keyboard
async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<()> {
    if reply.buttons.is_empty() {
        bot.send_message(chat_id, reply.text).await?;
    } else {
        let keyboard = build_keyboard(&reply.buttons);
        bot.send_message(chat_id, reply.text)
            .reply_markup(keyboard)
            .await?;
    }
    Ok(())
}

/// Menu buttons share a row; answer options get one row each
fn build_keyboard(buttons: &[ReplyButton]) -> InlineKeyboardMarkup {
    let to_button = |b: &ReplyButton| InlineKeyboardButton::callback(b.label.clone(), b.data.clone());

    let is_menu = buttons
        .iter()
        .all(|b| b.data.starts_with(CALLBACK_MENU_PREFIX));
    let rows: Vec<Vec<InlineKeyboardButton>> = if is_menu {
        vec![buttons.iter().map(to_button).collect()]
    } else {
        buttons.iter().map(|b| vec![to_button(b)]).collect()
    };

    InlineKeyboardMarkup::new(rows)
}
