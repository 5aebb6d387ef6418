//! QuizBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use teloxide::{prelude::*, types::Update};
use tracing::{error, info, warn};

use QuizBuddy::{
    config::Settings,
    handlers::{
        callbacks::handle_callback_query,
        commands::{cancel, help, start},
        messages::handle_message,
    },
    services::{load_bank, QuizEngine},
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the dispatcher
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting QuizBuddy Telegram Bot...");

    // Load and validate the question bank before anything can reach the engine
    info!("Loading question bank from {}...", settings.quiz.bank_path);
    let bank = Arc::new(load_bank(&settings.quiz.bank_path)?);
    info!(questions = bank.len(), "Question bank loaded and validated");

    let engine = Arc::new(QuizEngine::new(bank, settings.quiz.clone())?);
    let store = Arc::new(SessionStore::new());

    if settings.session.idle_ttl_seconds > 0 {
        spawn_eviction_task(store.clone(), settings.session.idle_ttl_seconds);
    }

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine, store])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("QuizBuddy is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("QuizBuddy has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries (menu and answer buttons)
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "QuizBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot and offer a quiz")]
    Start,
    #[command(description = "Show the quiz rules")]
    Help,
    #[command(description = "Leave the current conversation")]
    Cancel,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> HandlerResult {
    let result = match cmd {
        BotCommands::Start => start::handle_start(bot, msg, engine, store).await,
        BotCommands::Help => help::handle_help(bot, msg, engine, store).await,
        BotCommands::Cancel => cancel::handle_cancel(bot, msg, engine, store).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    engine: Arc<QuizEngine>,
    store: Arc<SessionStore>,
) -> HandlerResult {
    if let Err(e) = handle_callback_query(bot, query, engine, store).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}

/// Periodically drop store entries idle longer than the configured TTL
fn spawn_eviction_task(store: Arc<SessionStore>, ttl_seconds: u64) {
    tokio::spawn(async move {
        let sweep_seconds = std::cmp::max(ttl_seconds / 4, 60);
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(sweep_seconds));
        info!(
            ttl_seconds = ttl_seconds,
            sweep_seconds = sweep_seconds,
            "Session eviction enabled"
        );

        loop {
            interval.tick().await;
            let evicted = store
                .evict_idle(chrono::Duration::seconds(ttl_seconds as i64))
                .await;
            if evicted > 0 {
                info!(evicted = evicted, "Evicted idle quiz sessions");
            }
        }
    });
}
