use crate::bot;
use crate::bot::handlers::{get_user_id_safe, is_classifiable, Command};
use crate::bot::TelegramTransport;
use crate::config::BotSettings;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{debug, error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let bot = Bot::new(settings.telegram.bot_token.clone());
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let handler = setup_handler();

    info!(
        "Bot is running with {} categories (fallback: {}, copy to topic: {})",
        settings.catalog.len(),
        settings
            .catalog
            .fallback()
            .map_or("none", |category| category.name()),
        settings.dispatch.copy_to_destination
    );
    let unresolved = settings.unresolved();
    if !unresolved.is_empty() {
        info!("Categories without a destination: {}", unresolved.join(", "));
    }

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![settings, transport])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message().branch(
                // Chats this bot serves
                dptree::filter(|msg: Message, settings: Arc<BotSettings>| {
                    settings.telegram.is_chat_allowed(msg.chat.id.0)
                })
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(dptree::filter(|msg: Message| is_classifiable(&msg)).endpoint(handle_text)),
            ),
        )
        .branch(Update::filter_message().endpoint(handle_unauthorized))
}

async fn handle_unauthorized(msg: Message) -> Result<(), teloxide::RequestError> {
    debug!(
        "Ignoring message {} from user {} in chat {}",
        msg.id,
        get_user_id_safe(&msg),
        msg.chat.id
    );
    respond(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start => bot::handlers::start(bot, msg).await,
        Command::Id => bot::handlers::id(bot, msg).await,
        Command::Topics => bot::handlers::topics(bot, msg, settings).await,
        Command::Admin => bot::handlers::admin(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_text(
    msg: Message,
    settings: Arc<BotSettings>,
    transport: Arc<TelegramTransport>,
) -> Result<(), teloxide::RequestError> {
    bot::handlers::handle_text(msg, settings, transport).await;
    respond(())
}
