use crate::bot::resilient::{send_message_resilient, SendTarget};
use crate::bot::views;
use crate::bot::TelegramTransport;
use crate::config::BotSettings;
use anyhow::Result;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode, utils::command::BotCommands};
use topic_router_core::dispatch::dispatch;
use topic_router_core::utils::truncate_str;
use topic_router_core::{decide, explain, ChatRef, DestinationId, MessageContext, Sender};
use tracing::{debug, info};

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Whether the message was written by a bot (including this one).
#[must_use]
pub fn is_from_bot(msg: &Message) -> bool {
    msg.from.as_ref().is_some_and(|u| u.is_bot)
}

/// Whether a message should go through classification.
#[must_use]
pub fn is_classifiable(msg: &Message) -> bool {
    !is_from_bot(msg) && msg.text().is_some_and(|t| !t.trim_start().starts_with('/'))
}

/// Forum topic a message was posted in. `None` for the General topic and
/// for chats without topics.
#[must_use]
pub fn current_topic(msg: &Message) -> Option<i32> {
    msg.thread_id
        .filter(|_| msg.is_topic_message)
        .map(|thread| thread.0 .0)
}

/// Build the routing context of a text message.
#[must_use]
pub fn message_context(msg: &Message) -> Option<MessageContext> {
    let text = msg.text()?;
    Some(MessageContext {
        text: text.to_string(),
        chat: ChatRef {
            id: msg.chat.id.0,
            username: msg.chat.username().map(str::to_string),
        },
        current_destination: current_topic(msg).map(DestinationId),
        sender: msg.from.as_ref().map(|u| Sender {
            id: u.id.0.cast_signed(),
            full_name: u.full_name(),
        }),
        message_id: Some(msg.id.0),
    })
}

/// Supported commands for the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show what the bot does
    #[command(description = "Show help.")]
    Start,
    /// Show chat and topic ids of the current location
    #[command(description = "Show chat and topic ids.")]
    Id,
    /// List known topics and their ids
    #[command(description = "List known topics.")]
    Topics,
    /// Call an admin
    #[command(description = "Call an admin.")]
    Admin,
}

async fn reply_html(bot: &Bot, msg: &Message, text: impl Into<String>) -> Result<()> {
    send_message_resilient(
        bot,
        msg.chat.id,
        text,
        Some(ParseMode::Html),
        SendTarget::reply_to(msg),
    )
    .await?;
    Ok(())
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the help message cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    info!("/start in chat {}", msg.chat.id);
    reply_html(&bot, &msg, views::START_TEXT).await
}

/// Location diagnostics handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn id(bot: Bot, msg: Message) -> Result<()> {
    let thread = current_topic(&msg);
    info!("/id in chat {} (thread: {thread:?})", msg.chat.id);
    reply_html(&bot, &msg, views::location_text(msg.chat.id.0, thread)).await
}

/// Topic listing handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn topics(bot: Bot, msg: Message, settings: Arc<BotSettings>) -> Result<()> {
    info!("/topics in chat {}", msg.chat.id);
    let text = views::topics_text(&settings.topics);
    reply_html(&bot, &msg, text).await
}

/// Admin call handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn admin(bot: Bot, msg: Message) -> Result<()> {
    info!(
        "/admin called by user {} in chat {}",
        get_user_id_safe(&msg),
        msg.chat.id
    );
    reply_html(&bot, &msg, views::ADMIN_TEXT).await
}

/// Text message handler: classify, decide and dispatch.
///
/// Transport failures are logged by the dispatcher and never surface here.
pub async fn handle_text(
    msg: Message,
    settings: Arc<BotSettings>,
    transport: Arc<TelegramTransport>,
) {
    let Some(context) = message_context(&msg) else {
        return;
    };

    let found = explain(&context.text, &settings.catalog);
    let decision = decide(found.map(|m| m.category), context.current_destination);

    match found {
        Some(m) => debug!(
            "Message {} from user {} classified as '{}' ({:?}): '{}'",
            msg.id,
            get_user_id_safe(&msg),
            m.category.name(),
            m.reason,
            truncate_str(&context.text, 100)
        ),
        None => debug!("Message {} matched no category", msg.id),
    }

    let outcome = dispatch(&decision, &context, &settings.dispatch, transport.as_ref()).await;
    if !outcome.is_clean() {
        info!(
            "Redirect of message {} finished with {} transport error(s)",
            msg.id,
            outcome.errors.len()
        );
    }
}
