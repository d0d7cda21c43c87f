//! Telegram implementation of the routing [`Transport`].

use crate::bot::resilient::{send_message_resilient, SendTarget};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ThreadId};
use topic_router_core::dispatch::Transport;
use topic_router_core::{DestinationId, MessageContext, TransportError};

/// Sends copies and notices through the Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    /// Wrap a bot handle.
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Forum thread addressed by a destination id.
#[must_use]
pub const fn thread_of(destination: DestinationId) -> ThreadId {
    ThreadId(MessageId(destination.0))
}

/// Where the reply to `message` goes.
#[must_use]
pub fn reply_target(message: &MessageContext) -> SendTarget {
    SendTarget {
        thread: message.current_destination.map(thread_of),
        reply_to: message.message_id.map(MessageId),
        disable_preview: false,
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn relocate(
        &self,
        message: &MessageContext,
        destination: DestinationId,
        text: &str,
    ) -> Result<(), TransportError> {
        send_message_resilient(
            &self.bot,
            ChatId(message.chat.id),
            text,
            Some(ParseMode::Html),
            SendTarget::thread(thread_of(destination)).without_preview(),
        )
        .await
        .map(|_| ())
        .map_err(|e| TransportError::Relocate(e.to_string()))
    }

    async fn notify(&self, message: &MessageContext, text: &str) -> Result<(), TransportError> {
        send_message_resilient(
            &self.bot,
            ChatId(message.chat.id),
            text,
            Some(ParseMode::Html),
            reply_target(message),
        )
        .await
        .map(|_| ())
        .map_err(|e| TransportError::Notify(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_target_follows_message() {
        let message = MessageContext {
            current_destination: Some(DestinationId(6)),
            message_id: Some(31),
            ..MessageContext::default()
        };
        let target = reply_target(&message);
        assert_eq!(target.thread, Some(ThreadId(MessageId(6))));
        assert_eq!(target.reply_to, Some(MessageId(31)));
    }

    #[test]
    fn test_reply_target_general_topic() {
        let target = reply_target(&MessageContext::default());
        assert_eq!(target, SendTarget::default());
    }
}
