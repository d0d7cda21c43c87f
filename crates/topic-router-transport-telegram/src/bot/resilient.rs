//! Resilient messaging utilities with automatic retry for Telegram API operations.
//!
//! Transient failures (network, I/O, flood control) are retried with
//! exponential backoff and jitter. API errors such as missing rights or a
//! deleted topic are returned immediately.
//!
//! # Usage
//!
//! ```ignore
//! use topic_router_transport_telegram::bot::resilient::{send_message_resilient, SendTarget};
//!
//! let target = SendTarget::thread(thread_id);
//! send_message_resilient(&bot, chat_id, "Hello!", Some(ParseMode::Html), target).await?;
//! ```

use crate::config::{
    TELEGRAM_API_INITIAL_BACKOFF_MS, TELEGRAM_API_MAX_BACKOFF_MS, TELEGRAM_API_MAX_RETRIES,
};
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, LinkPreviewOptions, Message, MessageId, ParseMode, ReplyParameters, ThreadId,
};
use teloxide::RequestError;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::warn;

/// Where inside a chat a message goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendTarget {
    /// Forum topic thread
    pub thread: Option<ThreadId>,
    /// Message to reply to
    pub reply_to: Option<MessageId>,
    /// Suppress link previews
    pub disable_preview: bool,
}

impl SendTarget {
    /// Post into a forum topic.
    #[must_use]
    pub const fn thread(thread: ThreadId) -> Self {
        Self {
            thread: Some(thread),
            reply_to: None,
            disable_preview: false,
        }
    }

    /// Reply to `msg` in the thread it was posted in.
    #[must_use]
    pub fn reply_to(msg: &Message) -> Self {
        Self {
            thread: msg.thread_id.filter(|_| msg.is_topic_message),
            reply_to: Some(msg.id),
            disable_preview: false,
        }
    }

    /// Same target without link previews.
    #[must_use]
    pub const fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }
}

/// Whether a failed request is worth retrying.
#[must_use]
pub fn is_transient(error: &RequestError) -> bool {
    matches!(
        error,
        RequestError::Network(_) | RequestError::Io(_) | RequestError::RetryAfter(_)
    )
}

/// Retry a Telegram API operation with exponential backoff and jitter.
///
/// Only [`is_transient`] errors are retried.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-transient error.
pub async fn retry_telegram_operation<F, Fut, T>(operation: F) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RequestError>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(TELEGRAM_API_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TELEGRAM_API_MAX_BACKOFF_MS))
        .map(jitter) // Add jitter to prevent thundering herd
        .take(TELEGRAM_API_MAX_RETRIES);

    RetryIf::spawn(retry_strategy, operation, is_transient)
        .await
        .map_err(|e| {
            warn!("Telegram API operation failed: {e}");
            e
        })
}

/// Send a message with automatic retry on network failures.
///
/// # Errors
///
/// Returns an error after all retries are exhausted or on a non-transient
/// API error.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    parse_mode: Option<ParseMode>,
    target: SendTarget,
) -> Result<Message, RequestError> {
    let text = text.into();
    retry_telegram_operation(|| async {
        let mut req = bot.send_message(chat_id, text.clone());
        if let Some(pm) = parse_mode {
            req = req.parse_mode(pm);
        }
        if let Some(thread) = target.thread {
            req = req.message_thread_id(thread);
        }
        if let Some(reply_to) = target.reply_to {
            req = req.reply_parameters(ReplyParameters::new(reply_to).allow_sending_without_reply());
        }
        if target.disable_preview {
            req = req.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }
        req.await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use teloxide::types::Seconds;

    #[test]
    fn test_transient_errors() {
        assert!(is_transient(&RequestError::RetryAfter(Seconds::from_seconds(3))));
        assert!(is_transient(&RequestError::Io(Arc::new(
            std::io::Error::other("reset")
        ))));
        assert!(!is_transient(&RequestError::Api(
            teloxide::ApiError::NotEnoughRightsToPostMessages
        )));
    }

    #[test]
    fn test_thread_target() {
        let target = SendTarget::thread(ThreadId(MessageId(5))).without_preview();
        assert_eq!(target.thread, Some(ThreadId(MessageId(5))));
        assert_eq!(target.reply_to, None);
        assert!(target.disable_preview);
    }

    #[tokio::test]
    async fn test_retry_stops_on_api_error() {
        let mut calls = 0;
        let result: Result<(), RequestError> = retry_telegram_operation(|| {
            calls += 1;
            async { Err(RequestError::Api(teloxide::ApiError::BotKicked)) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_error() {
        let mut calls = 0;
        let result = retry_telegram_operation(|| {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt < 2 {
                    Err(RequestError::Io(Arc::new(std::io::Error::other("reset"))))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;
        assert_eq!(result.ok(), Some(2));
    }
}
