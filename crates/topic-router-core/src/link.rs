//! Deep links into forum topics.

use crate::catalog::DestinationId;
use crate::router::ChatRef;

/// Prefix of Bot API ids for supergroups and channels.
const SUPERGROUP_PREFIX: &str = "-100";

/// Build a link to `destination` inside `chat`.
///
/// Public chats link by handle, private supergroups by their internal id with
/// the `-100` prefix stripped. Any other id falls back to its absolute value.
/// A chat with neither a handle nor a non-zero id yields an empty string.
///
/// # Examples
///
/// ```
/// use topic_router_core::link::deep_link;
/// use topic_router_core::{ChatRef, DestinationId};
///
/// let chat = ChatRef { id: -1001234567890, username: None };
/// assert_eq!(deep_link("t.me", &chat, DestinationId(5)), "https://t.me/c/1234567890/5");
///
/// let chat = ChatRef { id: -1001234567890, username: Some("saudi_uz".into()) };
/// assert_eq!(deep_link("t.me", &chat, DestinationId(5)), "https://t.me/saudi_uz/5");
/// ```
#[must_use]
pub fn deep_link(host: &str, chat: &ChatRef, destination: DestinationId) -> String {
    if let Some(handle) = chat
        .username
        .as_deref()
        .map(|h| h.trim_start_matches('@'))
        .filter(|h| !h.is_empty())
    {
        return format!("https://{host}/{handle}/{destination}");
    }

    match internal_chat_id(chat.id) {
        Some(id) => format!("https://{host}/c/{id}/{destination}"),
        None => String::new(),
    }
}

/// Internal id of a chat as used in `t.me/c/` links.
fn internal_chat_id(id: i64) -> Option<String> {
    if id == 0 {
        return None;
    }
    let raw = id.to_string();
    match raw.strip_prefix(SUPERGROUP_PREFIX) {
        Some(stripped) if !stripped.is_empty() => Some(stripped.to_string()),
        _ => Some(id.unsigned_abs().to_string()),
    }
}
