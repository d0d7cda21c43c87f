//! User-facing message formatting.
//!
//! All output is Telegram HTML. Anything that comes from users or
//! configuration is escaped before it is embedded.

use crate::config::TELEGRAM_MESSAGE_LIMIT;
use crate::router::Sender;
use crate::utils::truncate_str;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Shown instead of a mention when the author is unknown.
pub const UNKNOWN_SENDER: &str = "Foydalanuvchi";

/// HTML mention of the message author.
#[must_use]
pub fn mention(sender: Option<&Sender>) -> String {
    match sender {
        Some(sender) => {
            let name = sender.full_name.trim();
            let name = if name.is_empty() { "User" } else { name };
            format!(
                "<a href=\"tg://user?id={}\">{}</a>",
                sender.id,
                encode_text(name)
            )
        }
        None => UNKNOWN_SENDER.to_string(),
    }
}

/// Reply telling the author which topic their message belongs to.
///
/// `link` may be empty, in which case no link line is added.
#[must_use]
pub fn redirect_notice(category: &str, link: &str) -> String {
    let category = encode_text(category);
    let mut notice = format!(
        "📌 Aka, bu savol <b>{category}</b> bo‘limiga to‘g‘ri keladi.\n\
         Iltimos, savolingizni shu bo‘limda yozing 👇"
    );
    if !link.is_empty() {
        notice.push_str(&format!(
            "\n<a href=\"{}\">{category}</a>",
            encode_double_quoted_attribute(link)
        ));
    }
    notice
}

/// Copy of a misplaced message, posted into its destination topic.
#[must_use]
pub fn relocated_copy(sender: Option<&Sender>, text: &str) -> String {
    let header = format!(
        "🧾 {} yozdi (noto‘g‘ri bo‘limdan ko‘chirildi):\n\n",
        mention(sender)
    );
    let budget = TELEGRAM_MESSAGE_LIMIT.saturating_sub(header.chars().count());
    let body = truncate_str(text.trim(), budget);
    format!("{header}{}", encode_text(&body))
}
