//! View layer for bot replies
//!
//! Texts for the administrative commands, formatted as Telegram HTML.

use html_escape::encode_text;
use topic_router_core::config::TopicStatus;

/// Reply to `/start`.
pub const START_TEXT: &str = "🤖 Smart Topic Bot ishlayapti.\n\n\
    📌 /id — shu joydagi chat_id va topic(thread) id ni ko‘rsatadi.\n\
    📌 /topics — bot biladigan bo‘limlar va ularning ID holati.";

/// Reply to `/admin`.
pub const ADMIN_TEXT: &str = "🧑‍💼 Admin chaqirildi. Savolingizni aniq yozib qoldiring.";

/// Reply to `/id`: identifiers of the current location.
#[must_use]
pub fn location_text(chat_id: i64, thread_id: Option<i32>) -> String {
    let thread = thread_id.map_or_else(|| "yo‘q".to_string(), |id| id.to_string());
    format!(
        "✅ Chat ID: <code>{chat_id}</code>\n\
         ✅ Topic(Thread) ID: <code>{thread}</code>\n\n\
         Topicda turgan bo‘lsangiz, shu Thread ID ni sozlamalarga qo‘ying."
    )
}

/// Reply to `/topics`: every configured category and its destination, in
/// declaration order.
#[must_use]
pub fn topics_text(topics: &[TopicStatus]) -> String {
    let mut lines = vec!["🧵 <b>Topiclar holati:</b>".to_string()];
    for topic in topics {
        let status = topic
            .destination
            .map_or_else(|| "ID yo‘q".to_string(), |id| format!("OK {id}"));
        lines.push(format!(
            "- {}: <code>{status}</code>",
            encode_text(&topic.name)
        ));
    }
    lines.push("\n📌 ID olish: har bir topicda <code>/id</code> yozing.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_router_core::DestinationId;

    fn topic(name: &str, destination: Option<i32>) -> TopicStatus {
        TopicStatus {
            name: name.to_string(),
            destination: destination.map(DestinationId),
        }
    }

    #[test]
    fn test_location_text() {
        let text = location_text(-100_555, Some(12));
        assert!(text.contains("<code>-100555</code>"));
        assert!(text.contains("<code>12</code>"));

        let text = location_text(-100_555, None);
        assert!(text.contains("<code>yo‘q</code>"));
    }

    #[test]
    fn test_topics_text_keeps_declaration_order() {
        let text = topics_text(&[
            topic("Ish & Daromad", Some(6)),
            topic("Salomatlik", None),
            topic("Uy-joy", Some(5)),
        ]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "- Ish &amp; Daromad: <code>OK 6</code>");
        assert_eq!(lines[2], "- Salomatlik: <code>ID yo‘q</code>");
        assert_eq!(lines[3], "- Uy-joy: <code>OK 5</code>");
    }
}
