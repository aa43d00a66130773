//! Terminal rendering of a session.

use owo_colors::OwoColorize;
use parley_core::SessionView;
use parley_model::{ErrorKind, Message, Sender};

const BAR_CHAR: &str = "▎";

/// Text shown next to the spinner while a reply is pending.
pub const TYPING_INDICATOR: &str = "💬 Assistant is typing...";

/// Formats one message as a single terminal line.
pub fn render_message(msg: &Message) -> String {
    let time = msg.display_time();
    match (msg.sender(), msg.error_kind()) {
        (Sender::Human, _) => format!(
            "{}🧑 {} {}",
            BAR_CHAR.bright_green(),
            msg.text().bright_white(),
            time.dimmed()
        ),
        (Sender::Assistant, None) => format!(
            "{}🤖 {} {}",
            BAR_CHAR.bright_cyan(),
            msg.text().bright_white(),
            time.dimmed()
        ),
        (Sender::Assistant, Some(kind)) => {
            let icon = match kind {
                ErrorKind::Network => "📡",
                ErrorKind::Server | ErrorKind::General => "⚠️ ",
            };
            format!(
                "{}{icon} {} {} {}",
                BAR_CHAR.bright_red(),
                "Error".red().bold(),
                msg.text().red(),
                time.dimmed()
            )
        }
    }
}

/// Keeps track of what has been printed, so that every view only prints
/// the messages appended since the previous one.
#[derive(Debug, Default)]
pub struct TranscriptPrinter {
    printed: usize,
}

impl TranscriptPrinter {
    /// Returns the lines for messages not printed yet, oldest first.
    pub fn take_new_lines(&mut self, view: &SessionView) -> Vec<String> {
        let messages = view.messages();
        let start = self.printed.min(messages.len());
        self.printed = messages.len();
        messages[start..].iter().map(render_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use parley_model::MessageId;

    use super::*;

    #[test]
    fn test_render_variants() {
        let now = Utc::now();

        let line = render_message(&Message::human(MessageId(1), "Hello", now));
        assert!(line.contains("🧑"));
        assert!(line.contains("Hello"));
        assert!(!line.contains("Error"));

        let line =
            render_message(&Message::assistant(MessageId(2), "Hi there", now));
        assert!(line.contains("🤖"));
        assert!(line.contains("Hi there"));

        let line = render_message(&Message::assistant_error(
            MessageId(3),
            ErrorKind::Network,
            "offline",
            now,
        ));
        assert!(line.contains("📡"));
        assert!(line.contains("Error"));
        assert!(line.contains("offline"));

        let line = render_message(&Message::assistant_error(
            MessageId(4),
            ErrorKind::Server,
            "down",
            now,
        ));
        assert!(line.contains("⚠️"));
        assert!(line.contains("down"));
    }
}
