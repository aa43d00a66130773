//! The ordered, append-only log of a session's messages.

use chrono::Utc;
use parley_model::{ErrorKind, Message, MessageId};

use crate::dispatch::error_message;

/// The greeting every session starts with, unless overridden.
pub const DEFAULT_GREETING: &str = "Hello! How can I assist you today?";

/// The message log of a session.
///
/// A transcript is never empty: it is seeded with one assistant greeting
/// and only ever grows at the end. Nothing is reordered, edited or
/// removed, and every message gets an id greater than the previous one.
#[derive(Clone, Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    /// Creates a transcript seeded with `greeting` from the assistant.
    pub fn with_greeting<S: Into<String>>(greeting: S) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.append_assistant(greeting);
        transcript
    }

    /// Appends a message from the user.
    ///
    /// Returns `None` without touching the transcript if `text` is empty
    /// or whitespace only. The text is stored as entered, untrimmed.
    pub fn append_human<S: Into<String>>(
        &mut self,
        text: S,
    ) -> Option<&Message> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let id = self.take_id();
        Some(self.push(Message::human(id, text, Utc::now())))
    }

    /// Appends a regular reply from the assistant.
    pub fn append_assistant<S: Into<String>>(&mut self, text: S) -> &Message {
        let id = self.take_id();
        self.push(Message::assistant(id, text, Utc::now()))
    }

    /// Appends an assistant message reporting a failed dispatch. The text
    /// comes from the fixed message for `kind`.
    pub fn append_assistant_error(&mut self, kind: ErrorKind) -> &Message {
        let id = self.take_id();
        self.push(Message::assistant_error(
            id,
            kind,
            error_message(kind),
            Utc::now(),
        ))
    }

    /// Returns every message in insertion order.
    #[inline]
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the newest message.
    #[inline]
    pub fn last(&self) -> &Message {
        // Seeded on creation and never shrinks.
        &self.messages[self.messages.len() - 1]
    }

    #[inline]
    fn take_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    #[inline]
    fn push(&mut self, msg: Message) -> &Message {
        trace!("appending {} from {:?}", msg.id(), msg.sender());
        self.messages.push(msg);
        self.last()
    }
}

impl Default for Transcript {
    #[inline]
    fn default() -> Self {
        Self::with_greeting(DEFAULT_GREETING)
    }
}

#[cfg(test)]
mod tests {
    use parley_model::Sender;

    use super::*;
    use crate::dispatch::NETWORK_ERROR_MESSAGE;

    #[test]
    fn test_seeded_with_greeting() {
        let transcript = Transcript::default();
        let messages = transcript.snapshot();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender(), Sender::Assistant);
        assert_eq!(messages[0].text(), DEFAULT_GREETING);
        assert!(!messages[0].is_error());
    }

    #[test]
    fn test_appends_keep_order() {
        let mut transcript = Transcript::with_greeting("Hey");
        transcript.append_human("Hello").unwrap();
        transcript.append_assistant("Hi there");
        transcript.append_human("  and again  ").unwrap();
        transcript.append_assistant_error(ErrorKind::Network);

        let messages = transcript.snapshot();
        let texts: Vec<_> = messages.iter().map(Message::text).collect();
        assert_eq!(
            texts,
            ["Hey", "Hello", "Hi there", "  and again  ", NETWORK_ERROR_MESSAGE]
        );
        let senders: Vec<_> = messages.iter().map(Message::sender).collect();
        assert_eq!(
            senders,
            [
                Sender::Assistant,
                Sender::Human,
                Sender::Assistant,
                Sender::Human,
                Sender::Assistant,
            ]
        );
        assert!(messages.windows(2).all(|w| w[0].id() < w[1].id()));
        assert!(
            messages
                .windows(2)
                .all(|w| w[0].timestamp() <= w[1].timestamp())
        );
    }

    #[test]
    fn test_blank_human_text_is_ignored() {
        let mut transcript = Transcript::default();
        assert!(transcript.append_human("").is_none());
        assert!(transcript.append_human(" \t\n ").is_none());
        assert_eq!(transcript.snapshot().len(), 1);

        // Ids are not burnt by ignored input.
        let id = transcript.append_human("ok").unwrap().id();
        assert_eq!(id, MessageId(2));
    }

    #[test]
    fn test_error_message_fields() {
        let mut transcript = Transcript::default();
        let msg = transcript.append_assistant_error(ErrorKind::Server).clone();
        assert_eq!(msg.sender(), Sender::Assistant);
        assert!(msg.is_error());
        assert_eq!(msg.error_kind(), Some(ErrorKind::Server));
        assert_eq!(msg.text(), error_message(ErrorKind::Server));
        assert_eq!(transcript.last(), &msg);
    }
}
