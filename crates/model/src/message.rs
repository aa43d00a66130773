use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// The author of a message.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The automated assistant.
    Assistant,
    /// The human user.
    Human,
}

/// Identifier of a message, unique and increasing within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "msg:{}", self.0)
    }
}

/// A message in the transcript.
///
/// Messages are immutable once created. The error kind can only be set
/// through [`Message::assistant_error`], so a human message or a regular
/// assistant reply never carries one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    error_kind: Option<ErrorKind>,
}

impl Message {
    /// Creates a message entered by the user.
    #[inline]
    pub fn human<S: Into<String>>(
        id: MessageId,
        text: S,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Human,
            timestamp,
            error_kind: None,
        }
    }

    /// Creates a regular assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(
        id: MessageId,
        text: S,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp,
            error_kind: None,
        }
    }

    /// Creates an assistant message reporting a failed dispatch.
    #[inline]
    pub fn assistant_error<S: Into<String>>(
        id: MessageId,
        kind: ErrorKind,
        text: S,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp,
            error_kind: Some(kind),
        }
    }

    /// Returns the identifier of this message.
    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the display content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the author.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the creation time.
    ///
    /// This is only meant for display. Messages are ordered by their
    /// position in the transcript.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether this message reports a failure.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }

    /// Returns the failure classification, if this is an error message.
    #[inline]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Formats the creation time as a 12-hour clock in local time,
    /// e.g. `03:04 PM`.
    #[inline]
    pub fn display_time(&self) -> String {
        self.display_time_in(&Local)
    }

    /// Formats the creation time as a 12-hour clock in the given zone.
    pub fn display_time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        self.timestamp
            .with_timezone(tz)
            .format("%I:%M %p")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_error_kind_only_on_error_messages() {
        let human = Message::human(MessageId(1), "Hi", at(9, 0));
        assert_eq!(human.sender(), Sender::Human);
        assert!(!human.is_error());
        assert_eq!(human.error_kind(), None);

        let reply = Message::assistant(MessageId(2), "Hello", at(9, 0));
        assert_eq!(reply.sender(), Sender::Assistant);
        assert!(!reply.is_error());

        let failed = Message::assistant_error(
            MessageId(3),
            ErrorKind::Server,
            "offline",
            at(9, 1),
        );
        assert_eq!(failed.sender(), Sender::Assistant);
        assert!(failed.is_error());
        assert_eq!(failed.error_kind(), Some(ErrorKind::Server));
    }

    #[test]
    fn test_display_time() {
        let msg = Message::human(MessageId(0), "x", at(15, 4));
        assert_eq!(msg.display_time_in(&Utc), "03:04 PM");

        let msg = Message::human(MessageId(0), "x", at(0, 30));
        assert_eq!(msg.display_time_in(&Utc), "12:30 AM");

        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();
        let msg = Message::human(MessageId(0), "x", at(9, 15));
        assert_eq!(msg.display_time_in(&plus_five), "02:15 PM");
    }

    #[test]
    fn test_message_id_display() {
        assert_eq!(MessageId(7).to_string(), "msg:7");
        assert!(MessageId(1) < MessageId(2));
    }
}
