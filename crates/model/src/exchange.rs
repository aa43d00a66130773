use serde::{Deserialize, Serialize};

/// A message to be delivered to the assistant endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The raw text the user entered, untrimmed.
    pub text: String,
}

impl ChatRequest {
    /// Creates a request carrying `text`.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

/// A successful answer from the assistant endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The reply text.
    ///
    /// `None` when the endpoint answered successfully but the payload
    /// carried no reply. The session substitutes a placeholder in that
    /// case instead of treating it as a failure.
    pub text: Option<String>,
}

impl ChatReply {
    /// Creates a reply carrying `text`.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Creates a reply without any text.
    #[inline]
    pub fn empty() -> Self {
        Self { text: None }
    }
}
