use parley_model::{ChatReply, ChatRequest};
use serde::Serialize;
use serde_json::Value;

// -----------------------
// Types sent to the server
// -----------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatPayload<'a> {
    message: &'a str,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_payload(req: &ChatRequest) -> ChatPayload<'_> {
    ChatPayload { message: &req.text }
}

/// Extracts the reply from a decoded response body.
///
/// Anything other than a non-empty string under `message` counts as a
/// missing reply.
#[inline]
pub fn parse_reply(body: &Value) -> ChatReply {
    let text = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);
    ChatReply { text }
}
