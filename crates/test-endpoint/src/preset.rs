use parley_model::{ChatReply, Failure};
use serde::{Deserialize, Serialize};

/// How the fake endpoint answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetOutcome {
    /// Answer successfully. `None` mimics a payload without a reply field.
    #[serde(rename = "reply")]
    Reply(Option<String>),
    /// Fail with the given cause.
    #[serde(rename = "failure")]
    Failure(Failure),
    /// Panic while the call is in flight.
    #[serde(rename = "panic")]
    Panic,
}

impl PresetOutcome {
    /// A successful reply with `text`.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(Some(text.into()))
    }

    /// A successful answer whose payload lacks the reply field.
    #[inline]
    pub fn missing_reply() -> Self {
        Self::Reply(None)
    }

    /// A connection that never produced a response.
    #[inline]
    pub fn no_response() -> Self {
        Self::Failure(Failure::NoResponse)
    }

    /// A response with the given status code.
    #[inline]
    pub fn status(code: u16) -> Self {
        Self::Failure(Failure::Status(code))
    }

    pub(crate) fn into_result(self) -> Result<ChatReply, Failure> {
        match self {
            PresetOutcome::Reply(text) => Ok(ChatReply { text }),
            PresetOutcome::Failure(failure) => Err(failure),
            PresetOutcome::Panic => panic!("scripted endpoint panic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let script = vec![
            PresetOutcome::reply("Hi there"),
            PresetOutcome::missing_reply(),
            PresetOutcome::status(502),
            PresetOutcome::Panic,
        ];

        let serialized = serde_json::to_value(&script).unwrap();
        assert_eq!(
            serialized,
            json!([
                { "type": "reply", "data": "Hi there" },
                { "type": "reply", "data": null },
                { "type": "failure", "data": { "type": "status", "data": 502 } },
                { "type": "panic" },
            ])
        );

        let deserialized: Vec<PresetOutcome> =
            serde_json::from_value(serialized).unwrap();
        assert_eq!(script, deserialized);
    }
}
