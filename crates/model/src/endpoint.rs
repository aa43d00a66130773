use std::error::Error;

use crate::error::Failure;
use crate::exchange::{ChatReply, ChatRequest};

/// The error type for a chat endpoint.
pub trait EndpointError: Error + Send + Sync + 'static {
    /// Returns what was observed when the call failed.
    fn failure(&self) -> Failure;
}

/// A remote assistant that answers one message at a time.
///
/// Once the endpoint is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the endpoint should be prepared for being dropped anytime.
pub trait ChatEndpoint: Send + Sync {
    /// The error type that may be returned by the endpoint.
    type Error: EndpointError;

    /// Sends a message and waits for the complete reply.
    ///
    /// The returned future must not borrow from `self`, since the session
    /// drives it on a separate task.
    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
