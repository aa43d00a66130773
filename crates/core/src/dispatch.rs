//! One request/response cycle against the assistant endpoint, and how its
//! outcome turns into a transcript entry.

use std::pin::Pin;
use std::sync::Arc;

use parley_model::{
    ChatEndpoint, ChatReply, ChatRequest, EndpointError, ErrorKind, Failure,
};
use tracing::Instrument;

/// Shown when the endpoint answers successfully without a reply.
pub const FALLBACK_REPLY: &str =
    "Thank you for your message. This is a simulated response.";

/// Shown for [`ErrorKind::Network`].
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: Please check your internet connection.";

/// Shown for [`ErrorKind::Server`].
pub const SERVER_ERROR_MESSAGE: &str =
    "Server is currently offline. Please try again later.";

/// Shown for [`ErrorKind::General`].
pub const GENERAL_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again.";

/// Returns the user-facing text for a failure of the given kind.
#[inline]
pub fn error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Network => NETWORK_ERROR_MESSAGE,
        ErrorKind::Server => SERVER_ERROR_MESSAGE,
        ErrorKind::General => GENERAL_ERROR_MESSAGE,
    }
}

/// Maps what the endpoint observed to the kind shown to the user.
///
/// - no response at all is a network problem,
/// - any status of 500 and above is a server problem,
/// - everything else (4xx, undecodable bodies, ...) is general.
#[inline]
pub fn classify(failure: Failure) -> ErrorKind {
    match failure {
        Failure::NoResponse => ErrorKind::Network,
        Failure::Status(code) if code >= 500 => ErrorKind::Server,
        Failure::Status(_) | Failure::Other => ErrorKind::General,
    }
}

/// How a dispatch cycle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The endpoint answered; the text is ready to be shown.
    Reply(String),
    /// The call failed.
    Failed(ErrorKind),
}

impl Resolution {
    fn from_result(result: DispatchResult) -> Self {
        match result {
            Ok(ChatReply { text: Some(text) }) => Resolution::Reply(text),
            Ok(ChatReply { text: None }) => {
                debug!("reply field is missing, using the fallback text");
                Resolution::Reply(FALLBACK_REPLY.to_owned())
            }
            Err(err) => {
                let kind = classify(err.failure());
                warn!("dispatch failed ({kind}): {err}");
                Resolution::Failed(kind)
            }
        }
    }
}

type DispatchResult = Result<ChatReply, Box<dyn EndpointError>>;
type BoxedDispatchFuture =
    Pin<Box<dyn Future<Output = DispatchResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ChatRequest) -> BoxedDispatchFuture + Send + Sync>;

/// A wrapper around a chat endpoint that erases its type, so the session
/// doesn't need a generic parameter for it.
#[derive(Clone)]
pub(crate) struct EndpointClient {
    handler_fn: HandlerFn,
}

impl EndpointClient {
    #[inline]
    pub fn new<E: ChatEndpoint + 'static>(endpoint: E) -> Self {
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = endpoint.send_message(&req);
            Box::pin(
                async move {
                    trace!("sending: {req:?}");
                    fut.await
                        .map_err(|err| Box::new(err) as Box<dyn EndpointError>)
                }
                .instrument(trace_span!("endpoint req")),
            ) as BoxedDispatchFuture
        });
        Self { handler_fn }
    }

    /// Runs one request to completion.
    ///
    /// This never fails: endpoint errors are classified into
    /// [`Resolution::Failed`].
    pub async fn dispatch(&self, req: ChatRequest) -> Resolution {
        let result = (self.handler_fn)(req).await;
        Resolution::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use parley_test_endpoint::{PresetOutcome, TestEndpoint};

    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Failure::NoResponse), ErrorKind::Network);
        assert_eq!(classify(Failure::Status(500)), ErrorKind::Server);
        assert_eq!(classify(Failure::Status(503)), ErrorKind::Server);
        assert_eq!(classify(Failure::Status(599)), ErrorKind::Server);
        assert_eq!(classify(Failure::Status(499)), ErrorKind::General);
        assert_eq!(classify(Failure::Status(404)), ErrorKind::General);
        assert_eq!(classify(Failure::Status(400)), ErrorKind::General);
        assert_eq!(classify(Failure::Other), ErrorKind::General);
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let network = error_message(ErrorKind::Network);
        let server = error_message(ErrorKind::Server);
        let general = error_message(ErrorKind::General);
        assert!(network.contains("internet connection"));
        assert!(server.contains("try again later"));
        assert!(general.contains("unexpected error"));
        assert_ne!(network, server);
        assert_ne!(server, general);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch() {
        let endpoint = TestEndpoint::with_outcomes([
            PresetOutcome::reply("Hi there"),
            PresetOutcome::missing_reply(),
            PresetOutcome::no_response(),
            PresetOutcome::status(502),
            PresetOutcome::status(404),
        ]);
        let client = EndpointClient::new(endpoint.clone());

        let mut resolutions = Vec::new();
        for text in ["a", "b", "c", "d", "e"] {
            resolutions.push(client.dispatch(ChatRequest::new(text)).await);
        }
        assert_eq!(
            resolutions,
            [
                Resolution::Reply("Hi there".to_owned()),
                Resolution::Reply(FALLBACK_REPLY.to_owned()),
                Resolution::Failed(ErrorKind::Network),
                Resolution::Failed(ErrorKind::Server),
                Resolution::Failed(ErrorKind::General),
            ]
        );
        assert_eq!(endpoint.received().len(), 5);
    }
}
