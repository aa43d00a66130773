//! A chat endpoint that posts messages to an HTTP service.
//!
//! The service receives `{"message": "<text>"}` and answers with a JSON
//! object that may carry the reply under `message`.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use parley_model::{
    ChatEndpoint, ChatReply, ChatRequest, EndpointError, Failure,
};
use reqwest::{Client, Response, header};
use serde_json::Value;

pub use config::{DEFAULT_URL, HttpEndpointConfig, HttpEndpointConfigBuilder};

/// Error type for [`HttpEndpoint`].
#[derive(Debug)]
pub struct Error {
    message: String,
    failure: Failure,
}

impl Error {
    fn new(message: impl Into<String>, failure: Failure) -> Self {
        Self {
            message: message.into(),
            failure,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let failure = failure_of(&err);
        Self::new(format!("{err}"), failure)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl EndpointError for Error {
    #[inline]
    fn failure(&self) -> Failure {
        self.failure
    }
}

/// Tells apart "nothing came back" from "something came back and it was
/// wrong".
fn failure_of(err: &reqwest::Error) -> Failure {
    if let Some(status) = err.status() {
        return Failure::Status(status.as_u16());
    }
    // A timeout can surface while reading the body, so it goes first.
    if err.is_timeout() {
        return Failure::NoResponse;
    }
    if err.is_decode() || err.is_body() {
        return Failure::Other;
    }
    if err.is_connect() || err.is_request() {
        return Failure::NoResponse;
    }
    Failure::Other
}

/// Chat endpoint backed by an HTTP service.
#[derive(Clone, Debug)]
pub struct HttpEndpoint {
    client: Client,
    config: Arc<HttpEndpointConfig>,
}

impl HttpEndpoint {
    /// Creates a new `HttpEndpoint` with the given configuration.
    pub fn new(config: HttpEndpointConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &HttpEndpointConfig {
        &self.config
    }
}

impl ChatEndpoint for HttpEndpoint {
    type Error = Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let resp_fut = self
            .client
            .post(&self.config.url)
            .header(header::ACCEPT, "application/json")
            .json(&proto::create_payload(req))
            .send();
        let url = self.config.url.clone();

        async move {
            debug!("posting message to {url}");
            let resp = resp_fut
                .await
                .and_then(Response::error_for_status)
                .inspect_err(|err| warn!("request failed: {err}"))?;
            let bytes = resp
                .bytes()
                .await
                .inspect_err(|err| warn!("failed to read response: {err}"))?;
            if bytes.is_empty() {
                debug!("response has no body");
                return Ok(ChatReply::empty());
            }
            let body: Value = serde_json::from_slice(&bytes)
                .map_err(|err| {
                    warn!("invalid response body: {err}");
                    Error::new(
                        format!("invalid response body: {err}"),
                        Failure::Other,
                    )
                })?;
            trace!("got response body: {body}");
            Ok::<_, Error>(proto::parse_reply(&body))
        }
    }
}
