use parley_model::ChatEndpoint;

use super::Session;
use crate::dispatch::EndpointClient;
use crate::transcript::DEFAULT_GREETING;

/// [`Session`] builder.
pub struct SessionBuilder {
    pub(crate) client: EndpointClient,
    pub(crate) greeting: String,
}

impl SessionBuilder {
    /// Creates a new builder that talks to the specified endpoint.
    #[inline]
    pub fn with_endpoint<E: ChatEndpoint + 'static>(endpoint: E) -> Self {
        Self {
            client: EndpointClient::new(endpoint),
            greeting: DEFAULT_GREETING.to_owned(),
        }
    }

    /// Replaces the assistant greeting the transcript starts with.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Builds the session and starts its task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[inline]
    pub fn build(self) -> Session {
        Session::spawn_from_builder(self)
    }
}
