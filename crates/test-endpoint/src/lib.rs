//! A local fake endpoint for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parley_model::{
    ChatEndpoint, ChatReply, ChatRequest, EndpointError, Failure,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    failure: Failure,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.message, self.failure)
    }
}

impl StdError for Error {}

impl EndpointError for Error {
    #[inline]
    fn failure(&self) -> Failure {
        self.failure
    }
}

#[derive(Default)]
struct Script {
    outcomes: VecDeque<PresetOutcome>,
    received: Vec<ChatRequest>,
}

/// A local fake endpoint for testing purpose.
///
/// Before sending requests, queue up the outcomes with
/// [`TestEndpoint::push_outcome`]. Every request consumes the next
/// outcome in order. If the script runs out, the request fails with
/// [`Failure::Other`].
///
/// Clones share the same script, so a test can hand one clone to the
/// session and keep another one to inspect what was received.
///
/// # Note
///
/// This type is not optimized for production use. You should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct TestEndpoint {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestEndpoint {
    /// Creates an endpoint with the given outcomes queued.
    #[inline]
    pub fn with_outcomes(
        outcomes: impl IntoIterator<Item = PresetOutcome>,
    ) -> Self {
        let endpoint = Self::default();
        for outcome in outcomes {
            endpoint.push_outcome(outcome);
        }
        endpoint
    }

    /// Queues the outcome of a later request.
    #[inline]
    pub fn push_outcome(&self, outcome: PresetOutcome) {
        self.lock().outcomes.push_back(outcome);
    }

    /// Delays every answer by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far, oldest first.
    pub fn received(&self) -> Vec<ChatRequest> {
        self.lock().received.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        // A panicking preset never holds the lock, so poisoning can only
        // come from a failed assertion in the test itself.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Debug for TestEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let script = self.lock();
        f.debug_struct("TestEndpoint")
            .field("pending_outcomes", &script.outcomes.len())
            .field("received", &script.received.len())
            .field("delay", &self.delay)
            .finish()
    }
}

impl ChatEndpoint for TestEndpoint {
    type Error = crate::Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let outcome = {
            let mut script = self.lock();
            script.received.push(req.clone());
            script.outcomes.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            let Some(outcome) = outcome else {
                return Err(Error {
                    message: "no enough outcomes",
                    failure: Failure::Other,
                });
            };
            outcome.into_result().map_err(|failure| Error {
                message: "scripted failure",
                failure,
            })
        }
    }
}
