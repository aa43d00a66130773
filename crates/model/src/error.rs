use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Classification of a failed dispatch cycle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// No response reached us at all.
    Network,
    /// The remote service answered with a server-side failure.
    Server,
    /// Any other failure.
    General,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Server => write!(f, "server"),
            ErrorKind::General => write!(f, "general"),
        }
    }
}

/// What an endpoint observed when a call failed.
///
/// Endpoints only report the raw cause. Mapping a cause to an
/// [`ErrorKind`] is up to the session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Failure {
    /// The connection could not be established, was refused, or timed out
    /// before any response arrived.
    NoResponse,
    /// A response arrived with an unsuccessful status code.
    Status(u16),
    /// Anything else, e.g. a body that failed to decode.
    Other,
}
