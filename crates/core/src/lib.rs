//! Core logic of a chat session: the transcript, the dispatch cycle, and
//! the state machine tying them together.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod dispatch;
mod session;
pub mod transcript;

pub use session::{Session, SessionBuilder, SessionClosedError, SessionView};
