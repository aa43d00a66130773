//! Shared vocabulary for a chat session and the remote assistant it talks to.
//!
//! This crate defines the transcript message type and the contract every
//! assistant endpoint has to honor, so that the session logic can switch
//! between a real HTTP service and a scripted fake without changes.
//!
//! Types in this crate don't drive any behavior. The session state machine
//! lives in `parley-core`, concrete endpoints live in their own crates.

#![deny(missing_docs)]

mod endpoint;
mod error;
mod exchange;
mod message;

pub use endpoint::*;
pub use error::*;
pub use exchange::*;
pub use message::*;
