//! A terminal chat client for a remote assistant.
//!
//! The crate includes a CLI tool for using in the terminal. The rendering
//! and configuration pieces are exposed as a library too, so other hosts
//! can drive a [`Session`] with the same look.

#![deny(missing_docs)]

pub mod config;
pub mod render;

pub use parley_core::{Session, SessionBuilder, SessionClosedError, SessionView};

/// Re-exports of [`parley_core`] crate.
pub mod core {
    pub use parley_core::*;
}

/// Re-exports of [`parley_model`] crate.
pub mod model {
    pub use parley_model::*;
}
