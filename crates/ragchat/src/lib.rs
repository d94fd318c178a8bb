//! A terminal chat client for a retrieval-augmented answering service.
//!
//! The crate includes a CLI tool for using in the terminal. The pieces it is
//! built from (configuration and transcript rendering) are exposed here as
//! well, so other front ends can reuse them.

#![deny(missing_docs)]

pub mod config;
pub mod render;

/// Re-exports of [`ragchat_core`] crate.
pub mod core {
    pub use ragchat_core::*;
}
