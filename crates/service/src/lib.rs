//! An abstraction layer for remote answering services.
//!
//! This crate establishes the protocol the chat client uses to ask a
//! question and get an answer back, so that the conversation logic can
//! work against an HTTP backend, a scripted fake, or anything else
//! without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod request;
mod response;
mod service;

pub use request::*;
pub use response::*;
pub use service::*;
