//! Core logic of the chat client: the conversation controller, its state
//! machine, and the plumbing to the answering service.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod answer_client;
mod controller;
pub mod conversation;

pub use controller::{
    ControllerBuilder, ConversationController, FALLBACK_MESSAGE, Rejection,
    Snapshot, Stage, SubmitReceipt,
};
