use std::error::Error;
use std::fmt::{self, Display};

use tokio::sync::mpsc;

use super::mailbox::Command;
use crate::answer_client::AskResult;

/// The error a request settles with when its task ends without an outcome.
#[derive(Debug)]
pub struct Abandoned;

impl Display for Abandoned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "request ended without a response".fmt(f)
    }
}

impl Error for Abandoned {}

/// Reports the outcome of one request back to the controller, exactly once.
///
/// The guard is created before the request is dispatched. If it's dropped
/// without [`SettleGuard::settle`] being called (the request task panicked,
/// or the runtime dropped it), the request settles as a failure.
pub struct SettleGuard {
    ticket: u64,
    cmd_tx: Option<mpsc::UnboundedSender<Command>>,
}

impl SettleGuard {
    #[inline]
    pub fn new(ticket: u64, cmd_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self {
            ticket,
            cmd_tx: Some(cmd_tx),
        }
    }

    #[inline]
    pub fn settle(mut self, outcome: AskResult) {
        self.send(outcome);
    }

    fn send(&mut self, outcome: AskResult) {
        let Some(cmd_tx) = self.cmd_tx.take() else {
            return;
        };
        let cmd = Command::Settled {
            ticket: self.ticket,
            outcome,
        };
        if cmd_tx.send(cmd).is_err() {
            warn!("controller is gone, ticket {} settles nowhere", self.ticket);
        }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if self.cmd_tx.is_some() {
            warn!("request for ticket {} ended without settling", self.ticket);
            self.send(Err(Box::new(Abandoned)));
        }
    }
}
