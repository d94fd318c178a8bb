use std::error::Error;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use super::Snapshot;
use super::settle::SettleGuard;
use super::state::{ConversationState, Rejection, Submission};
use crate::answer_client::{AnswerClient, AskResult};

pub type ErrorCallback =
    Box<dyn Fn(&(dyn Error + Send + Sync)) + Send + Sync>;
pub type SettledCallback = Box<dyn Fn() + Send + Sync>;

/// Everything that can change the conversation arrives as a command.
#[derive(Debug)]
pub enum Command {
    UpdateDraft(String),
    Submit(oneshot::Sender<Result<(), Rejection>>),
    Settled { ticket: u64, outcome: AskResult },
}

/// The task that owns the conversation state.
///
/// Commands are handled one at a time, so the state is only ever touched
/// from here. The loop keeps running while any controller handle or
/// in-flight request can still send commands.
pub struct ControllerLoop {
    pub state: ConversationState,
    pub answer_client: AnswerClient,
    pub snapshot_tx: watch::Sender<Snapshot>,
    pub on_error: Option<ErrorCallback>,
    pub on_settled: Option<SettledCallback>,
}

impl ControllerLoop {
    pub async fn run(
        mut self,
        cmd_tx: mpsc::WeakUnboundedSender<Command>,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    ) {
        debug!("started");
        while let Some(cmd) = cmd_rx.recv().await {
            trace!("received command: {cmd:?}");

            let proc_span = trace_span!("proc cmd");
            proc_span.in_scope(|| {
                self.handle(cmd, &cmd_tx);
                trace!("finished");
            });
        }
        debug!("will terminate");
    }

    fn handle(
        &mut self,
        cmd: Command,
        cmd_tx: &mpsc::WeakUnboundedSender<Command>,
    ) {
        match cmd {
            Command::UpdateDraft(text) => {
                self.state.update_draft(text);
                self.publish();
            }
            Command::Submit(ack) => {
                let result = self.submit(cmd_tx);
                // Nobody may be waiting for the receipt, that's fine.
                ack.send(result).ok();
            }
            Command::Settled { ticket, outcome } => {
                self.settle(ticket, outcome);
            }
        }
    }

    fn submit(
        &mut self,
        cmd_tx: &mpsc::WeakUnboundedSender<Command>,
    ) -> Result<(), Rejection> {
        // The request must be able to report back before we commit to it.
        let Some(cmd_tx) = cmd_tx.upgrade() else {
            debug!("submission rejected: all handles are gone");
            return Err(Rejection::Closed);
        };

        let submission = match self.state.begin_submission() {
            Ok(submission) => submission,
            Err(rejection) => {
                debug!("submission rejected: {rejection}");
                return Err(rejection);
            }
        };
        self.publish();
        self.dispatch(submission, cmd_tx);
        Ok(())
    }

    fn dispatch(
        &self,
        submission: Submission,
        cmd_tx: mpsc::UnboundedSender<Command>,
    ) {
        let Submission { ticket, question } = submission;
        debug!("dispatching ticket {ticket}");

        let guard = SettleGuard::new(ticket, cmd_tx);
        let answer_client = self.answer_client.clone();
        tokio::spawn(
            async move {
                let outcome = answer_client.ask(question).await;
                guard.settle(outcome);
            }
            .instrument(debug_span!("request", ticket)),
        );
    }

    fn settle(&mut self, ticket: u64, outcome: AskResult) {
        let answer = match outcome {
            Ok(answer) => Some(answer),
            Err(err) => {
                error!("request for ticket {ticket} failed: {err}");
                if let Some(on_error) = &self.on_error {
                    on_error(err.as_ref());
                }
                None
            }
        };

        if !self.state.settle(ticket, answer) {
            return;
        }
        self.publish();
        if let Some(on_settled) = &self.on_settled {
            on_settled();
        }
    }

    #[inline]
    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }
}
