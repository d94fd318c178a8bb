mod builder;
mod mailbox;
mod settle;
mod state;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use crate::conversation::Transcript;
pub use builder::ControllerBuilder;
use mailbox::{Command, ControllerLoop};
pub use state::{FALLBACK_MESSAGE, Rejection, Stage};
use state::ConversationState;

/// A read-only copy of the conversation, as the render surface sees it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) transcript: Transcript,
    pub(crate) draft: String,
    pub(crate) pending: bool,
}

impl Snapshot {
    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the unsent input.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns `true` while a request is in flight. Input controls should
    /// be disabled and a loading indicator shown.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the stage of the current submission cycle.
    #[inline]
    pub fn stage(&self) -> Stage {
        Stage::of(&self.draft, self.pending)
    }
}

/// The controller of a conversation with an answering service.
///
/// It owns the transcript, the draft and the pending flag, and those can
/// only be changed through [`ConversationController::update_draft`] and
/// [`ConversationController::submit`]. The state lives in a task of its
/// own, and every change is published as a [`Snapshot`].
///
/// At most one request is in flight at any time. Submitting while a
/// request is pending is ignored, regardless of what the UI does.
#[derive(Clone, Debug)]
pub struct ConversationController {
    cmd_tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl ConversationController {
    /// Replaces the draft.
    #[inline]
    pub fn update_draft<S: Into<String>>(&self, text: S) {
        self.send(Command::UpdateDraft(text.into()));
    }

    /// Submits the draft as a question.
    ///
    /// Nothing happens if the draft is blank or a request is already in
    /// flight. The returned receipt tells which one it was, and can be
    /// dropped if the caller doesn't care.
    pub fn submit(&self) -> SubmitReceipt {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Command::Submit(ack_tx));
        SubmitReceipt(ack_rx)
    }

    /// Returns the latest snapshot.
    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Returns a receiver that is notified on every change.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Waits until no request is in flight and returns that snapshot.
    ///
    /// Await the [`SubmitReceipt`] first, otherwise this may return before
    /// the submission has even been looked at.
    pub async fn settled(&self) -> Snapshot {
        let mut snapshot_rx = self.subscribe();
        let settled = snapshot_rx
            .wait_for(|snapshot| !snapshot.is_pending())
            .await
            .map(|snapshot| Snapshot::clone(&snapshot));
        settled.unwrap_or_else(|_| self.snapshot())
    }

    fn send(&self, cmd: Command) {
        if let Err(err) = self.cmd_tx.send(cmd) {
            error!("controller task is gone, dropping {:?}", err.0);
        }
    }

    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder {
            answer_client,
            on_error,
            on_settled,
        } = builder;

        let state = ConversationState::default();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let controller_loop = ControllerLoop {
            state,
            answer_client,
            snapshot_tx,
            on_error,
            on_settled,
        };
        tokio::spawn(
            controller_loop
                .run(cmd_tx.downgrade(), cmd_rx)
                .instrument(trace_span!("controller")),
        );

        Self {
            cmd_tx,
            snapshot_rx,
        }
    }
}

/// Tells whether a submission was accepted.
#[derive(Debug)]
pub struct SubmitReceipt(oneshot::Receiver<Result<(), Rejection>>);

impl SubmitReceipt {
    /// Waits until the controller has looked at the submission.
    ///
    /// When this returns `Ok`, the question is already in the transcript
    /// and the request is in flight.
    pub async fn accepted(self) -> Result<(), Rejection> {
        self.0.await.unwrap_or(Err(Rejection::Closed))
    }
}
