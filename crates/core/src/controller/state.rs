use std::error::Error;
use std::fmt::{self, Display};
use std::mem;

use crate::controller::Snapshot;
use crate::conversation::{Message, Transcript};

/// The bot text shown in place of an answer whenever a request fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, something went wrong.";

/// The stage of a submission cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing to send.
    #[default]
    Idle,
    /// The draft has something worth sending.
    Composing,
    /// A request is in flight.
    Sending,
}

impl Stage {
    #[inline]
    pub(crate) fn of(draft: &str, pending: bool) -> Self {
        if pending {
            Stage::Sending
        } else if draft.trim().is_empty() {
            Stage::Idle
        } else {
            Stage::Composing
        }
    }
}

/// The reason why a submission didn't start a request.
///
/// None of these are errors from the user's point of view, the submission
/// is simply ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The draft is empty or whitespace only.
    EmptyDraft,
    /// Another request is still in flight.
    AlreadyPending,
    /// The controller has shut down.
    Closed,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyDraft => write!(f, "draft is empty"),
            Rejection::AlreadyPending => write!(f, "a request is in flight"),
            Rejection::Closed => write!(f, "controller has shut down"),
        }
    }
}

impl Error for Rejection {}

/// An accepted submission, waiting to be dispatched.
#[derive(Debug)]
pub struct Submission {
    pub ticket: u64,
    pub question: String,
}

/// The conversation state machine.
///
/// This type doesn't do any I/O. It only decides what happens to the
/// transcript, the draft and the pending flag, and leaves dispatching the
/// request to its owner.
#[derive(Debug, Default)]
pub struct ConversationState {
    transcript: Transcript,
    draft: String,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl ConversationState {
    #[inline]
    pub fn update_draft(&mut self, text: String) {
        self.draft = text;
    }

    /// Accepts the current draft as a question, if possible.
    ///
    /// On success the user message is appended, the draft is cleared and
    /// the state becomes pending, all at once.
    pub fn begin_submission(&mut self) -> Result<Submission, Rejection> {
        if self.in_flight.is_some() {
            return Err(Rejection::AlreadyPending);
        }
        if self.draft.trim().is_empty() {
            return Err(Rejection::EmptyDraft);
        }

        // The question is sent as entered, only the check above trims.
        let question = mem::take(&mut self.draft);
        self.transcript.push(Message::user(question.clone()));

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        Ok(Submission { ticket, question })
    }

    /// Settles the in-flight request with its answer, or with the fallback
    /// message if there is none.
    ///
    /// Returns `false` without touching anything if `ticket` isn't the
    /// request in flight.
    pub fn settle(&mut self, ticket: u64, answer: Option<String>) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(
                "got a settlement for ticket {ticket}, but in flight is {:?}",
                self.in_flight
            );
            return false;
        }

        let text = answer.unwrap_or_else(|| FALLBACK_MESSAGE.to_owned());
        self.transcript.push(Message::bot(text));
        self.in_flight = None;
        true
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transcript: self.transcript.clone(),
            draft: self.draft.clone(),
            pending: self.is_pending(),
        }
    }
}
