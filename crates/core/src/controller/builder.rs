use std::error::Error;

use ragchat_service::AnswerService;

use super::ConversationController;
use super::mailbox::{ErrorCallback, SettledCallback};
use crate::answer_client::AnswerClient;

/// [`ConversationController`] builder.
pub struct ControllerBuilder {
    pub(crate) answer_client: AnswerClient,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) on_settled: Option<SettledCallback>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified answering service.
    #[inline]
    pub fn with_answer_service<S: AnswerService + 'static>(service: S) -> Self {
        Self {
            answer_client: AnswerClient::new(service),
            on_error: None,
            on_settled: None,
        }
    }

    /// Attaches a callback to be invoked when a request fails.
    ///
    /// The callback receives the underlying error, which is never put in
    /// the transcript.
    #[inline]
    pub fn on_error(
        mut self,
        on_error: impl Fn(&(dyn Error + Send + Sync)) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Attaches a callback to be invoked when a request has settled and
    /// its outcome is in the transcript.
    #[inline]
    pub fn on_settled(
        mut self,
        on_settled: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_settled = Some(Box::new(on_settled));
        self
    }

    /// Builds the controller.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[inline]
    pub fn build(self) -> ConversationController {
        ConversationController::spawn_from_builder(self)
    }
}
