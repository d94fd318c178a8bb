//! A local fake answering service for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use ragchat_service::{AnswerRequest, AnswerResponse, AnswerService};
use tokio::sync::Semaphore;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

#[derive(Default)]
struct Shared {
    questions: Mutex<Vec<String>>,
}

/// A local fake answering service for testing purpose.
///
/// Before sending requests, you need to set up the script, which is how the
/// service should respond to each request. Presets are consumed in request
/// order, shared by all clones of the service. If there are no enough presets
/// in the script, an error will be returned.
///
/// # Holding responses
///
/// After [`TestAnswerService::hold_responses`] is called, every request waits
/// until [`TestAnswerService::release`] lets it through. This makes it
/// possible to observe the state of a caller while a request is in flight.
/// Configure this before handing out clones of the service, otherwise the
/// clones won't share the hold.
#[derive(Clone, Default)]
pub struct TestAnswerService {
    script: Vec<Preset>,
    delay: Option<Duration>,
    hold: Option<Arc<Semaphore>>,
    shared: Arc<Shared>,
}

impl TestAnswerService {
    /// Appends a preset to the script.
    #[inline]
    pub fn add_preset(&mut self, preset: Preset) {
        self.script.push(preset);
    }

    /// Appends a successful answer to the script.
    #[inline]
    pub fn add_answer<S: Into<String>>(&mut self, answer: S) {
        self.add_preset(Preset::answer(answer));
    }

    /// Appends a failure to the script.
    #[inline]
    pub fn add_failure<S: Into<String>>(&mut self, reason: S) {
        self.add_preset(Preset::failure(reason));
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Makes every request wait for a [`TestAnswerService::release`].
    #[inline]
    pub fn hold_responses(&mut self) {
        self.hold = Some(Arc::new(Semaphore::new(0)));
    }

    /// Lets `count` held requests through.
    ///
    /// Releases are remembered, so releasing before the request arrives is
    /// fine. Does nothing if responses are not held.
    #[inline]
    pub fn release(&self, count: usize) {
        if let Some(hold) = &self.hold {
            hold.add_permits(count);
        }
    }

    /// Returns all questions received so far, in arrival order.
    pub fn questions(&self) -> Vec<String> {
        self.shared
            .questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many requests have been received.
    #[inline]
    pub fn request_count(&self) -> usize {
        self.questions().len()
    }
}

impl AnswerService for TestAnswerService {
    type Error = crate::Error;

    fn ask(
        &self,
        req: &AnswerRequest,
    ) -> impl Future<Output = Result<AnswerResponse, Self::Error>> + Send + 'static
    {
        let step_idx = {
            let mut questions = self
                .shared
                .questions
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            questions.push(req.question.clone());
            questions.len() - 1
        };
        let preset = self.script.get(step_idx).cloned();
        let delay = self.delay;
        let hold = self.hold.clone();

        async move {
            if let Some(hold) = hold {
                // The semaphore is never closed, so this only fails if the
                // service is gone, in which case we just carry on.
                if let Ok(permit) = hold.acquire().await {
                    permit.forget();
                }
            }
            if let Some(delay) = delay {
                sleep(delay).await;
            }

            match preset {
                Some(Preset::Answer(answer)) => Ok(AnswerResponse { answer }),
                Some(Preset::Failure(reason)) => Err(Error::new(reason)),
                None => Err(Error::new("no enough presets")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_script_order() {
        let mut service = TestAnswerService::default();
        service.add_answer("Retrieval-Augmented Generation");
        service.add_failure("connection reset");

        let resp = service
            .ask(&AnswerRequest::new("What is RAG?"))
            .await
            .unwrap();
        assert_eq!(resp.answer, "Retrieval-Augmented Generation");

        let err = service
            .ask(&AnswerRequest::new("And again?"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection reset");

        let err = service
            .ask(&AnswerRequest::new("One more"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no enough presets");

        assert_eq!(
            service.questions(),
            vec!["What is RAG?", "And again?", "One more"]
        );
    }

    #[tokio::test]
    async fn test_clones_share_progress() {
        let mut service = TestAnswerService::default();
        service.add_answer("first");
        service.add_answer("second");

        let clone = service.clone();
        let first = clone.ask(&AnswerRequest::new("a")).await.unwrap();
        let second = service.ask(&AnswerRequest::new("b")).await.unwrap();
        assert_eq!(first.answer, "first");
        assert_eq!(second.answer, "second");
        assert_eq!(service.request_count(), 2);
    }

    #[tokio::test]
    async fn test_hold_and_release() {
        let mut service = TestAnswerService::default();
        service.add_answer("held answer");
        service.hold_responses();

        let mut fut = Box::pin(service.ask(&AnswerRequest::new("Hi")));
        assert!(
            timeout(Duration::from_millis(20), &mut fut).await.is_err(),
            "response should be held"
        );
        assert_eq!(service.request_count(), 1);

        service.release(1);
        let resp = fut.await.unwrap();
        assert_eq!(resp.answer, "held answer");
    }
}
