use std::error::Error;
use std::pin::Pin;
use std::sync::Arc;

use ragchat_service::{AnswerRequest, AnswerService};
use tracing::Instrument;

pub(crate) type BoxError = Box<dyn Error + Send + Sync>;
pub(crate) type AskResult = Result<String, BoxError>;
type BoxedAskFuture = Pin<Box<dyn Future<Output = AskResult> + Send>>;
type HandlerFn = Arc<dyn Fn(AnswerRequest) -> BoxedAskFuture + Send + Sync>;

/// A wrapper around an answering service that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct AnswerClient {
    handler_fn: HandlerFn,
}

impl AnswerClient {
    #[inline]
    pub fn new<S: AnswerService + 'static>(service: S) -> Self {
        // We have to erase the type `S`, since the controller doesn't have
        // a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = service.ask(&req);
            Box::pin(
                async move {
                    trace!("dispatched a request: {:?}", req);
                    match fut.await {
                        Ok(resp) => {
                            trace!("got an answer");
                            Ok(resp.answer)
                        }
                        Err(err) => {
                            debug!("got an error: {err:?}");
                            Err(Box::new(err) as BoxError)
                        }
                    }
                }
                .instrument(trace_span!("answer client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends exactly one question to the service and returns the answer.
    #[inline]
    pub async fn ask(&self, question: String) -> AskResult {
        (self.handler_fn)(AnswerRequest { question }).await
    }
}

#[cfg(test)]
mod tests {
    use ragchat_test_service::TestAnswerService;

    use super::*;

    #[tokio::test]
    async fn test_ask() {
        let mut service = TestAnswerService::default();
        service.add_answer("Retrieval-Augmented Generation");
        service.add_answer("A vector database");

        let client = AnswerClient::new(service.clone());
        let answer = client.ask("What is RAG?".to_owned()).await.unwrap();
        assert_eq!(answer, "Retrieval-Augmented Generation");

        let answer = client.clone().ask("What is Chroma?".to_owned()).await.unwrap();
        assert_eq!(answer, "A vector database");
        assert_eq!(service.questions(), vec!["What is RAG?", "What is Chroma?"]);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut service = TestAnswerService::default();
        service.add_failure("connection refused");

        let client = AnswerClient::new(service);
        let err = client.ask("Hi".to_owned()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
