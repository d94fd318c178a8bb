use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use ragchat_service::{AnswerRequest, AnswerResponse, AnswerService};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeServiceError(&'static str);

impl Display for FakeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for FakeServiceError {}

/// Echoes the question back, the same way the answering backend does when
/// it runs without a retrieval pipeline.
struct EchoAnswerService;

impl AnswerService for EchoAnswerService {
    type Error = FakeServiceError;

    fn ask(
        &self,
        req: &AnswerRequest,
    ) -> impl Future<Output = Result<AnswerResponse, Self::Error>> + Send + 'static
    {
        let question = req.question.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if question.is_empty() {
                return Err(FakeServiceError("question must not be empty"));
            }
            Ok(AnswerResponse {
                answer: format!("(Echo) You asked: {question}"),
            })
        }
    }
}

#[tokio::test]
async fn test_answer() {
    let service = EchoAnswerService;
    let resp = service
        .ask(&AnswerRequest::new("What is RAG?"))
        .await
        .unwrap();
    assert_eq!(resp.answer, "(Echo) You asked: What is RAG?");
}

#[tokio::test]
async fn test_error() {
    // The request is a temporary, the future must not borrow it.
    let fut = EchoAnswerService.ask(&AnswerRequest::new(""));
    let err = fut.await.unwrap_err();
    assert_eq!(err.to_string(), "question must not be empty");
}
