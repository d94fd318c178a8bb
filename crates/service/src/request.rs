use serde::{Deserialize, Serialize};

/// A question to be sent to the answering service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// The question, exactly as the user entered it.
    pub question: String,
}

impl AnswerRequest {
    /// Creates a request for the given question.
    #[inline]
    pub fn new<S: Into<String>>(question: S) -> Self {
        Self {
            question: question.into(),
        }
    }
}
