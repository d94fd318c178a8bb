use serde::{Deserialize, Serialize};

/// A successful reply from the answering service.
///
/// Implementors must only produce this type when the service actually
/// returned a usable answer. Anything else, such as a missing answer
/// field or a garbled body, should be reported as an error instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// The answer text, to be shown verbatim.
    pub answer: String,
}
