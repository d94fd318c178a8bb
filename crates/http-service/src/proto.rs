use ragchat_service::{AnswerRequest, AnswerResponse};
use serde::{Deserialize, Serialize};

use crate::Error;

// ----------------------
// Types sent to the server
// ----------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AskRequest<'a> {
    question: &'a str,
}

// ----------------------------
// Types received from the server
// ----------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct AskResponse {
    // Optional so that a `null` or missing answer can be told apart from a
    // body that is not JSON at all, which helps when reading logs.
    answer: Option<String>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &AnswerRequest) -> AskRequest<'_> {
    AskRequest {
        question: &req.question,
    }
}

pub fn parse_response(body: &str) -> Result<AnswerResponse, Error> {
    let resp: AskResponse = serde_json::from_str(body)
        .map_err(|err| Error::new(format!("Malformed response body: {err}")))?;
    let Some(answer) = resp.answer else {
        return Err(Error::new("Response has no answer"));
    };
    Ok(AnswerResponse { answer })
}
