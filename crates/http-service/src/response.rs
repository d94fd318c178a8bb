use mime::Mime;
use ragchat_service::AnswerResponse;
use reqwest::{Response, header};

use crate::Error;
use crate::proto;

/// Turns a successful HTTP response into an answer.
///
/// The status code is expected to be checked already.
pub async fn read_answer(resp: Response) -> Result<AnswerResponse, Error> {
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if !is_acceptable_content_type(content_type.as_deref()) {
        return Err(Error::new(format!(
            "Unexpected content type: {content_type:?}"
        )));
    }

    let body = resp
        .text()
        .await
        .map_err(|err| Error::new(format!("{err}")))?;
    trace!("got a response body of {} bytes", body.len());
    proto::parse_response(&body)
}

/// A missing content type is tolerated, the body is parsed anyway. A
/// declared one has to be some kind of JSON.
fn is_acceptable_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    content_type
        .parse()
        .map(|m: Mime| {
            m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
        })
        .unwrap_or(false)
}
