use std::error::Error;

use crate::request::AnswerRequest;
use crate::response::AnswerResponse;

/// A type that represents a remote answering service.
///
/// Every call to [`AnswerService::ask`] is exactly one exchange with the
/// service: implementations must not retry on their own, and the returned
/// future must eventually settle with either an answer or an error.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state (a connection pool, for example), but
/// callers should not rely on it.
pub trait AnswerService: Send + Sync {
    /// The error type that may be returned by the service.
    ///
    /// Callers treat every error the same way, so there is no need to
    /// classify them. The error is only used for diagnostics.
    type Error: Error + Send + Sync + 'static;

    /// Sends a question to the service.
    fn ask(
        &self,
        req: &AnswerRequest,
    ) -> impl Future<Output = Result<AnswerResponse, Self::Error>> + Send + 'static;
}
