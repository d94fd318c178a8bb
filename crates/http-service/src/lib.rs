//! An answering service reached over HTTP.
//!
//! Questions are posted as JSON (`{"question": "..."}`) and the service
//! replies with `{"answer": "..."}`. Anything else is an error.

#[macro_use]
extern crate tracing;

mod config;
mod proto;
mod response;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use ragchat_service::{AnswerRequest, AnswerResponse, AnswerService};
use reqwest::{Client, Response, header};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT, HttpServiceConfig,
    HttpServiceConfigBuilder,
};

/// Error type for [`HttpAnswerService`].
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

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

/// HTTP answering service.
///
/// No timeout is applied to requests, a request stays in flight until the
/// server replies or the connection fails.
#[derive(Clone, Debug)]
pub struct HttpAnswerService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpAnswerService {
    /// Creates a new `HttpAnswerService` with the given configuration.
    #[inline]
    pub fn new(config: HttpServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this service.
    #[inline]
    pub fn config(&self) -> &HttpServiceConfig {
        &self.config
    }
}

impl AnswerService for HttpAnswerService {
    type Error = Error;

    fn ask(
        &self,
        req: &AnswerRequest,
    ) -> impl Future<Output = Result<AnswerResponse, Self::Error>> + Send + 'static
    {
        let url = self.config.url();
        debug!("posting a question to {url}");
        let resp_fut = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(&proto::create_request(req))
            .send();

        async move {
            let resp = match resp_fut.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(format!("{err}")));
                }
            };

            // Here we got a successful response.
            response::read_answer(resp).await
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves exactly one connection with a canned response, and hands back
    /// the raw request it received.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (base_url, server)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn service_for(base_url: String) -> HttpAnswerService {
        HttpAnswerService::new(
            HttpServiceConfigBuilder::new()
                .with_base_url(base_url)
                .build(),
        )
    }

    #[tokio::test]
    async fn test_answer() {
        let (base_url, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"answer":"Retrieval-Augmented Generation"}"#,
        )
        .await;

        let resp = service_for(base_url)
            .ask(&AnswerRequest::new("What is RAG?"))
            .await
            .unwrap();
        assert_eq!(resp.answer, "Retrieval-Augmented Generation");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /ask HTTP/1.1\r\n"));
        assert!(request.ends_with(r#"{"question":"What is RAG?"}"#));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"detail":"Agent error"}"#,
        )
        .await;

        let result = service_for(base_url)
            .ask(&AnswerRequest::new("What is RAG?"))
            .await;
        assert!(result.is_err());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_answer() {
        let (base_url, server) =
            serve_once("200 OK", "application/json", r#"{"output":"hi"}"#)
                .await;

        let err = service_for(base_url)
            .ask(&AnswerRequest::new("What is RAG?"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Response has no answer");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unexpected_content_type() {
        let (base_url, server) =
            serve_once("200 OK", "text/html", "<h1>It works!</h1>").await;

        let err = service_for(base_url)
            .ask(&AnswerRequest::new("What is RAG?"))
            .await
            .unwrap_err();
        assert!(err.message().starts_with("Unexpected content type"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port, then close it again.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = service_for(base_url)
            .ask(&AnswerRequest::new("What is RAG?"))
            .await;
        assert!(result.is_err());
    }
}
