/// The address the answering backend listens on in a default setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The route that accepts questions.
pub const DEFAULT_ENDPOINT: &str = "/ask";

/// Builder for [`HttpServiceConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpServiceConfigBuilder {
    base_url: Option<String>,
    endpoint: Option<String>,
}

impl HttpServiceConfigBuilder {
    /// Creates a builder with everything set to defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom base URL, e.g. `http://localhost:5173/api`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets a custom endpoint path.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpServiceConfig {
        HttpServiceConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

/// Configuration for the HTTP answering service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpServiceConfig {
    pub(crate) base_url: String,
    pub(crate) endpoint: String,
}

impl HttpServiceConfig {
    /// Returns the full URL that questions are posted to.
    pub fn url(&self) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{base_url}/{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpServiceConfigBuilder::new().build();
        assert_eq!(config.url(), "http://localhost:8000/ask");
    }

    #[test]
    fn test_url_joining() {
        let config = HttpServiceConfigBuilder::new()
            .with_base_url("http://localhost:5173/api/")
            .with_endpoint("ask")
            .build();
        assert_eq!(config.url(), "http://localhost:5173/api/ask");

        let config = HttpServiceConfigBuilder::new()
            .with_base_url("http://10.0.0.2:9000")
            .with_endpoint("/v1/ask")
            .build();
        assert_eq!(config.url(), "http://10.0.0.2:9000/v1/ask");
    }
}
