//! Configuration from the environment.

use std::env;

use ragchat_http_service::{HttpServiceConfig, HttpServiceConfigBuilder};

/// Overrides the base URL of the answering service.
pub const BASE_URL_VAR: &str = "RAGCHAT_BASE_URL";

/// Overrides the endpoint path of the answering service.
pub const ENDPOINT_VAR: &str = "RAGCHAT_ENDPOINT";

/// Reads the service configuration from the process environment.
#[inline]
pub fn service_config_from_env() -> HttpServiceConfig {
    service_config_from_lookup(|key| env::var(key).ok())
}

/// Reads the service configuration through `lookup`.
///
/// Unset or blank variables fall back to the defaults.
pub fn service_config_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> HttpServiceConfig {
    let lookup =
        |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let mut builder = HttpServiceConfigBuilder::new();
    if let Some(base_url) = lookup(BASE_URL_VAR) {
        builder = builder.with_base_url(base_url);
    }
    if let Some(endpoint) = lookup(ENDPOINT_VAR) {
        builder = builder.with_endpoint(endpoint);
    }
    builder.build()
}
