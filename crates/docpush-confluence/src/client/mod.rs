//! Confluence REST API client.
//!
//! Synchronous HTTP client for the Confluence Server/Data Center REST API
//! with optional basic authentication.

mod attachments;
mod pages;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ureq::Agent;

use crate::error::PublishError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    endpoint: String,
    username: String,
    password: String,
}

impl ConfluenceClient {
    /// Create a client for the given REST API endpoint.
    ///
    /// Blank `username` or `password` disables authentication; requests
    /// then rely on the transport's own session state.
    #[must_use]
    pub fn new(endpoint: &str, username: &str, password: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    /// Basic auth header value, if both credentials are configured.
    ///
    /// Computed fresh for every request rather than cached on the client.
    fn auth_header(&self) -> Option<String> {
        basic_auth_header(&self.username, &self.password)
    }
}

/// Build a basic authentication header value from credentials.
///
/// Returns `None` when either credential is blank.
fn basic_auth_header(username: &str, password: &str) -> Option<String> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return None;
    }
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    Some(format!("Basic {encoded}"))
}

/// Map a non-200 status to a response error carrying code and reason.
fn status_error(status: ureq::http::StatusCode) -> PublishError {
    PublishError::Response {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned(),
    }
}
