//! Blocking `Transport` backed by a `ureq` agent.
//!
//! # Security
//! `UreqTransport::default()` does **not** verify TLS certificates, matching
//! the provisioning service's usual self-signed deployments. Integrators that
//! reach Foreman over untrusted networks should call
//! `UreqTransport::new(true)` or `Foreman::set_verify_ssl(true)`.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// One `ureq::Agent` configured with a TLS policy and an optional timeout.
///
/// The agent is safe to share between threads, so one transport can serve
/// concurrent callers.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    verify_ssl: bool,
    timeout: Option<Duration>,
}

impl UreqTransport {
    /// No timeout is set: a call blocks until the server answers or the
    /// connection fails.
    pub fn new(verify_ssl: bool) -> Self {
        Self::with_timeout(verify_ssl, None)
    }

    /// `timeout` bounds the whole exchange, from resolving the host to
    /// reading the last body byte.
    pub fn with_timeout(verify_ssl: bool, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_ssl)
                    .build(),
            )
            .build()
            .new_agent();
        Self {
            agent,
            verify_ssl,
            timeout,
        }
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method.as_str(), request.path);

        let url = request.path.as_str();
        let result = match (request.method, &request.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), request).send_empty(),
        };
        let mut response = result.map_err(|e| {
            warn!("{} {} failed: {e}", request.method.as_str(), request.path);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Bytes, not text: whether the body is JSON is decided by
        // `ForemanClient::parse_object`. No size limit beyond available memory.
        let body = match response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
        {
            Ok(body) => body,
            // The body of an error response is never parsed, so a broken read
            // must not hide the status.
            Err(_) if !status.is_success() => Vec::new(),
            Err(e) => {
                warn!("reading response body from {} failed: {e}", request.path);
                return Err(ApiError::Network(e.to_string()));
            }
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Copy the request headers onto a ureq builder. `Content-Length` is left to
/// ureq, which derives the same value from the body it sends.
fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        if name.eq_ignore_ascii_case("content-length") {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
