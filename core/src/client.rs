//! Stateless HTTP request builder and response parser for the Foreman API.
//!
//! # Design
//! `ForemanClient` holds the base URL and the precomputed `Authorization`
//! value and carries no mutable state between calls. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. `Foreman` runs the round trip in
//! between through a `Transport`.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, warn};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateHost, JsonObject};

const JSON: &str = "application/json";

/// Synchronous, stateless request builder for the Foreman REST API.
#[derive(Clone)]
pub struct ForemanClient {
    hostname: String,
    username: String,
    password: String,
    base_url: String,
    auth: String,
}

impl ForemanClient {
    /// Targets `https://<hostname>/api/`.
    pub fn new(hostname: &str, username: &str, password: &str) -> Self {
        Self::build(hostname, format!("https://{hostname}/api/"), username, password)
    }

    /// Targets an explicit base URL, e.g. `http://127.0.0.1:3000/api`.
    /// A trailing `/` is added when missing; `hostname()` is the URL's
    /// authority.
    pub fn with_base_url(base_url: &str, username: &str, password: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self::build(hostname_of(&base_url), base_url.clone(), username, password)
    }

    fn build(hostname: &str, base_url: String, username: &str, password: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            auth: basic_auth(username, password),
            base_url,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, endpoint: &str) -> HttpRequest {
        self.request(HttpMethod::Get, endpoint, None)
    }

    /// `body` is sent verbatim and must already be JSON-encoded.
    pub fn build_post(&self, endpoint: &str, body: String) -> HttpRequest {
        self.request(HttpMethod::Post, endpoint, Some(body))
    }

    pub fn build_delete(&self, endpoint: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, endpoint, None)
    }

    pub fn build_create_host(
        &self,
        hostgroup_id: i64,
        name: &str,
        mac: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = CreateHost::new(hostgroup_id, name, mac);
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_post("hosts", body))
    }

    pub fn build_delete_host(&self, id: &str) -> HttpRequest {
        self.build_delete(&format!("hosts/{id}"))
    }

    /// Decode a response body that must be a JSON object.
    ///
    /// Non-2xx statuses fail before the body is looked at.
    pub fn parse_object(&self, response: HttpResponse) -> Result<JsonObject, ApiError> {
        check_status(&response)?;
        let value: Value = serde_json::from_slice(&response.body).map_err(|e| {
            debug!("response body is not valid JSON: {e}");
            ApiError::Decode(e.to_string())
        })?;
        match value {
            Value::Object(object) => Ok(object),
            other => {
                debug!("response body is a JSON {}, not an object", kind_of(&other));
                Err(ApiError::Shape(format!(
                    "expected a JSON object, found {}",
                    kind_of(&other)
                )))
            }
        }
    }

    /// Returns the new host's id as a decimal string.
    pub fn parse_create_host(&self, response: HttpResponse) -> Result<String, ApiError> {
        let object = self.parse_object(response)?;
        host_id(&object)
    }

    pub fn parse_delete_host(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_object(response).map(|_| ())
    }

    fn request(&self, method: HttpMethod, endpoint: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("Content-Type".to_string(), JSON.to_string()),
            ("Accept".to_string(), JSON.to_string()),
            ("Authorization".to_string(), self.auth.clone()),
        ];
        if let Some(body) = &body {
            headers.push(("Content-Length".to_string(), body.len().to_string()));
        }
        HttpRequest {
            method,
            path: format!("{}{}", self.base_url, endpoint.trim_start_matches('/')),
            headers,
            body,
        }
    }
}

impl fmt::Debug for ForemanClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForemanClient")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// `Basic <base64(username:password)>`.
fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn hostname_of(base_url: &str) -> &str {
    let rest = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!("request failed with HTTP {} {}", response.status, response.reason);
    Err(ApiError::Status {
        status: response.status,
        reason: response.reason.clone(),
    })
}

/// Extract the numeric `id` field. Integers are rendered exactly, other
/// numbers are rounded to zero decimals.
fn host_id(object: &JsonObject) -> Result<String, ApiError> {
    match object.get("id") {
        Some(Value::Number(n)) => {
            if let Some(id) = n.as_u64() {
                Ok(id.to_string())
            } else if let Some(id) = n.as_i64() {
                Ok(id.to_string())
            } else if let Some(id) = n.as_f64() {
                Ok(format!("{id:.0}"))
            } else {
                Err(ApiError::Shape(format!("\"id\" is not representable: {n}")))
            }
        }
        Some(other) => Err(ApiError::Shape(format!(
            "\"id\" is a {}, expected a number",
            kind_of(other)
        ))),
        None => Err(ApiError::Shape("response has no \"id\" field".to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
