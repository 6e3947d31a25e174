//! Connected client: `ForemanClient` requests executed through a `Transport`.
//!
//! Every call is one blocking round trip. Errors from the transport or from
//! parsing propagate unchanged; nothing is retried.

use crate::client::ForemanClient;
use crate::config::ForemanConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::JsonObject;

/// Client for a Foreman server's REST API.
///
/// ```no_run
/// use foreman_core::Foreman;
///
/// let foreman = Foreman::new("foreman.example.com", "admin", "changeme");
/// let id = foreman.create_host(5, "node1", "aa:bb:cc:dd:ee:ff")?;
/// foreman.delete_host(&id)?;
/// # Ok::<(), foreman_core::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Foreman<T = UreqTransport> {
    client: ForemanClient,
    transport: T,
}

impl Foreman<UreqTransport> {
    /// Targets `https://<hostname>/api/` with TLS certificate verification
    /// **disabled**. Call `set_verify_ssl(true)` to enable it.
    pub fn new(hostname: &str, username: &str, password: &str) -> Self {
        Self::with_transport(
            ForemanClient::new(hostname, username, password),
            UreqTransport::default(),
        )
    }

    pub fn from_config(config: &ForemanConfig) -> Self {
        Self::with_transport(
            ForemanClient::new(&config.hostname, &config.username, &config.password),
            UreqTransport::with_timeout(config.verify_ssl, config.timeout()),
        )
    }

    pub fn verify_ssl(&self) -> bool {
        self.transport.verify_ssl()
    }

    /// Rebuilds the underlying agent with the new TLS policy; the timeout is
    /// kept.
    pub fn set_verify_ssl(&mut self, verify_ssl: bool) {
        if verify_ssl != self.transport.verify_ssl() {
            self.transport = UreqTransport::with_timeout(verify_ssl, self.transport.timeout());
        }
    }
}

impl<T: Transport> Foreman<T> {
    pub fn with_transport(client: ForemanClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ForemanClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn hostname(&self) -> &str {
        self.client.hostname()
    }

    pub fn username(&self) -> &str {
        self.client.username()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn get(&self, endpoint: &str) -> Result<JsonObject, ApiError> {
        let response = self.send(self.client.build_get(endpoint))?;
        self.client.parse_object(response)
    }

    /// `body` must already be JSON-encoded.
    pub fn post(&self, endpoint: &str, body: &str) -> Result<JsonObject, ApiError> {
        let response = self.send(self.client.build_post(endpoint, body.to_string()))?;
        self.client.parse_object(response)
    }

    pub fn delete(&self, endpoint: &str) -> Result<JsonObject, ApiError> {
        let response = self.send(self.client.build_delete(endpoint))?;
        self.client.parse_object(response)
    }

    /// Create a host scheduled for build and return its id.
    ///
    /// Neither the name nor the MAC address is validated locally.
    pub fn create_host(&self, hostgroup_id: i64, name: &str, mac: &str) -> Result<String, ApiError> {
        let request = self.client.build_create_host(hostgroup_id, name, mac)?;
        let response = self.send(request)?;
        self.client.parse_create_host(response)
    }

    /// Deleting an unknown id surfaces the server's status error.
    pub fn delete_host(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_host(id))?;
        self.client.parse_delete_host(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&request)
    }
}
