//! Synchronous client for the Foreman provisioning REST API.
//!
//! # Overview
//! Authenticates with HTTP Basic credentials, issues GET/POST/DELETE
//! requests against `https://<hostname>/api/`, and decodes JSON object
//! responses into generic maps. `create_host` and `delete_host` are built on
//! those primitives.
//!
//! # Design
//! - `ForemanClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `Transport` is the I/O seam; `UreqTransport` is the blocking
//!   implementation, tests plug in mocks.
//! - `Foreman` joins the two and is what most callers want.
//!
//! # Security
//! TLS certificate verification is **off** by default. See `UreqTransport`.

pub mod client;
pub mod config;
pub mod error;
pub mod foreman;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ForemanClient;
pub use config::ForemanConfig;
pub use error::ApiError;
pub use foreman::Foreman;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{CreateHost, HostAttributes, JsonObject};
