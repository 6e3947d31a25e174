//! Wire types for the Foreman API.
//!
//! Responses are decoded into the generic `JsonObject` map; only the host
//! creation request has a fixed schema.

use serde::{Deserialize, Serialize};

/// A decoded JSON object response body.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Request payload for `POST hosts`: `{"host": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateHost {
    pub host: HostAttributes,
}

/// Attributes of a host to create. Field order matches the serialized order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostAttributes {
    /// Host group id, sent as a decimal string.
    pub hostgroup_id: String,
    pub name: String,
    pub mac: String,
    pub build: bool,
}

impl CreateHost {
    /// Payload for a new host scheduled for build. The host group id is
    /// passed through as given; the server decides whether it is valid.
    pub fn new(hostgroup_id: i64, name: &str, mac: &str) -> Self {
        Self {
            host: HostAttributes {
                hostgroup_id: hostgroup_id.to_string(),
                name: name.to_string(),
                mac: mac.to_string(),
                build: true,
            },
        }
    }
}
