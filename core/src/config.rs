//! Connection settings for callers that keep them in a config file.
//!
//! The crate reads no files or environment variables itself; deserialize a
//! `ForemanConfig` from whatever source the application uses and pass it to
//! `Foreman::from_config`.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForemanConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
    /// Off unless set: see the security note on `UreqTransport`.
    #[serde(default)]
    pub verify_ssl: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ForemanConfig {
    pub fn new(hostname: &str, username: &str, password: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            verify_ssl: false,
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ForemanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForemanConfig")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
