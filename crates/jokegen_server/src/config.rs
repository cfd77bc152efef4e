//! HTTP server configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Address the server listens on unless configured otherwise.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8080`
    bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl ServerConfig {
    /// Override the bind address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }
}
