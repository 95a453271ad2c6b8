//! Configuration types for nas-dl

use serde::{Deserialize, Serialize};

/// Adapter configuration, supplied externally per client instance
///
/// `directory` and `category` steer where submissions land and which tasks a
/// listing keeps. When `directory` is set it wins; when only `category` is
/// set, submissions target the remote's default destination with the
/// category appended as a subfolder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Remote service host name or address
    pub host: String,

    /// Remote service port (default: 5000 plain, set 5001 for TLS setups)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to reach the remote over TLS
    #[serde(default)]
    pub use_tls: bool,

    /// Account used against the remote service
    #[serde(default)]
    pub username: String,

    /// Password for the account
    #[serde(default)]
    pub password: String,

    /// Fixed remote output directory, relative to a shared folder
    /// (e.g. `volume1/tv`); takes precedence over `category`
    #[serde(default)]
    pub directory: Option<String>,

    /// Category name used both as a listing filter (path segment match)
    /// and as a subfolder under the remote's default destination
    #[serde(default)]
    pub category: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: default_port(),
            use_tls: false,
            username: String::new(),
            password: String::new(),
            directory: None,
            category: None,
        }
    }
}

fn default_port() -> u16 {
    5000
}
