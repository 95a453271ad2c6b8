//! Error types for nas-dl
//!
//! The taxonomy distinguishes failures a caller can act on (bad credentials,
//! unreachable host, unsupported remote API) from generic remote-operation
//! failures passed through from the transport. Malformed counter data is not
//! an error: it is recovered in place with a safe default and a diagnostic.

use thiserror::Error;

/// Result type alias for nas-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nas-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials were rejected or the session lacks permission
    #[error("authentication failed against {host}: {message}")]
    Authentication {
        /// Host the authentication was attempted against
        host: String,
        /// Remote-supplied or transport-supplied detail
        message: String,
    },

    /// Host or port unreachable
    #[error("cannot connect to {host}: {message}")]
    Connectivity {
        /// Host that could not be reached
        host: String,
        /// Underlying transport detail
        message: String,
    },

    /// Remote API version range does not cover the version this adapter speaks
    #[error("remote task API supports versions {min}-{max}, adapter requires {required}")]
    UnsupportedVersion {
        /// Version this adapter requires
        required: u32,
        /// Minimum version the remote reports
        min: u32,
        /// Maximum version the remote reports
        max: u32,
    },

    /// A submitted job could not be located during correlation
    #[error("download not found: {0}")]
    NotFound(String),

    /// Composite download id did not contain a `<salt>:<task id>` pair
    #[error("malformed download id: {0}")]
    InvalidDownloadId(String),

    /// Generic passthrough failure from the remote service or transport
    #[error("remote operation failed: {0}")]
    RemoteOperation(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
