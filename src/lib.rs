//! # nas-dl
//!
//! Client-side adapter that normalizes the task model of a polling-based
//! NAS BT/torrent download service into a uniform download-item model for a
//! download-queue supervisor.
//!
//! ## Design Philosophy
//!
//! nas-dl is designed to be:
//! - **Transport-agnostic** - the HTTP/auth layer lives behind collaborator
//!   traits; this crate owns classification, correlation and path logic
//! - **Stateless** - every call is independently re-derivable from the
//!   remote listing; nothing is cached or persisted between calls
//! - **Forgiving at the boundary** - unknown remote states and malformed
//!   counters degrade a single item, never a whole listing
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use nas_dl::{AdapterConfig, DownloadAdapter};
//! # use nas_dl::services::{RemoteTaskService, SharedFolderResolver, PathRemapper, DataDeleter};
//! # fn collaborators() -> (Arc<dyn RemoteTaskService>, Arc<dyn SharedFolderResolver>,
//! #     Arc<dyn PathRemapper>, Arc<dyn DataDeleter>) { unimplemented!() }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdapterConfig {
//!         host: "nas.local".to_string(),
//!         category: Some("tv".to_string()),
//!         ..Default::default()
//!     };
//!     let (remote, shared_folders, remapper, deleter) = collaborators();
//!     let adapter = DownloadAdapter::new(config, remote, shared_folders, remapper, deleter);
//!
//!     for item in adapter.list_items().await? {
//!         println!("{} {:?}", item.title, item.status);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Adapter orchestration (list/add/remove/status/test)
pub mod adapter;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Remote path filters and normalization
pub mod paths;
/// Progress derivation from transfer counters
pub mod progress;
/// Collaborator interfaces (transport, shared folders, remapping, deletion)
pub mod services;
/// Raw-status classification into the uniform model
pub mod status;
/// Core types
pub mod types;

// Re-export commonly used types
pub use adapter::{DownloadAdapter, ValidationFailure};
pub use config::AdapterConfig;
pub use error::{Error, Result};
pub use status::{Classification, classify};
pub use types::{
    AdapterStatus, DownloadId, DownloadItem, DownloadStatus, RawStatus, RemotePathInfo,
    RemoteTask, StatusExtra, TaskDetail, TaskTransfer, TaskType, VersionBounds,
};
