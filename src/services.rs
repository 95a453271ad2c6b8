//! Collaborator interfaces consumed by the adapter
//!
//! The adapter owns no transport: every remote interaction goes through
//! [`RemoteTaskService`], implemented elsewhere on top of the appliance's
//! HTTP API. Timeouts, retries and session handling live behind that
//! implementation; a transport timeout surfaces here as an ordinary
//! [`crate::Error`], never swallowed. Host-side concerns (shared-folder
//! lookup, path remapping, data deletion) are separate traits so tests and
//! hosts can swap them independently.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{RemotePathInfo, RemoteTask, TaskType, VersionBounds};

/// Wire operations against the remote download service
///
/// One trait rather than one per operation: all of these share a single
/// authenticated transport session, and a single mock covers them in tests.
#[async_trait]
pub trait RemoteTaskService: Send + Sync {
    /// List current tasks, optionally filtered to one task kind
    async fn list_tasks(&self, task_type: Option<TaskType>) -> Result<Vec<RemoteTask>>;

    /// Submit a new task by URL, targeting `directory` when given
    ///
    /// The remote assigns the task id asynchronously; this call returns
    /// nothing and the id is recovered by correlation.
    async fn submit_url(&self, url: &str, directory: Option<&str>) -> Result<()>;

    /// Submit a new task from file content, targeting `directory` when given
    async fn submit_file(
        &self,
        filename: &str,
        content: &[u8],
        directory: Option<&str>,
    ) -> Result<()>;

    /// Remove a task by its remote id
    async fn remove_task(&self, task_id: &str) -> Result<()>;

    /// The remote service's configured default destination, if any
    async fn default_destination(&self) -> Result<Option<String>>;

    /// Existence and type info for a remote path
    async fn path_info(&self, path: &str) -> Result<RemotePathInfo>;

    /// Task-API protocol version range the remote supports
    async fn version_bounds(&self) -> Result<VersionBounds>;

    /// Stable per-device serial, used to salt composite download ids
    async fn serial_number(&self) -> Result<String>;
}

/// Resolves a shared-folder-relative path to an absolute remote path
///
/// Remote paths are relative to an opaque named volume on the appliance;
/// the resolver knows the volume layout for the device identified by
/// `serial`.
#[async_trait]
pub trait SharedFolderResolver: Send + Sync {
    /// Map a remote-relative path to the appliance's absolute path
    async fn resolve(&self, serial: &str, relative_path: &str) -> Result<PathBuf>;
}

/// Remaps a remote host's absolute path to a locally reachable path
pub trait PathRemapper: Send + Sync {
    /// Map `(remote host, remote path)` to a path reachable by this process
    fn remap(&self, host: &str, remote_path: &Path) -> PathBuf;
}

/// Deletes previously downloaded data for a download item
#[async_trait]
pub trait DataDeleter: Send + Sync {
    /// Delete the data belonging to the given composite download id
    async fn delete(&self, download_id: &crate::types::DownloadId) -> Result<()>;
}
