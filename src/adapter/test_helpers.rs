//! Shared test helpers: in-memory collaborator implementations and task
//! builders for adapter tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapter::DownloadAdapter;
use crate::config::AdapterConfig;
use crate::error::{Error, Result};
use crate::services::{DataDeleter, PathRemapper, RemoteTaskService, SharedFolderResolver};
use crate::types::{
    DownloadId, RawStatus, RemotePathInfo, RemoteTask, TaskDetail, TaskTransfer, TaskType,
    VersionBounds,
};

/// Build a BT task with sensible defaults; tests mutate what they care about
pub(crate) fn bt_task(id: &str, title: &str, status: RawStatus, size: u64) -> RemoteTask {
    RemoteTask {
        id: id.to_string(),
        title: title.to_string(),
        task_type: TaskType::Bt,
        size,
        status,
        status_extra: None,
        detail: TaskDetail {
            destination: Some("volume1/downloads".to_string()),
            uri: None,
        },
        transfer: TaskTransfer::default(),
    }
}

/// Failure a mock can be armed with for a specific operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArmedFailure {
    Authentication,
    Connectivity,
    Remote,
}

impl ArmedFailure {
    fn to_error(self, host: &str) -> Error {
        match self {
            ArmedFailure::Authentication => Error::Authentication {
                host: host.to_string(),
                message: "invalid credentials".to_string(),
            },
            ArmedFailure::Connectivity => Error::Connectivity {
                host: host.to_string(),
                message: "connection refused".to_string(),
            },
            ArmedFailure::Remote => Error::RemoteOperation("remote failure".to_string()),
        }
    }
}

/// In-memory remote service: serves canned data, records every mutation
pub(crate) struct MockRemote {
    pub(crate) host: String,
    pub(crate) tasks: Mutex<Vec<RemoteTask>>,
    pub(crate) serial: String,
    pub(crate) version: VersionBounds,
    pub(crate) default_destination: Option<String>,
    /// Paths with explicit info; anything else exists as a directory
    pub(crate) path_infos: Mutex<HashMap<String, RemotePathInfo>>,
    pub(crate) version_failure: Option<ArmedFailure>,
    pub(crate) list_failure: Option<ArmedFailure>,
    pub(crate) submitted_urls: Mutex<Vec<(String, Option<String>)>>,
    pub(crate) submitted_files: Mutex<Vec<(String, Option<String>)>>,
    pub(crate) removed: Mutex<Vec<String>>,
}

impl Default for MockRemote {
    fn default() -> Self {
        Self {
            host: "nas.local".to_string(),
            tasks: Mutex::new(Vec::new()),
            serial: "serial001".to_string(),
            version: VersionBounds { min: 1, max: 3 },
            default_destination: Some("volume1/downloads".to_string()),
            path_infos: Mutex::new(HashMap::new()),
            version_failure: None,
            list_failure: None,
            submitted_urls: Mutex::new(Vec::new()),
            submitted_files: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }
}

impl MockRemote {
    pub(crate) fn with_tasks(tasks: Vec<RemoteTask>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    pub(crate) fn mark_path_missing(&self, path: &str) {
        self.path_infos.lock().unwrap().insert(
            path.to_string(),
            RemotePathInfo {
                exists: false,
                is_directory: false,
            },
        );
    }
}

#[async_trait]
impl RemoteTaskService for MockRemote {
    async fn list_tasks(&self, task_type: Option<TaskType>) -> Result<Vec<RemoteTask>> {
        if let Some(failure) = self.list_failure {
            return Err(failure.to_error(&self.host));
        }
        let tasks = self.tasks.lock().unwrap().clone();
        Ok(match task_type {
            Some(wanted) => tasks
                .into_iter()
                .filter(|task| task.task_type == wanted)
                .collect(),
            None => tasks,
        })
    }

    async fn submit_url(&self, url: &str, directory: Option<&str>) -> Result<()> {
        self.submitted_urls
            .lock()
            .unwrap()
            .push((url.to_string(), directory.map(str::to_string)));
        Ok(())
    }

    async fn submit_file(
        &self,
        filename: &str,
        _content: &[u8],
        directory: Option<&str>,
    ) -> Result<()> {
        self.submitted_files
            .lock()
            .unwrap()
            .push((filename.to_string(), directory.map(str::to_string)));
        Ok(())
    }

    async fn remove_task(&self, task_id: &str) -> Result<()> {
        self.removed.lock().unwrap().push(task_id.to_string());
        Ok(())
    }

    async fn default_destination(&self) -> Result<Option<String>> {
        Ok(self.default_destination.clone())
    }

    async fn path_info(&self, path: &str) -> Result<RemotePathInfo> {
        Ok(self
            .path_infos
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(RemotePathInfo {
                exists: true,
                is_directory: true,
            }))
    }

    async fn version_bounds(&self) -> Result<VersionBounds> {
        if let Some(failure) = self.version_failure {
            return Err(failure.to_error(&self.host));
        }
        Ok(self.version)
    }

    async fn serial_number(&self) -> Result<String> {
        Ok(self.serial.clone())
    }
}

/// Shared-folder resolver that anchors everything under `/mnt`
pub(crate) struct MockSharedFolders;

#[async_trait]
impl SharedFolderResolver for MockSharedFolders {
    async fn resolve(&self, _serial: &str, relative_path: &str) -> Result<PathBuf> {
        Ok(PathBuf::from("/mnt").join(crate::paths::normalize(relative_path)))
    }
}

/// Remapper that prefixes remote paths with `/local`
pub(crate) struct MockRemapper;

impl PathRemapper for MockRemapper {
    fn remap(&self, _host: &str, remote_path: &Path) -> PathBuf {
        let mut local = PathBuf::from("/local");
        for component in remote_path.components().skip(1) {
            local.push(component);
        }
        local
    }
}

/// Deleter that records the ids it was asked to delete
#[derive(Default)]
pub(crate) struct MockDeleter {
    pub(crate) deleted: Mutex<Vec<DownloadId>>,
}

#[async_trait]
impl DataDeleter for MockDeleter {
    async fn delete(&self, download_id: &DownloadId) -> Result<()> {
        self.deleted.lock().unwrap().push(download_id.clone());
        Ok(())
    }
}

/// Assemble an adapter around a mock remote, keeping handles for inspection
pub(crate) fn create_test_adapter(
    config: AdapterConfig,
    remote: MockRemote,
) -> (DownloadAdapter, Arc<MockRemote>, Arc<MockDeleter>) {
    let remote = Arc::new(remote);
    let deleter = Arc::new(MockDeleter::default());
    let adapter = DownloadAdapter::new(
        config,
        remote.clone(),
        Arc::new(MockSharedFolders),
        Arc::new(MockRemapper),
        deleter.clone(),
    );
    (adapter, remote, deleter)
}

/// Config pointed at the mock remote with no filter configured
pub(crate) fn test_config() -> AdapterConfig {
    AdapterConfig {
        host: "nas.local".to_string(),
        ..AdapterConfig::default()
    }
}
