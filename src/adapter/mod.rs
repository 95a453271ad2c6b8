//! Download-client adapter orchestration
//!
//! [`DownloadAdapter`] ties the leaf components together and exposes the
//! host-facing surface:
//! - [`list_items`](DownloadAdapter::list_items) - normalized listing
//! - [`add_by_url`](DownloadAdapter::add_by_url) /
//!   [`add_by_file`](DownloadAdapter::add_by_file) - submission plus
//!   identity correlation
//! - [`remove_item`](DownloadAdapter::remove_item) - removal with optional
//!   data deletion
//! - [`status`](DownloadAdapter::status) - host/path diagnostics
//! - [`test`](DownloadAdapter::test) - preflight validation probe
//!
//! The adapter is stateless between calls: everything a call needs is
//! passed in or re-fetched from the remote service, so concurrent
//! invocations from the host scheduler need no locking here.

mod correlate;
mod validation;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use validation::ValidationFailure;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AdapterConfig;
use crate::error::{Error, Result};
use crate::services::{DataDeleter, PathRemapper, RemoteTaskService, SharedFolderResolver};
use crate::types::{AdapterStatus, DownloadId, DownloadItem, RemoteTask, TaskType};
use crate::{paths, progress, status};

/// Client-side adapter over one remote download service instance
///
/// Cloneable; all collaborators are `Arc`-wrapped trait objects.
#[derive(Clone)]
pub struct DownloadAdapter {
    pub(crate) config: AdapterConfig,
    pub(crate) remote: Arc<dyn RemoteTaskService>,
    pub(crate) shared_folders: Arc<dyn SharedFolderResolver>,
    pub(crate) remapper: Arc<dyn PathRemapper>,
    pub(crate) deleter: Arc<dyn DataDeleter>,
}

impl DownloadAdapter {
    /// Create an adapter from configuration and collaborator implementations
    pub fn new(
        config: AdapterConfig,
        remote: Arc<dyn RemoteTaskService>,
        shared_folders: Arc<dyn SharedFolderResolver>,
        remapper: Arc<dyn PathRemapper>,
        deleter: Arc<dyn DataDeleter>,
    ) -> Self {
        Self {
            config,
            remote,
            shared_folders,
            remapper,
            deleter,
        }
    }

    /// List the remote BT tasks as normalized download items
    ///
    /// Applies the configured directory/category filter, classifies each
    /// task, derives progress, and resolves output paths for terminal
    /// statuses. Order matches the remote listing. Malformed counters on one
    /// task degrade that item only, never the batch.
    pub async fn list_items(&self) -> Result<Vec<DownloadItem>> {
        let serial = self.remote.serial_number().await?;
        let tasks = self.remote.list_tasks(Some(TaskType::Bt)).await?;

        let mut items = Vec::with_capacity(tasks.len());
        for task in tasks {
            if !paths::accepts(
                task.detail.destination.as_deref(),
                self.config.directory.as_deref(),
                self.config.category.as_deref(),
            ) {
                continue;
            }

            let classification = status::classify(&task);
            let output_path = if classification.status.is_terminal() {
                self.resolve_output_path(&serial, &task).await?
            } else {
                None
            };

            items.push(DownloadItem {
                download_id: DownloadId::new(&serial, &task.id),
                title: task.title.clone(),
                total_size: task.size,
                remaining_size: progress::remaining_size(&task),
                remaining_time: progress::remaining_time(&task),
                status: classification.status,
                message: classification.message,
                can_move_files: classification.can_move_files,
                can_be_removed: classification.can_be_removed,
                output_path,
            });
        }

        tracing::debug!(host = %self.config.host, count = items.len(), "listed download items");
        Ok(items)
    }

    /// Submit a task by URL and correlate it to its remote-assigned id
    ///
    /// Submission returns no id; the follow-up listing is searched for a
    /// task whose origin uri equals the submitted url. A missing match is
    /// reported as [`Error::NotFound`] even though the remote may have
    /// accepted the job; the next full listing reconciles any orphan.
    pub async fn add_by_url(&self, url: &str) -> Result<DownloadId> {
        let directory = self.submission_directory().await?;
        self.remote.submit_url(url, directory.as_deref()).await?;
        tracing::debug!(host = %self.config.host, url, "submitted download by url");

        let serial = self.remote.serial_number().await?;
        let task = correlate::find_submitted_task(self.remote.as_ref(), url).await?;
        Ok(DownloadId::new(serial, task.id))
    }

    /// Submit a task from file content and correlate it to its remote id
    ///
    /// Correlation matches the filename with its extension stripped, which
    /// is how the remote reports a file submission's origin.
    pub async fn add_by_file(&self, filename: &str, content: &[u8]) -> Result<DownloadId> {
        let directory = self.submission_directory().await?;
        self.remote
            .submit_file(filename, content, directory.as_deref())
            .await?;
        tracing::debug!(host = %self.config.host, filename, "submitted download by file");

        let serial = self.remote.serial_number().await?;
        let stem = correlate::file_stem(filename);
        let task = correlate::find_submitted_task(self.remote.as_ref(), stem).await?;
        Ok(DownloadId::new(serial, task.id))
    }

    /// Remove a task, optionally deleting its downloaded data first
    pub async fn remove_item(&self, download_id: &DownloadId, delete_data: bool) -> Result<()> {
        if delete_data {
            self.deleter.delete(download_id).await?;
        }
        self.remote.remove_task(&download_id.task_id).await?;
        tracing::info!(
            host = %self.config.host,
            task_id = %download_id.task_id,
            delete_data,
            "removed download task"
        );
        Ok(())
    }

    /// Report whether the configured host is loopback and the root output
    /// folder(s) remapped to locally reachable paths
    pub async fn status(&self) -> Result<AdapterStatus> {
        let directory = match self.submission_directory().await? {
            Some(directory) => Some(directory),
            None => self.remote.default_destination().await?,
        };

        let mut output_root_folders = Vec::new();
        if let Some(directory) = directory {
            let serial = self.remote.serial_number().await?;
            let absolute = self.shared_folders.resolve(&serial, &directory).await?;
            output_root_folders.push(self.remapper.remap(&self.config.host, &absolute));
        }

        Ok(AdapterStatus {
            is_localhost: is_loopback_host(&self.config.host),
            output_root_folders,
        })
    }

    /// Directory submissions should target, if one is configured
    ///
    /// A fixed directory wins; otherwise a configured category lands under
    /// the remote's default destination. With neither, the remote applies
    /// its own default and this returns `None`.
    pub(crate) async fn submission_directory(&self) -> Result<Option<String>> {
        if let Some(directory) = &self.config.directory {
            return Ok(Some(directory.clone()));
        }

        let Some(category) = &self.config.category else {
            return Ok(None);
        };

        match self.remote.default_destination().await? {
            Some(destination) if !destination.is_empty() => {
                Ok(Some(paths::join_category(&destination, category)))
            }
            _ => Err(Error::RemoteOperation(format!(
                "no default destination configured on {}",
                self.config.host
            ))),
        }
    }

    /// Resolve a task's host-usable output path
    ///
    /// Two stages: the shared-folder resolver turns the remote-relative
    /// destination into the appliance's absolute path, then the remapper
    /// makes that path reachable from the host process. The task title is
    /// the leaf output directory.
    async fn resolve_output_path(
        &self,
        serial: &str,
        task: &RemoteTask,
    ) -> Result<Option<PathBuf>> {
        let Some(destination) = &task.detail.destination else {
            return Ok(None);
        };
        let absolute = self.shared_folders.resolve(serial, destination).await?;
        let local = self.remapper.remap(&self.config.host, &absolute);
        Ok(Some(local.join(&task.title)))
    }
}

/// Whether a configured host names the local machine
fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<std::net::IpAddr>()
        .map(|addr| addr.is_loopback())
        .unwrap_or(false)
}
