//! Preflight validation probe for configuration diagnostics
//!
//! Three short-circuiting stages: connectivity and protocol version, output
//! path existence, then an end-to-end listing smoke test. Each stage yields
//! at most one structured failure and a stage-1 failure skips the rest.
//! Nothing here propagates an error: `test()` converts every failure,
//! expected or not, into a [`ValidationFailure`] record.

use super::DownloadAdapter;
use crate::error::{Error, Result};
use crate::paths;

/// Task-API protocol version this adapter speaks
pub(crate) const TASK_API_VERSION: u32 = 2;

/// One structured preflight failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Configuration field the failure points at
    pub field: String,
    /// Short human-readable message
    pub message: String,
    /// Optional remediation hint or underlying detail
    pub detail: Option<String>,
}

impl ValidationFailure {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            detail: None,
        }
    }

    fn with_detail(field: &str, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

impl DownloadAdapter {
    /// Run the preflight probe
    ///
    /// Returns an empty vec when everything checks out, otherwise the single
    /// failure of the first stage that did not.
    pub async fn test(&self) -> Vec<ValidationFailure> {
        if let Some(failure) = self.check_connection().await {
            return vec![failure];
        }
        if let Some(failure) = self.check_output_path().await {
            return vec![failure];
        }
        if let Some(failure) = self.check_listing().await {
            return vec![failure];
        }
        Vec::new()
    }

    /// Stage 1: connectivity, authentication and protocol version
    async fn check_connection(&self) -> Option<ValidationFailure> {
        let bounds = match self.remote.version_bounds().await {
            Ok(bounds) => bounds,
            Err(error) => return Some(self.connection_failure(error)),
        };

        if TASK_API_VERSION < bounds.min || TASK_API_VERSION > bounds.max {
            return Some(self.connection_failure(Error::UnsupportedVersion {
                required: TASK_API_VERSION,
                min: bounds.min,
                max: bounds.max,
            }));
        }
        None
    }

    /// Stage 2: the effective download directory exists on the remote
    async fn check_output_path(&self) -> Option<ValidationFailure> {
        match self.probe_output_path().await {
            Ok(result) => result,
            Err(error) => {
                tracing::debug!(error = %error, "output path probe failed");
                Some(ValidationFailure::with_detail(
                    "directory",
                    "Unable to verify the download directory",
                    error.to_string(),
                ))
            }
        }
    }

    async fn probe_output_path(&self) -> Result<Option<ValidationFailure>> {
        let directory = if let Some(directory) = &self.config.directory {
            directory.clone()
        } else {
            match self.remote.default_destination().await? {
                Some(destination) if !destination.is_empty() => match &self.config.category {
                    Some(category) => paths::join_category(&destination, category),
                    None => destination,
                },
                _ => {
                    return Ok(Some(ValidationFailure::with_detail(
                        "directory",
                        "No default destination configured",
                        "Configure a default destination on the remote download service",
                    )));
                }
            }
        };

        let Some(shared) = paths::shared_folder(&directory) else {
            return Ok(Some(ValidationFailure::new(
                "directory",
                "Download directory is empty",
            )));
        };

        let info = self.remote.path_info(&format!("/{shared}")).await?;
        if !info.exists || !info.is_directory {
            return Ok(Some(ValidationFailure::with_detail(
                "directory",
                format!("Shared folder {shared} does not exist"),
                "Create the shared folder on the remote device or pick another one",
            )));
        }

        let full = paths::normalize(&directory);
        if full != shared {
            let info = self.remote.path_info(&format!("/{full}")).await?;
            if !info.exists || !info.is_directory {
                return Ok(Some(ValidationFailure::with_detail(
                    "directory",
                    format!("Folder {full} does not exist"),
                    "Create the subfolder under the shared folder or pick another one",
                )));
            }
        }

        Ok(None)
    }

    /// Stage 3: end-to-end listing smoke test
    async fn check_listing(&self) -> Option<ValidationFailure> {
        match self.list_items().await {
            Ok(_) => None,
            Err(error) => Some(ValidationFailure::with_detail(
                "host",
                "Unable to list download tasks",
                error.to_string(),
            )),
        }
    }

    /// Map a stage-1 error to a failure pointing at the right field
    fn connection_failure(&self, error: Error) -> ValidationFailure {
        match &error {
            Error::Authentication { .. } => ValidationFailure::with_detail(
                "username",
                "Authentication failure",
                format!("Check the username and password for {}", self.config.host),
            ),
            Error::Connectivity { .. } => ValidationFailure::with_detail(
                "host",
                format!("Unable to connect to {}", self.config.host),
                error.to_string(),
            ),
            Error::UnsupportedVersion { min, max, .. } => ValidationFailure::with_detail(
                "host",
                "Remote download service version is not supported",
                format!(
                    "The remote supports task API versions {min}-{max}; update the remote service"
                ),
            ),
            _ => ValidationFailure::with_detail(
                "host",
                "Unexpected error while contacting the remote service",
                error.to_string(),
            ),
        }
    }
}
