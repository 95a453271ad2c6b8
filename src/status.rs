//! Classification of raw remote task states into the uniform status model
//!
//! The remote has a quirk worth naming: a fully downloaded task can
//! momentarily report a pre-download state (`waiting` and friends) while the
//! appliance catches up with itself. Classification therefore falls back to
//! the derived remaining size for those states instead of trusting the raw
//! value alone.

use crate::progress;
use crate::types::{DownloadStatus, RawStatus, RemoteTask};

/// Outcome of classifying one remote task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Uniform status
    pub status: DownloadStatus,
    /// Optional human-readable message (extraction progress, error detail)
    pub message: Option<String>,
    /// Whether output files may be moved already
    ///
    /// Broader than `status == Completed`: seeding tasks and tasks in the
    /// momentary pre-download quirk with nothing left to download are
    /// movable before the remote reports them finished.
    pub can_move_files: bool,
    /// Whether the task may be removed from the remote service
    ///
    /// Stricter than `status == Completed`: a seeding task is completed for
    /// file-move purposes but must not be removed while still seeding.
    pub can_be_removed: bool,
}

/// Classify a remote task
pub fn classify(task: &RemoteTask) -> Classification {
    let status = uniform_status(task);
    Classification {
        status,
        message: message(task),
        can_move_files: matches!(task.status, RawStatus::Seeding | RawStatus::Finished)
            || (is_pre_download(&task.status) && task.size > 0 && progress::remaining_size(task) == 0),
        can_be_removed: task.status == RawStatus::Finished,
    }
}

/// States that can spuriously show up on an already-complete task
fn is_pre_download(status: &RawStatus) -> bool {
    matches!(
        status,
        RawStatus::Waiting | RawStatus::FilehostingWaiting | RawStatus::Unrecognized(_)
    )
}

fn uniform_status(task: &RemoteTask) -> DownloadStatus {
    match &task.status {
        status if is_pre_download(status) => {
            if task.size == 0 || progress::remaining_size(task) > 0 {
                DownloadStatus::Queued
            } else {
                DownloadStatus::Completed
            }
        }
        RawStatus::Paused => DownloadStatus::Paused,
        RawStatus::Finished | RawStatus::Seeding => DownloadStatus::Completed,
        RawStatus::Error => DownloadStatus::Failed,
        _ => DownloadStatus::Downloading,
    }
}

/// Derive the optional status message
///
/// Only two raw states carry one: `extracting` formats its progress
/// attribute as a percentage, `error` passes its detail through verbatim.
/// A malformed extraction percentage yields no message rather than failing
/// the batch.
fn message(task: &RemoteTask) -> Option<String> {
    let extra = task.status_extra.as_ref()?;
    match task.status {
        RawStatus::Extracting => extra
            .unzip_progress
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .filter(|percent| *percent <= 100)
            .map(|percent| format!("Extracting: {percent}%")),
        RawStatus::Error => extra.error_detail.clone(),
        _ => None,
    }
}
