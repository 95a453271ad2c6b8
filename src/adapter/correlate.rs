//! Post-submission identity correlation
//!
//! Submission does not return a task id, so the adapter re-lists current BT
//! tasks and searches for the one whose origin uri matches what was just
//! submitted: the exact url for url submissions, the extension-stripped
//! filename for file submissions.
//!
//! This is best-effort by construction. The remote protocol offers no
//! idempotency token, so two structurally identical submissions in flight
//! can correlate to the same task; when several tasks match, which one is
//! chosen is undefined (the first in remote listing order is taken). An
//! uncorrelated but accepted job is an orphan until the next full listing
//! makes it visible again.

use crate::error::{Error, Result};
use crate::services::RemoteTaskService;
use crate::types::{RemoteTask, TaskType};

/// Find the just-submitted task whose origin uri equals `expected_uri`
///
/// Zero matches is an add-failure: the submission may or may not have been
/// accepted, and the caller must treat it as failed either way.
pub(super) async fn find_submitted_task(
    remote: &dyn RemoteTaskService,
    expected_uri: &str,
) -> Result<RemoteTask> {
    let tasks = remote.list_tasks(Some(TaskType::Bt)).await?;

    let mut matches = tasks
        .into_iter()
        .filter(|task| task.detail.uri.as_deref() == Some(expected_uri));

    match matches.next() {
        Some(task) => {
            if matches.next().is_some() {
                tracing::warn!(
                    uri = expected_uri,
                    task_id = %task.id,
                    "multiple tasks match submission, taking the first"
                );
            }
            Ok(task)
        }
        None => Err(Error::NotFound(format!(
            "submission not found after polling: {expected_uri}"
        ))),
    }
}

/// Strip the extension from a submitted filename
///
/// The remote records a file submission's origin as the filename stem. A
/// dot-leading filename with no other dot (`.hidden`) keeps its full name:
/// the leading dot is not an extension separator, and correlation equality
/// depends on matching what the remote stores.
pub(super) fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}
