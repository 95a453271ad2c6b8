//! Core types for nas-dl
//!
//! Remote payload records decode through explicit types with named optional
//! fields: a missing or non-numeric counter is an `Option::None` (or a raw
//! string the caller parses defensively), never a decode failure. The task
//! type and raw status enumerations are decoded once at this boundary, with
//! an explicit `Unrecognized` variant instead of case folding at call sites.

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Kind of job tracked by the remote service
///
/// Only BT/torrent tasks are adapted; every other kind decodes to
/// [`TaskType::Unrecognized`] and is filtered out of listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskType {
    /// BitTorrent task
    Bt,
    /// Any other task kind, preserving the raw value for diagnostics
    Unrecognized(String),
}

impl TaskType {
    /// Decode a raw task-type value (the remote reports mixed case)
    pub fn from_api(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "bt" => TaskType::Bt,
            _ => TaskType::Unrecognized(raw.to_string()),
        }
    }

    /// Wire representation of this task type
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Bt => "bt",
            TaskType::Unrecognized(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for TaskType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskType::from_api(&raw))
    }
}

impl Serialize for TaskType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Raw task state as reported by the remote service
///
/// Decoding is total: values this adapter does not know about become
/// [`RawStatus::Unrecognized`] and classify like a pre-download state
/// rather than failing the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawStatus {
    /// Queued on the remote side, transfer not started
    Waiting,
    /// Transfer in progress
    Downloading,
    /// Paused by a user or by the remote scheduler
    Paused,
    /// Transfer done, remote side finalizing
    Finishing,
    /// Task fully finished
    Finished,
    /// Verifying payload integrity
    HashChecking,
    /// Transfer done, still uploading to peers
    Seeding,
    /// Waiting on a file-hosting slot
    FilehostingWaiting,
    /// Unpacking a downloaded archive
    Extracting,
    /// Task failed on the remote side
    Error,
    /// Any state this adapter does not recognize
    Unrecognized(String),
}

impl RawStatus {
    /// Decode a raw status value
    pub fn from_api(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "waiting" => RawStatus::Waiting,
            "downloading" => RawStatus::Downloading,
            "paused" => RawStatus::Paused,
            "finishing" => RawStatus::Finishing,
            "finished" => RawStatus::Finished,
            "hash_checking" => RawStatus::HashChecking,
            "seeding" => RawStatus::Seeding,
            "filehosting_waiting" => RawStatus::FilehostingWaiting,
            "extracting" => RawStatus::Extracting,
            "error" => RawStatus::Error,
            _ => RawStatus::Unrecognized(raw.to_string()),
        }
    }

    /// Wire representation of this status
    pub fn as_str(&self) -> &str {
        match self {
            RawStatus::Waiting => "waiting",
            RawStatus::Downloading => "downloading",
            RawStatus::Paused => "paused",
            RawStatus::Finishing => "finishing",
            RawStatus::Finished => "finished",
            RawStatus::HashChecking => "hash_checking",
            RawStatus::Seeding => "seeding",
            RawStatus::FilehostingWaiting => "filehosting_waiting",
            RawStatus::Extracting => "extracting",
            RawStatus::Error => "error",
            RawStatus::Unrecognized(raw) => raw,
        }
    }
}

impl<'de> Deserialize<'de> for RawStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RawStatus::from_api(&raw))
    }
}

impl Serialize for RawStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Status-dependent attributes, populated only for certain raw statuses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusExtra {
    /// Error description, present when the raw status is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Extraction progress percentage as a decimal string, present when
    /// the raw status is `extracting`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unzip_progress: Option<String>,
}

/// Additional task detail reported alongside the base record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Remote-relative output path (no leading separator)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Original magnet URI or source filename stem; only populated for
    /// tasks submitted recently enough for the remote to retain it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Transfer counters as raw decimal strings
///
/// The remote occasionally reports these missing or non-numeric; parsing
/// happens in [`crate::progress`] with safe defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTransfer {
    /// Bytes downloaded so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_downloaded: Option<String>,

    /// Current download speed in bytes per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_download: Option<String>,
}

/// The remote service's view of one job
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteTask {
    /// Stable opaque identifier, assigned asynchronously after submission
    pub id: String,

    /// Task title as shown by the remote UI
    pub title: String,

    /// Task kind; everything except BT is filtered out upstream
    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// Total payload size in bytes
    #[serde(default)]
    pub size: u64,

    /// Raw remote state
    pub status: RawStatus,

    /// Status-dependent attributes (extraction progress, error detail)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_extra: Option<StatusExtra>,

    /// Destination and submission-origin detail
    #[serde(default)]
    pub detail: TaskDetail,

    /// Transfer counters
    #[serde(default)]
    pub transfer: TaskTransfer,
}

impl RemoteTask {
    /// Decode a remote listing payload (a JSON array of task records)
    ///
    /// Convenience for transport implementations. Unknown task types and
    /// statuses decode to their `Unrecognized` variants; only structurally
    /// invalid JSON fails, as [`Error::Serialization`].
    pub fn decode_listing(payload: &str) -> Result<Vec<RemoteTask>> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Uniform download status exposed to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Queued and waiting to start
    Queued,
    /// Currently downloading
    Downloading,
    /// Paused
    Paused,
    /// Successfully completed
    Completed,
    /// Failed with error
    Failed,
}

impl DownloadStatus {
    /// True for Completed and Failed, the only statuses with an output path
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Failed)
    }
}

/// Composite download identifier: `<salt>:<remote task id>`
///
/// The salt is a stable per-device serial so ids from multiple physical
/// devices never collide. The salt must not contain `:`; the remote task id
/// (everything after the first separator) round-trips exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DownloadId {
    /// Per-client-instance salt (hashed device serial)
    pub salt: String,
    /// Remote task id
    pub task_id: String,
}

impl DownloadId {
    /// Create a composite id from a salt and a remote task id
    pub fn new(salt: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            task_id: task_id.into(),
        }
    }
}

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.salt, self.task_id)
    }
}

impl std::str::FromStr for DownloadId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((salt, task_id)) if !salt.is_empty() && !task_id.is_empty() => {
                Ok(Self::new(salt, task_id))
            }
            _ => Err(Error::InvalidDownloadId(s.to_string())),
        }
    }
}

impl Serialize for DownloadId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DownloadId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// The host's normalized view of one remote task
///
/// Recomputed fresh on every listing call; never cached or mutated in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadItem {
    /// Composite identifier, reversible back to the remote task id
    pub download_id: DownloadId,

    /// Task title
    pub title: String,

    /// Total payload size in bytes
    pub total_size: u64,

    /// Bytes not yet downloaded, clamped to `[0, total_size]`
    pub remaining_size: u64,

    /// Estimated time to completion; absent when speed is zero or unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<Duration>,

    /// Uniform status
    pub status: DownloadStatus,

    /// Human-readable status message (extraction progress or error detail)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether output files may safely be moved already
    ///
    /// May be true before [`DownloadItem::status`] reaches Completed: files
    /// are movable slightly before the remote updates its own state.
    pub can_move_files: bool,

    /// Whether the task may be removed from the remote service
    pub can_be_removed: bool,

    /// Host-usable absolute output path, set only for terminal statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

/// Supported remote task-API version range, as reported by the remote
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBounds {
    /// Lowest supported protocol version
    pub min: u32,
    /// Highest supported protocol version
    pub max: u32,
}

/// Existence and type info for a remote path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePathInfo {
    /// Whether the path exists on the remote filesystem
    pub exists: bool,
    /// Whether the path is a directory
    pub is_directory: bool,
}

/// Result of the adapter's `status()` call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdapterStatus {
    /// Whether the configured host is a loopback address
    pub is_localhost: bool,
    /// Root output folder(s), remapped to locally reachable paths
    pub output_root_folders: Vec<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_round_trips() {
        let id = DownloadId::new("a1b2c3", "dbid_042");
        let parsed: DownloadId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.task_id, "dbid_042");
    }

    #[test]
    fn composite_id_preserves_colons_in_task_id() {
        let parsed: DownloadId = "serial:odd:task:id".parse().unwrap();
        assert_eq!(parsed.salt, "serial");
        assert_eq!(parsed.task_id, "odd:task:id");
    }

    #[test]
    fn composite_id_rejects_missing_separator() {
        assert!("justataskid".parse::<DownloadId>().is_err());
        assert!(":task".parse::<DownloadId>().is_err());
        assert!("salt:".parse::<DownloadId>().is_err());
    }

    #[test]
    fn task_type_decodes_case_insensitively() {
        assert_eq!(TaskType::from_api("BT"), TaskType::Bt);
        assert_eq!(
            TaskType::from_api("emule"),
            TaskType::Unrecognized("emule".to_string())
        );
    }

    #[test]
    fn raw_status_unknown_value_is_preserved() {
        let status = RawStatus::from_api("quantum_tunneling");
        assert_eq!(
            status,
            RawStatus::Unrecognized("quantum_tunneling".to_string())
        );
        assert_eq!(status.as_str(), "quantum_tunneling");
    }

    #[test]
    fn decode_listing_parses_a_full_payload() {
        let tasks = RemoteTask::decode_listing(
            r#"[
                {"id":"dbid_001","title":"Show","type":"bt","size":1000,
                 "status":"seeding","transfer":{"size_downloaded":"1000"}},
                {"id":"dbid_002","title":"Odd","type":"bt","size":0,
                 "status":"never_heard_of_it"}
            ]"#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, RawStatus::Seeding);
        assert_eq!(
            tasks[1].status,
            RawStatus::Unrecognized("never_heard_of_it".to_string())
        );
    }

    #[test]
    fn decode_listing_reports_invalid_json_as_a_serialization_error() {
        let result = RemoteTask::decode_listing("{not even close");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn remote_task_decodes_with_missing_optional_sections() {
        let task: RemoteTask = serde_json::from_str(
            r#"{"id":"dbid_001","title":"Show","type":"bt","size":1000,"status":"downloading"}"#,
        )
        .unwrap();
        assert_eq!(task.task_type, TaskType::Bt);
        assert!(task.status_extra.is_none());
        assert!(task.transfer.size_downloaded.is_none());
    }
}
