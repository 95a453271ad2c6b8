//! Progress derivation from raw, occasionally malformed, transfer counters
//!
//! The remote reports counters as decimal strings and sometimes omits or
//! garbles them. A counter that fails to parse is treated as 0 with a
//! diagnostic; it never fails the listing.

use std::time::Duration;

use crate::types::RemoteTask;

/// Parse a counter string as a non-negative integer, defaulting to 0
///
/// Missing and unparsable values both collapse to 0 so one bad task cannot
/// abort a whole listing.
fn parse_counter(task_id: &str, name: &str, raw: Option<&str>) -> u64 {
    match raw {
        None => 0,
        Some(value) => match value.parse::<u64>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::debug!(
                    task_id = %task_id,
                    counter = name,
                    value = %value,
                    "ignoring malformed transfer counter"
                );
                0
            }
        },
    }
}

/// Bytes still to download, clamped to `[0, task.size]`
pub fn remaining_size(task: &RemoteTask) -> u64 {
    let downloaded = parse_counter(
        &task.id,
        "size_downloaded",
        task.transfer.size_downloaded.as_deref(),
    );
    task.size.saturating_sub(downloaded)
}

/// Estimated time to completion at the current download speed
///
/// Whole-second resolution. `None` when the speed counter is zero, missing
/// or malformed, since a time estimate is meaningless without a rate.
pub fn remaining_time(task: &RemoteTask) -> Option<Duration> {
    let speed = parse_counter(
        &task.id,
        "speed_download",
        task.transfer.speed_download.as_deref(),
    );
    if speed == 0 {
        return None;
    }
    Some(Duration::from_secs(remaining_size(task) / speed))
}
