//! Remote path helpers: listing filters and separator normalization
//!
//! The remote filesystem may present either separator, so every comparison
//! here works on path segments split on both `/` and `\`.

/// Split a remote path into its non-empty segments
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|segment| !segment.is_empty())
}

/// Whether `destination` equals or is nested under `directory`
///
/// Both sides are remote-relative paths; leading and trailing separators are
/// immaterial.
pub fn is_within(directory: &str, destination: &str) -> bool {
    let wanted: Vec<&str> = segments(directory).collect();
    let actual: Vec<&str> = segments(destination).collect();
    actual.len() >= wanted.len() && actual[..wanted.len()] == wanted[..]
}

/// Whether `category` appears as an exact path segment of `destination`
pub fn has_category_segment(destination: &str, category: &str) -> bool {
    segments(destination).any(|segment| segment == category)
}

/// Listing filter: keep a task destination under the configured directory,
/// or carrying the configured category as a path segment
///
/// A task without a destination cannot satisfy either criterion. With
/// neither configured, every task passes (host-level category handling may
/// still apply elsewhere).
pub fn accepts(
    destination: Option<&str>,
    directory: Option<&str>,
    category: Option<&str>,
) -> bool {
    match (directory, category) {
        (Some(dir), _) => destination.is_some_and(|dest| is_within(dir, dest)),
        (None, Some(cat)) => destination.is_some_and(|dest| has_category_segment(dest, cat)),
        (None, None) => true,
    }
}

/// The shared-folder name a remote-relative path is anchored in
///
/// Remote paths are relative to a named top-level volume; this is its name.
pub fn shared_folder(path: &str) -> Option<&str> {
    segments(path).next()
}

/// Rebuild a remote path as `/`-separated segments with no empties
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Append a category subfolder to the remote default destination
pub fn join_category(default_destination: &str, category: &str) -> String {
    format!(
        "{}/{}",
        default_destination.trim_end_matches(['/', '\\']),
        category.trim_matches(['/', '\\'])
    )
}
