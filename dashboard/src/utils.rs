//! Utility functions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version information for the dashboard core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Longest release name helm accepts
pub const RELEASE_NAME_MAX_LEN: usize = 53;

/// Check a release name against the backend's release-name grammar.
///
/// At most 53 bytes, alphanumeric at both ends, `-`, `_` and `.` allowed in
/// between.
pub fn is_valid_release_name(name: &str) -> bool {
    if name.len() > RELEASE_NAME_MAX_LEN {
        return false;
    }
    let bytes = name.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        }
        _ => false,
    }
}

/// Human readable age of a timestamp, e.g. "5 min ago"
pub fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).num_seconds();
    if secs < 60 {
        // Clock skew can put `since` slightly in the future
        return "just now".to_string();
    }

    let mins = secs / 60;
    if mins < 60 {
        return format!("{} min ago", mins);
    }

    let hours = mins / 60;
    if hours < 24 {
        return format!("{} h ago", hours);
    }

    let days = hours / 24;
    if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{} days ago", days)
    }
}
