//! Case-insensitive release search

use crate::models::release::ReleaseRecord;

/// Whether `record` should be visible for `query`.
///
/// Matches a substring of the name, the owning team, or the status wire name
/// such as `pending_install`. An empty query matches everything.
pub fn matches(record: &ReleaseRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    [
        record.name.as_str(),
        record.owner.team.as_str(),
        record.deployment_status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching `query`, in their original order
pub fn filter<'a>(records: &'a [ReleaseRecord], query: &str) -> Vec<&'a ReleaseRecord> {
    records.iter().filter(|r| matches(r, query)).collect()
}
