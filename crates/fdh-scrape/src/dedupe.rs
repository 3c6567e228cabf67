//! Identity-based deduplication
//!
//! Stable, first-occurrence-wins by `id`. Records with an empty-string `id`
//! all carry the same key `""`, so only the first of them survives. This is
//! a documented consequence of upstream extraction failures, kept as-is
//! rather than special-cased.

use crate::records::ProfileRecord;
use std::collections::HashSet;

/// Collapse a record collection to unique identities, preserving input order.
pub fn dedupe(records: Vec<ProfileRecord>) -> Vec<ProfileRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
