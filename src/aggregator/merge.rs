//! Merge-sort-dedup stage: global ordering and duplicate removal for the
//! records the collector accumulated.

use crate::types::Status;

/// Sort by id descending, drop duplicate ids, cap at `desired_count`.
///
/// Records arrive unordered across workers; sorting first guarantees that
/// duplicates of the same id are adjacent, so a single dedup pass removes
/// them all. Precondition: `id` is the sole deduplication identity; if the
/// service ever reused an id for a distinct logical record, the extra record
/// would be removed here.
///
/// The stage is a fixed point: applying it to its own output changes nothing.
pub(crate) fn merge_sort_dedup(mut records: Vec<Status>, desired_count: usize) -> Vec<Status> {
    records.sort_unstable_by(|a, b| b.id.cmp(&a.id));
    records.dedup_by_key(|s| s.id);
    records.truncate(desired_count);
    records
}
