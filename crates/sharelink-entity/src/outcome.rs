//! Operation result value objects.

use serde::{Deserialize, Serialize};

use crate::record::ShareRecord;

/// Result of a whole-store fetch.
///
/// Row-level parse failures never abort the fetch; they are dropped and
/// counted here so callers and tests can assert on the skip count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Successfully parsed records, in store order.
    pub records: Vec<ShareRecord>,
    /// Number of lines that failed to split or parse.
    pub skipped: usize,
}

/// Outcome of the compute/patch/verify protocol for one record.
///
/// A tri-state (plus caught remote failure) rather than a boolean, so
/// callers can distinguish "nothing to do" from "write may have failed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum MutationOutcome {
    /// The patch landed and the verify read contains the new array text.
    Applied,
    /// The change was a no-op; no remote write was issued.
    Skipped,
    /// The patch was issued but the verify read does not contain the new
    /// array text. Reported, never fatal; the store offers no stronger
    /// consistency guarantee.
    MismatchWarning,
    /// A remote call failed for this record. The batch continues with the
    /// next record.
    Failed(String),
}

/// Per-record result within a mutation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMutation {
    /// Row key of the mutated record.
    pub row_id: i64,
    /// What happened to it.
    pub outcome: MutationOutcome,
}
