//! Sharing-store repository: fetch and parse permission records.

use std::sync::Arc;

use tracing::{debug, info, warn};

use sharelink_core::AppResult;
use sharelink_entity::{EntryData, FetchOutcome, ShareRecord};
use sharelink_remote::{RemoteExecutor, elevated};

use crate::query;

/// Reads permission records and per-row details from the remote store.
#[derive(Clone)]
pub struct EntryRepository {
    executor: Arc<dyn RemoteExecutor>,
    db_path: String,
}

impl EntryRepository {
    /// Create a repository over the given executor and remote db path.
    pub fn new(executor: Arc<dyn RemoteExecutor>, db_path: impl Into<String>) -> Self {
        Self {
            executor,
            db_path: db_path.into(),
        }
    }

    /// Fetch every permission record.
    ///
    /// Each output line is parsed independently; a line that fails to
    /// split or parse is dropped and counted, never aborting the fetch.
    /// An executor failure propagates.
    pub async fn fetch_all(&self) -> AppResult<FetchOutcome> {
        let command = elevated(&query::fetch_all(&self.db_path));
        let output = self.executor.execute(&command).await?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in output.stdout.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_entry_line(line) {
                Some(record) => records.push(record),
                None => {
                    debug!(line, "Dropping unparseable entry row");
                    skipped += 1;
                }
            }
        }

        info!(
            parsed = records.len(),
            skipped, "Fetched sharing entries"
        );
        Ok(FetchOutcome { records, skipped })
    }

    /// Fetch one record's owner uid.
    ///
    /// Executor failures are caught and converted to `None` (logged, not
    /// fatal). Prompt-noise lines are skipped; the last qualifying line
    /// wins.
    pub async fn fetch_owner_uid(&self, row_id: i64) -> Option<String> {
        let command = elevated(&query::fetch_owner_uid(&self.db_path, row_id));
        let output = match self.executor.execute(&command).await {
            Ok(output) => output,
            Err(e) => {
                warn!(row_id, error = %e, "Owner uid lookup failed");
                return None;
            }
        };
        last_qualifying_line(&output.stdout).map(str::to_string)
    }

    /// Fetch one record's public-url token, the second pipe-delimited
    /// field of the raw row. Same caught-failure policy as the owner
    /// lookup.
    pub async fn fetch_public_url(&self, row_id: i64) -> Option<String> {
        let command = elevated(&query::fetch_row(&self.db_path, row_id));
        let output = match self.executor.execute(&command).await {
            Ok(output) => output,
            Err(e) => {
                warn!(row_id, error = %e, "Public url lookup failed");
                return None;
            }
        };

        let line = last_qualifying_line(&output.stdout)?;
        let token = line.split('|').nth(1)?.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    /// Fetch one row's raw data blob. Used by the verify phase; errors
    /// propagate to the per-record boundary.
    pub async fn fetch_raw_data(&self, row_id: i64) -> AppResult<String> {
        let command = elevated(&query::fetch_data(&self.db_path, row_id));
        let output = self.executor.execute(&command).await?;
        Ok(output.stdout)
    }
}

/// Parse one `rowid|json` line into a record.
fn parse_entry_line(line: &str) -> Option<ShareRecord> {
    let (row_id, blob) = line.split_once('|')?;
    let row_id: i64 = row_id.trim().parse().ok()?;
    let data: EntryData = serde_json::from_str(blob).ok()?;
    Some(ShareRecord::new(row_id, data))
}

/// The last non-empty line that is not elevation-prompt noise.
fn last_qualifying_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with(query::PROMPT_PREFIX))
}
