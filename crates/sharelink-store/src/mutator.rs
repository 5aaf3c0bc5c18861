//! Optimistic permission-list mutation.
//!
//! The store offers no compare-and-swap and no transactions, so every
//! mutation is a three-phase protocol per record:
//!
//! 1. **Compute** the new list from the record's currently known list and
//!    serialize both to the exact compact array text the store uses.
//! 2. **Patch** via `UPDATE ... SET data = replace(data, '"<field>":<old>',
//!    '"<field>":<new>') WHERE rowid=<n>`, touching only the labeled
//!    substring. Correct only while that substring is unique within the
//!    row's blob.
//! 3. **Verify** by re-reading the row's blob and checking the labeled new
//!    text is present. A mismatch is reported, never raised.
//!
//! Records in a batch are independent: one failure never blocks the rest.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use sharelink_entity::{
    IdentityKind, MutationOutcome, RecordMutation, ShareRecord, permission_array_text,
};
use sharelink_remote::{RemoteExecutor, elevated};

use crate::query;
use crate::repository::EntryRepository;

/// Applies permission-list changes to batches of records.
#[derive(Clone)]
pub struct PermissionMutator {
    executor: Arc<dyn RemoteExecutor>,
    repository: EntryRepository,
    db_path: String,
}

impl PermissionMutator {
    /// Create a mutator over the given executor and remote db path.
    pub fn new(executor: Arc<dyn RemoteExecutor>, db_path: impl Into<String>) -> Self {
        let db_path = db_path.into();
        Self {
            repository: EntryRepository::new(executor.clone(), db_path.clone()),
            executor,
            db_path,
        }
    }

    /// Append one identity to each record's list, skipping records that
    /// already contain it.
    pub async fn add_identity(
        &self,
        records: &[ShareRecord],
        kind: IdentityKind,
        id: i64,
    ) -> Vec<RecordMutation> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let current = record.permission_ids(kind);
            let outcome = if current.contains(&id) {
                info!(
                    row_id = record.row_id,
                    %kind,
                    id,
                    "Skipping: record already contains identity"
                );
                MutationOutcome::Skipped
            } else {
                let mut new_ids = current.to_vec();
                new_ids.push(id);
                self.apply_patch(record.row_id, kind, current, &new_ids)
                    .await
            };
            results.push(RecordMutation {
                row_id: record.row_id,
                outcome,
            });
        }
        results
    }

    /// Remove every identity whose string form is in `ids` from each
    /// record's list. Records whose list is unchanged are skipped without
    /// a remote write.
    pub async fn remove_identities(
        &self,
        records: &[ShareRecord],
        kind: IdentityKind,
        ids: &HashSet<String>,
    ) -> Vec<RecordMutation> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let current = record.permission_ids(kind);
            let new_ids: Vec<i64> = current
                .iter()
                .copied()
                .filter(|member| !ids.contains(&member.to_string()))
                .collect();

            let outcome = if new_ids.len() == current.len() {
                info!(
                    row_id = record.row_id,
                    %kind,
                    "Skipping: record contains none of the specified identities"
                );
                MutationOutcome::Skipped
            } else {
                self.apply_patch(record.row_id, kind, current, &new_ids)
                    .await
            };
            results.push(RecordMutation {
                row_id: record.row_id,
                outcome,
            });
        }
        results
    }

    /// Clear each record's list of the given kind. Already-empty lists are
    /// skipped without a remote write.
    pub async fn remove_all(
        &self,
        records: &[ShareRecord],
        kind: IdentityKind,
    ) -> Vec<RecordMutation> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let current = record.permission_ids(kind);
            let outcome = if current.is_empty() {
                info!(
                    row_id = record.row_id,
                    %kind,
                    "Skipping: record has no identities to remove"
                );
                MutationOutcome::Skipped
            } else {
                self.apply_patch(record.row_id, kind, current, &[]).await
            };
            results.push(RecordMutation {
                row_id: record.row_id,
                outcome,
            });
        }
        results
    }

    /// Patch and verify one record's permission array.
    async fn apply_patch(
        &self,
        row_id: i64,
        kind: IdentityKind,
        old_ids: &[i64],
        new_ids: &[i64],
    ) -> MutationOutcome {
        let field = kind.field_label();
        let old_text = permission_array_text(old_ids);
        let new_text = permission_array_text(new_ids);

        let command = elevated(&query::update_permission_array(
            &self.db_path,
            row_id,
            field,
            &old_text,
            &new_text,
        ));

        info!(row_id, field, %old_text, %new_text, "Patching permission array");
        if let Err(e) = self.executor.execute(&command).await {
            error!(row_id, field, error = %e, "Permission patch failed");
            return MutationOutcome::Failed(e.message);
        }

        let blob = match self.repository.fetch_raw_data(row_id).await {
            Ok(blob) => blob,
            Err(e) => {
                error!(row_id, field, error = %e, "Verification read failed");
                return MutationOutcome::Failed(e.message);
            }
        };

        // The bare array text (e.g. "[]") would match almost any blob, so
        // verify the labeled substring the patch targeted.
        if blob.contains(&format!("\"{field}\":{new_text}")) {
            info!(row_id, field, %new_text, "Permission update verified");
            MutationOutcome::Applied
        } else {
            warn!(
                row_id,
                field,
                %new_text,
                "Permission update could not be verified; store may not have applied it"
            );
            MutationOutcome::MismatchWarning
        }
    }
}
