//! One interactive session over the sharing store.
//!
//! State machine: `Idle` → `filter(term)` → `Loaded`; mutations are only
//! valid in `Loaded` and implicitly re-enter it through a fresh fetch.
//! Records are recreated on every fetch, so the selection is tracked by
//! row key and re-derived after each fetch, never by position.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use sharelink_core::{AppError, AppResult};
use sharelink_entity::{Identity, IdentityKind, RecordMutation, ShareRecord};
use sharelink_identity::IdentityResolver;
use sharelink_remote::RemoteExecutor;
use sharelink_store::{EntryRepository, PermissionMutator};

/// Session state: idle until the first filter, then a loaded record set.
#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Idle,
    Loaded {
        term: String,
        records: Vec<ShareRecord>,
        skipped: usize,
    },
}

/// Lazily resolved details of one record, for display.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDetails {
    /// The record itself.
    pub record: ShareRecord,
    /// Resolved owner display, when the owner uid could be fetched.
    pub owner: Option<String>,
    /// Full shareable link (base URL + stored token), when present.
    pub link: Option<String>,
    /// Resolved group names, aligned with `record.protect_gids`.
    pub group_names: Vec<String>,
    /// Resolved user names, aligned with `record.protect_uids`.
    pub user_names: Vec<String>,
}

/// Facade over one fetch → filter → resolve → mutate cycle.
pub struct SharingSession {
    repository: EntryRepository,
    mutator: PermissionMutator,
    resolver: Arc<IdentityResolver>,
    base_url: String,
    state: SessionState,
    selection: Vec<i64>,
}

impl SharingSession {
    /// Create a session over one executor and store location.
    pub fn new(
        executor: Arc<dyn RemoteExecutor>,
        resolver: Arc<IdentityResolver>,
        db_path: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let db_path = db_path.into();
        Self {
            repository: EntryRepository::new(executor.clone(), db_path.clone()),
            mutator: PermissionMutator::new(executor, db_path),
            resolver,
            base_url: base_url.into(),
            state: SessionState::Idle,
            selection: Vec::new(),
        }
    }

    /// Fetch the full record set and keep records whose path contains
    /// `term`, case-insensitively. Re-derives the selection by row key.
    pub async fn filter(&mut self, term: &str) -> AppResult<&[ShareRecord]> {
        let outcome = self.repository.fetch_all().await?;
        let needle = term.to_lowercase();
        let records: Vec<ShareRecord> = outcome
            .records
            .into_iter()
            .filter(|record| record.path.to_lowercase().contains(&needle))
            .collect();

        info!(
            term,
            found = records.len(),
            skipped = outcome.skipped,
            "Filtered sharing records"
        );

        let present: HashSet<i64> = records.iter().map(|r| r.row_id).collect();
        self.selection.retain(|row_id| present.contains(row_id));

        self.state = SessionState::Loaded {
            term: term.to_string(),
            records,
            skipped: outcome.skipped,
        };
        Ok(self.records())
    }

    /// The currently loaded records (empty while idle).
    pub fn records(&self) -> &[ShareRecord] {
        match &self.state {
            SessionState::Idle => &[],
            SessionState::Loaded { records, .. } => records,
        }
    }

    /// Rows dropped by the last fetch's row-level parse tolerance.
    pub fn skipped_rows(&self) -> usize {
        match &self.state {
            SessionState::Idle => 0,
            SessionState::Loaded { skipped, .. } => *skipped,
        }
    }

    /// Select records by row key. Unknown keys are ignored; returns the
    /// resulting selection size.
    pub fn select(&mut self, row_ids: &[i64]) -> usize {
        let present: HashSet<i64> = self.records().iter().map(|r| r.row_id).collect();
        self.selection = row_ids
            .iter()
            .copied()
            .filter(|row_id| present.contains(row_id))
            .collect();
        self.selection.len()
    }

    /// Row keys of the current selection.
    pub fn selection(&self) -> &[i64] {
        &self.selection
    }

    fn selected_records(&self) -> Vec<ShareRecord> {
        let selected: HashSet<i64> = self.selection.iter().copied().collect();
        self.records()
            .iter()
            .filter(|record| selected.contains(&record.row_id))
            .cloned()
            .collect()
    }

    fn require_selection(&self) -> AppResult<Vec<ShareRecord>> {
        if matches!(self.state, SessionState::Idle) {
            return Err(AppError::validation("no record set loaded; filter first"));
        }
        let records = self.selected_records();
        if records.is_empty() {
            return Err(AppError::validation("no records selected"));
        }
        Ok(records)
    }

    /// Re-fetch with the last filter term, restoring the selection by row
    /// key. The store is the single source of truth after any write.
    async fn refetch(&mut self) -> AppResult<()> {
        let term = match &self.state {
            SessionState::Loaded { term, .. } => term.clone(),
            SessionState::Idle => return Ok(()),
        };
        self.filter(&term).await?;
        Ok(())
    }

    /// Add one identity to every selected record.
    pub async fn grant(&mut self, kind: IdentityKind, id: i64) -> AppResult<Vec<RecordMutation>> {
        let batch = self.require_selection()?;
        let results = self.mutator.add_identity(&batch, kind, id).await;
        self.refetch().await?;
        Ok(results)
    }

    /// Remove a set of identities (by string id) from every selected
    /// record.
    pub async fn revoke(
        &mut self,
        kind: IdentityKind,
        ids: &HashSet<String>,
    ) -> AppResult<Vec<RecordMutation>> {
        let batch = self.require_selection()?;
        let results = self.mutator.remove_identities(&batch, kind, ids).await;
        self.refetch().await?;
        Ok(results)
    }

    /// Remove every identity of one kind from every selected record.
    pub async fn revoke_all(&mut self, kind: IdentityKind) -> AppResult<Vec<RecordMutation>> {
        let batch = self.require_selection()?;
        let results = self.mutator.remove_all(&batch, kind).await;
        self.refetch().await?;
        Ok(results)
    }

    /// Resolve a record's permission lists to display names, with a
    /// placeholder for unknown ids.
    pub async fn resolve_names(&self, record: &ShareRecord, kind: IdentityKind) -> Vec<String> {
        let mut names = Vec::with_capacity(record.permission_ids(kind).len());
        for id in record.permission_ids(kind) {
            let id = id.to_string();
            let name = match self.resolver.resolve_name(kind, &id).await {
                Some(name) => format!("{name} (ID: {id})"),
                None => format!("{id} (unknown)"),
            };
            names.push(name);
        }
        names
    }

    /// Full details of one loaded record, including the lazily fetched
    /// owner and shareable link.
    pub async fn record_details(&self, row_id: i64) -> AppResult<RecordDetails> {
        let record = self
            .records()
            .iter()
            .find(|record| record.row_id == row_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no loaded record with rowid {row_id}")))?;

        let owner = match self.repository.fetch_owner_uid(row_id).await {
            Some(uid) if uid.chars().all(|c| c.is_ascii_digit()) && !uid.is_empty() => {
                match self.resolver.resolve_name(IdentityKind::User, &uid).await {
                    Some(name) => Some(name),
                    None => Some(format!("UID: {uid} (unknown)")),
                }
            }
            Some(raw) => Some(format!("invalid owner value: {raw}")),
            None => None,
        };

        let link = self
            .repository
            .fetch_public_url(row_id)
            .await
            .map(|token| format!("{}{token}", self.base_url));

        let group_names = self.resolve_names(&record, IdentityKind::Group).await;
        let user_names = self.resolve_names(&record, IdentityKind::User).await;

        Ok(RecordDetails {
            record,
            owner,
            link,
            group_names,
            user_names,
        })
    }

    /// Search identities by name fragment (delegates to the resolver).
    pub async fn search_identities(
        &self,
        kind: IdentityKind,
        fragment: &str,
    ) -> AppResult<Vec<Identity>> {
        self.resolver.search_by_fragment(kind, fragment).await
    }

    /// Clear the identity caches. Valid in any state and does not change
    /// the state; the next resolve pass re-fetches from the remote host.
    pub fn invalidate_identity_cache(&self) {
        self.resolver.invalidate_all();
    }
}
