//! Search shared links by path substring.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sharelink_core::error::AppError;
use sharelink_entity::IdentityKind;

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Path substring to match, case-insensitively
    pub term: String,

    /// Resolve identity ids to display names (slower: one remote read per
    /// uncached id)
    #[arg(long)]
    pub resolve_names: bool,
}

/// Record display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    /// Row key
    rowid: i64,
    /// Share name
    name: String,
    /// Shared path
    path: String,
    /// Group permission list
    groups: String,
    /// User permission list
    users: String,
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut session = super::build_session(config_path)?;
    session.filter(&args.term).await?;

    let mut rows = Vec::new();
    for record in session.records().to_vec() {
        let (groups, users) = if args.resolve_names {
            (
                session
                    .resolve_names(&record, IdentityKind::Group)
                    .await
                    .join(" || "),
                session
                    .resolve_names(&record, IdentityKind::User)
                    .await
                    .join(" || "),
            )
        } else {
            (
                format_ids(&record.protect_gids),
                format_ids(&record.protect_uids),
            )
        };
        rows.push(RecordRow {
            rowid: record.row_id,
            name: record.name.clone(),
            path: record.path.clone(),
            groups,
            users,
        });
    }

    output::print_list(&rows, format);
    if session.skipped_rows() > 0 {
        output::print_warning(&format!(
            "{} unparseable row(s) were skipped",
            session.skipped_rows()
        ));
    }
    Ok(())
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
