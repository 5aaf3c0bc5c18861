//! Revoke user or group access from selected records.

use std::collections::HashSet;

use clap::Args;
use dialoguer::Confirm;

use super::KindArg;
use crate::output;
use sharelink_core::error::AppError;
use sharelink_entity::IdentityKind;

/// Arguments for the revoke command
#[derive(Debug, Args)]
pub struct RevokeArgs {
    /// Path substring used to load the record set
    #[arg(long)]
    pub term: String,

    /// Row keys of the records to modify
    #[arg(long, required = true, num_args = 1..)]
    pub rows: Vec<i64>,

    /// Identity kind to revoke
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Numeric ids of the identities to remove
    #[arg(long, num_args = 1.., conflicts_with = "all")]
    pub ids: Vec<String>,

    /// Remove every identity of the given kind
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt for --all
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the revoke command
pub async fn execute(args: &RevokeArgs, config_path: &str) -> Result<(), AppError> {
    if !args.all && args.ids.is_empty() {
        return Err(AppError::validation("pass --ids or --all"));
    }

    let mut session = super::build_session(config_path)?;
    session.filter(&args.term).await?;

    let selected = session.select(&args.rows);
    if selected == 0 {
        return Err(AppError::validation(
            "none of the requested rows matched the loaded record set",
        ));
    }
    if selected < args.rows.len() {
        output::print_warning(&format!(
            "{} of {} requested rows matched the loaded record set",
            selected,
            args.rows.len()
        ));
    }

    let kind = IdentityKind::from(args.kind);
    let results = if args.all {
        if !args.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Remove ALL {kind}s from {selected} record(s)? This cannot be undone"
                ))
                .default(false)
                .interact()
                .map_err(|e| AppError::validation(format!("confirmation aborted: {e}")))?;
            if !confirmed {
                output::print_warning("aborted, no changes made");
                return Ok(());
            }
        }
        session.revoke_all(kind).await?
    } else {
        let ids: HashSet<String> = args.ids.iter().cloned().collect();
        session.revoke(kind, &ids).await?
    };

    let action = if args.all {
        format!("removed all {kind}s")
    } else {
        format!("revoked {kind} access")
    };
    output::print_outcomes(&results, &action);
    Ok(())
}
