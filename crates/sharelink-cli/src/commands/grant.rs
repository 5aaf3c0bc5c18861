//! Grant a user or group access to selected records.

use clap::Args;
use dialoguer::Select;

use super::KindArg;
use crate::output;
use sharelink_core::error::AppError;
use sharelink_engine::SharingSession;
use sharelink_entity::IdentityKind;

/// Arguments for the grant command
#[derive(Debug, Args)]
pub struct GrantArgs {
    /// Path substring used to load the record set
    #[arg(long)]
    pub term: String,

    /// Row keys of the records to modify
    #[arg(long, required = true, num_args = 1..)]
    pub rows: Vec<i64>,

    /// Identity kind to grant
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Numeric id or name fragment of the identity
    #[arg(long)]
    pub identity: String,
}

/// Execute the grant command
pub async fn execute(args: &GrantArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::build_session(config_path)?;
    session.filter(&args.term).await?;

    let selected = session.select(&args.rows);
    if selected < args.rows.len() {
        output::print_warning(&format!(
            "{} of {} requested rows matched the loaded record set",
            selected,
            args.rows.len()
        ));
    }

    let kind = IdentityKind::from(args.kind);
    let id = resolve_identity_id(&session, kind, &args.identity).await?;

    let results = session.grant(kind, id).await?;
    output::print_outcomes(&results, &format!("granted {kind} {id}"));
    Ok(())
}

/// Resolve the identity argument to a numeric id: numeric input is used
/// as-is, anything else goes through a name-fragment search.
async fn resolve_identity_id(
    session: &SharingSession,
    kind: IdentityKind,
    input: &str,
) -> Result<i64, AppError> {
    if let Ok(id) = input.parse::<i64>() {
        return Ok(id);
    }

    let matches = session.search_identities(kind, input).await?;
    let chosen = match matches.len() {
        0 => {
            return Err(AppError::not_found(format!(
                "no {kind} matching '{input}'"
            )));
        }
        1 => &matches[0],
        _ => {
            let labels: Vec<String> = matches
                .iter()
                .map(|identity| format!("{} (ID: {})", identity.display_name, identity.id))
                .collect();
            let index = Select::new()
                .with_prompt(format!("Multiple {kind}s match '{input}', pick one"))
                .items(&labels)
                .default(0)
                .interact()
                .map_err(|e| AppError::validation(format!("selection aborted: {e}")))?;
            &matches[index]
        }
    };

    chosen.id.parse::<i64>().map_err(|_| {
        AppError::validation(format!("identity id '{}' is not numeric", chosen.id))
    })
}
