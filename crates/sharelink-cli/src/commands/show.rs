//! Show full details of one record, including owner and shareable link.

use clap::Args;

use crate::output::{self, OutputFormat};
use sharelink_core::error::AppError;

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Row key of the record
    pub rowid: i64,

    /// Path substring used to load the record set
    #[arg(long)]
    pub term: String,
}

/// Execute the show command
pub async fn execute(
    args: &ShowArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut session = super::build_session(config_path)?;
    session.filter(&args.term).await?;

    let details = session.record_details(args.rowid).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&details)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            output::print_kv("RowID", &details.record.row_id.to_string());
            output::print_kv("Name", &details.record.name);
            output::print_kv("Path", &details.record.path);
            output::print_kv("Owner", details.owner.as_deref().unwrap_or("N/A"));
            output::print_kv("Link", details.link.as_deref().unwrap_or("N/A"));
            output::print_kv(
                "Groups",
                &join_or_none(&details.group_names, "no groups"),
            );
            output::print_kv("Users", &join_or_none(&details.user_names, "no users"));
        }
    }
    Ok(())
}

fn join_or_none(names: &[String], empty: &str) -> String {
    if names.is_empty() {
        empty.to_string()
    } else {
        names.join(" || ")
    }
}
