//! Output formatting for CLI commands: record tables, detail views, and
//! per-record mutation outcome lines.

use serde::Serialize;
use tabled::{Table, Tabled};

use sharelink_entity::{MutationOutcome, RecordMutation};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Table
    }
}

/// Print a list of records in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No matching records.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(items) {
            Ok(json) => println!("{json}"),
            Err(_) => println!("[]"),
        },
    }
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print one field of a record detail view
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<8} {}", format!("{}:", key), value);
}

/// Print one line per record of a mutation batch. Failures go to stderr,
/// everything else to stdout.
pub fn print_outcomes(results: &[RecordMutation], action: &str) {
    for result in results {
        let line = outcome_line(result, action);
        if matches!(result.outcome, MutationOutcome::Failed(_)) {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

fn outcome_line(result: &RecordMutation, action: &str) -> String {
    match &result.outcome {
        MutationOutcome::Applied => format!("✓ rowid {}: {action}", result.row_id),
        MutationOutcome::Skipped => format!("⚠ rowid {}: no change needed", result.row_id),
        MutationOutcome::MismatchWarning => format!(
            "⚠ rowid {}: write issued but verification did not match; re-check the record",
            result.row_id
        ),
        MutationOutcome::Failed(detail) => format!("✗ rowid {}: {detail}", result.row_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutation(row_id: i64, outcome: MutationOutcome) -> RecordMutation {
        RecordMutation { row_id, outcome }
    }

    #[test]
    fn applied_line_carries_the_action() {
        let line = outcome_line(&mutation(12, MutationOutcome::Applied), "granted group 500");
        assert_eq!(line, "✓ rowid 12: granted group 500");
    }

    #[test]
    fn failed_line_carries_the_remote_detail() {
        let line = outcome_line(
            &mutation(15, MutationOutcome::Failed("remote command failed".to_string())),
            "granted group 500",
        );
        assert_eq!(line, "✗ rowid 15: remote command failed");
    }

    #[test]
    fn skip_and_mismatch_are_warnings() {
        let skip = outcome_line(&mutation(7, MutationOutcome::Skipped), "x");
        assert!(skip.starts_with("⚠ rowid 7: no change needed"));
        let mismatch = outcome_line(&mutation(7, MutationOutcome::MismatchWarning), "x");
        assert!(mismatch.contains("verification did not match"));
    }
}
