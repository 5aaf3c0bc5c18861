//! The fixed remote query surface.
//!
//! Every store access is a `sqlite3` invocation over the remote shell,
//! parameterized only by row key and array literal contents. The update
//! escapes the inner double quotes for the remote shell's outer quoting.

/// Lines starting with this prefix are elevation-prompt noise, not data.
pub const PROMPT_PREFIX: &str = "Password";

/// Fetch every row key and data blob.
pub fn fetch_all(db_path: &str) -> String {
    format!("sqlite3 {db_path} \"SELECT rowid, data FROM entry;\"")
}

/// Fetch one row's owner uid.
pub fn fetch_owner_uid(db_path: &str, row_id: i64) -> String {
    format!("sqlite3 {db_path} \"SELECT owner_uid FROM entry WHERE rowid={row_id};\"")
}

/// Fetch one full pipe-delimited row; the public-url token is the second
/// field.
pub fn fetch_row(db_path: &str, row_id: i64) -> String {
    format!("sqlite3 {db_path} \"SELECT * FROM entry WHERE rowid={row_id};\"")
}

/// Fetch one row's raw data blob, used by the verify phase.
pub fn fetch_data(db_path: &str, row_id: i64) -> String {
    format!("sqlite3 {db_path} \"SELECT data FROM entry WHERE rowid={row_id};\"")
}

/// Patch one labeled permission array inside a row's blob by literal text
/// substitution, leaving the rest of the blob untouched.
pub fn update_permission_array(
    db_path: &str,
    row_id: i64,
    field_label: &str,
    old_array: &str,
    new_array: &str,
) -> String {
    format!(
        "sqlite3 {db_path} \"UPDATE entry SET data = replace(data, \
         '\\\"{field_label}\\\":{old_array}', '\\\"{field_label}\\\":{new_array}') \
         WHERE rowid={row_id};\""
    )
}
