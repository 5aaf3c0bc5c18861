//! Share record entity model.

use serde::{Deserialize, Serialize};

use crate::identity::IdentityKind;

/// The nested private-data object inside a sharing-store blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrivateData {
    /// Display name of the shared file or folder.
    #[serde(default)]
    pub name: String,
    /// Filesystem path of the shared file or folder.
    #[serde(default)]
    pub path: String,
}

/// The JSON blob stored in the `data` column of the sharing store.
///
/// Only the fields this engine reads are modeled; everything else in the
/// blob is ignored on deserialization and never rewritten except through
/// the labeled-substring patch in the mutator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryData {
    /// Nested name/path structure. Absent in some rows.
    #[serde(default)]
    pub private_data: PrivateData,
    /// Group ids allowed to see the link, in stored order.
    #[serde(default)]
    pub protect_gids: Vec<i64>,
    /// User ids allowed to see the link, in stored order.
    #[serde(default)]
    pub protect_uids: Vec<i64>,
}

/// A permission record from the remote sharing store.
///
/// Instances are recreated on every fetch; `row_id` is the only stable
/// identity and the correlation key across re-fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRecord {
    /// Stable row key assigned by the store (`rowid`).
    pub row_id: i64,
    /// Display name, empty when absent from the blob.
    pub name: String,
    /// Filesystem path, empty when absent from the blob.
    pub path: String,
    /// Group permission list, exactly as stored.
    pub protect_gids: Vec<i64>,
    /// User permission list, exactly as stored.
    pub protect_uids: Vec<i64>,
}

impl ShareRecord {
    /// Build a record from a row key and its parsed data blob.
    pub fn new(row_id: i64, data: EntryData) -> Self {
        Self {
            row_id,
            name: data.private_data.name,
            path: data.private_data.path,
            protect_gids: data.protect_gids,
            protect_uids: data.protect_uids,
        }
    }

    /// The permission list for one identity kind.
    pub fn permission_ids(&self, kind: IdentityKind) -> &[i64] {
        match kind {
            IdentityKind::Group => &self.protect_gids,
            IdentityKind::User => &self.protect_uids,
        }
    }
}

/// Serialize a permission list to the exact compact JSON array text the
/// store uses: comma separator, no whitespace.
///
/// Mutation is a literal substring replacement, so this text must match
/// the stored serialization byte for byte.
pub fn permission_array_text(ids: &[i64]) -> String {
    let body = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{body}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_text_is_compact() {
        assert_eq!(permission_array_text(&[101, 102]), "[101,102]");
        assert_eq!(permission_array_text(&[7]), "[7]");
        assert_eq!(permission_array_text(&[]), "[]");
    }

    #[test]
    fn entry_data_tolerates_missing_private_data() {
        let data: EntryData =
            serde_json::from_str(r#"{"protect_gids":[1,2],"protect_uids":[]}"#).unwrap();
        let record = ShareRecord::new(9, data);
        assert_eq!(record.name, "");
        assert_eq!(record.path, "");
        assert_eq!(record.protect_gids, vec![1, 2]);
    }

    #[test]
    fn entry_data_ignores_unknown_fields() {
        let data: EntryData = serde_json::from_str(
            r#"{"private_data":{"name":"Q1","path":"/volume1/Reports/Q1","owner":"x"},
                "protect_gids":[101],"protect_uids":[3],"url":"abc","expire":0}"#,
        )
        .unwrap();
        let record = ShareRecord::new(4, data);
        assert_eq!(record.name, "Q1");
        assert_eq!(record.permission_ids(IdentityKind::User), &[3]);
    }
}
