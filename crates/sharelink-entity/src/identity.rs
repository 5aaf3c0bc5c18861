//! Identity reference entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two identity kinds the sharing store protects links with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    /// A user account (uid).
    User,
    /// A group (gid).
    Group,
}

impl IdentityKind {
    /// Subdirectory of the account cache holding this kind's id files.
    pub fn cache_dir_name(&self) -> &'static str {
        match self {
            Self::User => "uid",
            Self::Group => "gid",
        }
    }

    /// The labeled field inside the sharing blob holding this kind's
    /// permission list.
    pub fn field_label(&self) -> &'static str {
        match self {
            Self::User => "protect_uids",
            Self::Group => "protect_gids",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// A resolved identity reference.
///
/// `id` is the string form of the numeric identifier; permission lists
/// store the same value as an integer, so comparisons between the two are
/// always string-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User or group.
    pub kind: IdentityKind,
    /// Numeric identifier, in string form.
    pub id: String,
    /// Human-readable account name.
    pub display_name: String,
}
