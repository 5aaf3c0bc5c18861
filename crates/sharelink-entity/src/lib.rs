//! # sharelink-entity
//!
//! Domain entity models for ShareLink. Every struct in this crate
//! represents a sharing-store row, an identity reference, or an operation
//! result value object. All entities derive `Debug`, `Clone`, `Serialize`,
//! and `Deserialize`.

pub mod identity;
pub mod outcome;
pub mod record;

pub use identity::{Identity, IdentityKind};
pub use outcome::{FetchOutcome, MutationOutcome, RecordMutation};
pub use record::{EntryData, ShareRecord, permission_array_text};
