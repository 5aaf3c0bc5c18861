//! # sharelink-engine
//!
//! The synchronization facade: drives the repository for reads, the
//! identity resolver for display names, and the permission mutator for
//! writes, re-fetching after every write batch so the store stays the
//! single source of truth.

pub mod session;

pub use session::{RecordDetails, SharingSession};
