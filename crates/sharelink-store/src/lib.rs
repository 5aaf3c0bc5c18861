//! # sharelink-store
//!
//! Access to the remote sharing store: the fixed query surface, the
//! row-tolerant fetch parser, and the optimistic compute/patch/verify
//! permission mutator.

pub mod mutator;
pub mod query;
pub mod repository;

pub use mutator::PermissionMutator;
pub use repository::EntryRepository;
