//! # sharelink-identity
//!
//! Resolution of opaque numeric identity ids to display names, backed by
//! the remote account-cache directory and a process-lifetime in-memory
//! cache.

pub mod resolver;

pub use resolver::IdentityResolver;
