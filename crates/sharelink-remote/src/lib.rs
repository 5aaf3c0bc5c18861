//! # sharelink-remote
//!
//! The pure I/O boundary of ShareLink: a [`RemoteExecutor`] trait for
//! running a single elevated command on the remote host, an SSH
//! implementation that opens a fresh channel per call, and a scripted
//! mock for tests.
//!
//! No parsing happens here; callers interpret the returned text.

pub mod executor;
pub mod mock;
pub mod ssh;

pub use executor::{CommandOutput, RemoteExecutor, elevated};
pub use mock::MockExecutor;
pub use ssh::SshExecutor;
