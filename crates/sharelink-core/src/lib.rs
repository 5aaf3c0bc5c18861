//! # sharelink-core
//!
//! Core crate for ShareLink. Contains configuration schemas and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other ShareLink crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
