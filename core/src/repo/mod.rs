//! Error types shared by every crate that opens or queries a repository.
//!
//! Callers are expected to branch on the `Error` variant rather than on
//! its message. None of these errors are transient: retrying the same
//! operation against the same file system state yields the same error.

mod error;
pub use error::{ConfigError, Error, Result};
