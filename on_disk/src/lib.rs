//! This crate locates git repositories on the local file system.
//!
//! Given whatever the caller knows about a repository (see
//! `gitlayout_core::layout::ConstructionHints`), [`resolve`] works out
//! where its control directory and working tree are, and [`Repository`]
//! answers questions about the result.
//!
//! **IMPORTANT NOTE:** This is intended as a reference implementation largely
//! for testing purposes and may not necessarily handle all of the edge cases that
//! the traditional `git` command-line interface will handle.
//!
//! [`resolve`]: fn.resolve.html
//! [`Repository`]: struct.Repository.html

#![deny(warnings)]

pub mod canonical;

mod config;
pub use config::{Config, CONFIG_FILE};

pub mod discover;

mod index;
pub use index::{Index, INDEX_FILE};

mod repository;
pub use repository::Repository;

mod resolve;
pub use resolve::{resolve, resolve_with_probe};

mod temp_workspace;
pub use temp_workspace::TempWorkspace;
