//! This crate implements the core data model for locating a git repository:
//! the hints a caller may supply, the settings read from a repository's
//! config file, and the layout they resolve to.

#![deny(warnings)]

pub mod layout;
pub mod repo;
