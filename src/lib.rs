//! Works out where a git repository's control directory and working tree
//! live, and whether the repository is bare.
//!
//! The decision rules themselves are in `gitlayout_core`, which never
//! touches the file system. `gitlayout_on_disk` gathers what those rules
//! need from disk and wraps the result in a [`Repository`].
//!
//! ```no_run
//! use gitlayout::{layout::ConstructionHints, Repository};
//!
//! let repo = Repository::open(&ConstructionHints::new().git_dir("/src/project/.git"))?;
//! assert!(!repo.is_bare());
//! # Ok::<(), gitlayout::repo::Error>(())
//! ```
//!
//! [`Repository`]: struct.Repository.html

#![deny(warnings)]

pub use gitlayout_core::{layout, repo};
pub use gitlayout_on_disk::{
    canonical, discover, resolve, resolve_with_probe, Config, Index, Repository, CONFIG_FILE,
    INDEX_FILE,
};
