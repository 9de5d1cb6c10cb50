//! A repository whose location has been resolved.

use std::path::{Path, PathBuf};

use gitlayout_core::{
    layout::{ConstructionHints, ResolvedLayout},
    repo::{Error, Result},
};

use crate::{
    config::Config,
    index::{Index, INDEX_FILE},
    resolve::resolve,
};

mod init;

/// A git repository on the local file system.
///
/// A `Repository` is built from exactly one [`ResolvedLayout`] and never
/// changes it. Whether it is bare is decided once, at construction; to
/// look at the repository differently, open a new `Repository` from new
/// hints.
///
/// Every query that needs a working tree (the working tree itself and the
/// index, which describes it) fails with `Error::NoWorkTree` on a bare
/// repository.
///
/// [`ResolvedLayout`]: ../gitlayout_core/layout/struct.ResolvedLayout.html
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repository {
    layout: ResolvedLayout,
}

impl Repository {
    /// Locate an existing repository.
    ///
    /// See `resolve` for how the hints are interpreted.
    pub fn open(hints: &ConstructionHints) -> Result<Self> {
        Ok(Self::from_layout(resolve(hints)?))
    }

    /// Wrap an already-resolved layout.
    pub fn from_layout(layout: ResolvedLayout) -> Self {
        Repository { layout }
    }

    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    pub fn is_bare(&self) -> bool {
        self.layout.is_bare()
    }

    /// Return the path to the control directory (typically `.git`).
    pub fn directory(&self) -> &Path {
        self.layout.git_dir()
    }

    /// Return the top-level working directory.
    pub fn work_tree(&self) -> Result<&Path> {
        self.layout.work_tree().ok_or(Error::NoWorkTree)
    }

    /// Return the path of the index file.
    pub fn index_file(&self) -> Result<PathBuf> {
        self.work_tree()?;
        Ok(self.directory().join(INDEX_FILE))
    }

    /// Read the index. A repository that has never staged anything has an
    /// empty index.
    pub fn read_index(&self) -> Result<Index> {
        Index::read(self.index_file()?)
    }

    /// Read this repository's config file as it is right now.
    pub fn config(&self) -> Result<Config> {
        Config::for_git_dir(self.directory())
    }
}

#[cfg(test)]
mod tests;
