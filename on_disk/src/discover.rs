use std::{
    env,
    path::{Path, PathBuf},
};

use gitlayout_core::{
    layout::DOT_GIT,
    repo::{Error, Result},
};

/// Finds a control directory when the caller didn't name one.
///
/// Git comes with many configuration options and algorithms for finding
/// a repo. Implementations of this trait are where those would live; the
/// resolver only cares about the answer.
pub trait DiscoverGitDir {
    /// Return the control directory that was found, or
    /// `Error::RepositoryNotFound` naming where the search started.
    fn discover(&self) -> Result<PathBuf>;
}

/// Looks for a `.git` directory in a starting directory and then in each
/// of its ancestors, nearest first.
#[derive(Clone, Debug)]
pub struct FromPath {
    start: PathBuf,
}

impl FromPath {
    pub fn new<P: Into<PathBuf>>(start: P) -> Self {
        FromPath {
            start: start.into(),
        }
    }
}

impl DiscoverGitDir for FromPath {
    fn discover(&self) -> Result<PathBuf> {
        find_git_dir(&self.start).ok_or_else(|| Error::RepositoryNotFound(self.start.clone()))
    }
}

/// [`FromPath`] starting at the process's current working directory.
///
/// [`FromPath`]: struct.FromPath.html
#[derive(Clone, Copy, Debug, Default)]
pub struct FromCurrentDir;

impl DiscoverGitDir for FromCurrentDir {
    fn discover(&self) -> Result<PathBuf> {
        FromPath::new(env::current_dir()?).discover()
    }
}

fn find_git_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DOT_GIT))
        .find(|git_dir| git_dir.is_dir())
}
