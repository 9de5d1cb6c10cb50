//! Decides where a repository's control directory and working tree live.
//!
//! A caller describes what it knows about a repository with
//! [`ConstructionHints`]. Anything the caller leaves open is filled in from
//! the repository's config file ([`ConfigOverrides`]) and, failing that,
//! from the naming convention that a directory called `.git` sits inside
//! its working tree.
//!
//! Nothing in this module touches the file system. Gathering the
//! observations (does the directory exist, what does its config say,
//! what is the canonical form of each path) is left to the
//! `gitlayout_on_disk` crate, which then asks [`ResolvedLayout::decide`]
//! for the answer.
//!
//! [`ConstructionHints`]: struct.ConstructionHints.html
//! [`ConfigOverrides`]: struct.ConfigOverrides.html
//! [`ResolvedLayout::decide`]: struct.ResolvedLayout.html#method.decide

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Conventional name of a control directory nested inside its working tree.
pub const DOT_GIT: &str = ".git";

/// What the caller knows about a repository's location before anything
/// has been read from disk.
///
/// Build one with the chained setters:
///
/// ```
/// use gitlayout_core::layout::{Case, ConstructionHints};
///
/// let hints = ConstructionHints::new().git_dir("/src/project/.git");
/// assert_eq!(hints.case(), Case::GitDirOnly);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstructionHints {
    git_dir: Option<PathBuf>,
    work_tree: Option<PathBuf>,
    must_exist: bool,
}

impl Default for ConstructionHints {
    fn default() -> Self {
        ConstructionHints {
            git_dir: None,
            work_tree: None,
            must_exist: true,
        }
    }
}

impl ConstructionHints {
    /// Hints with neither path set. Resolving these falls back to discovery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the location of the control directory.
    pub fn git_dir<P: Into<PathBuf>>(mut self, git_dir: P) -> Self {
        self.git_dir = Some(git_dir.into());
        self
    }

    /// Assert the location of the working tree.
    pub fn work_tree<P: Into<PathBuf>>(mut self, work_tree: P) -> Self {
        self.work_tree = Some(work_tree.into());
        self
    }

    /// Whether a missing control directory is an error (the default) or
    /// acceptable because the caller is about to create the repository.
    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }

    pub fn explicit_git_dir(&self) -> Option<&Path> {
        self.git_dir.as_deref()
    }

    pub fn explicit_work_tree(&self) -> Option<&Path> {
        self.work_tree.as_deref()
    }

    pub fn requires_existing(&self) -> bool {
        self.must_exist
    }

    /// Which row of the precedence table these hints select.
    pub fn case(&self) -> Case {
        match (&self.git_dir, &self.work_tree) {
            (Some(_), None) => Case::GitDirOnly,
            (None, Some(_)) => Case::WorkTreeOnly,
            (Some(_), Some(_)) => Case::Both,
            (None, None) => Case::Discover,
        }
    }
}

/// The four ways a set of hints can be resolved, in precedence order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Case {
    /// Only the control directory is known. Its config decides the rest.
    GitDirOnly,

    /// Only the working tree is known. The control directory is
    /// `<work_tree>/.git` and the repository is never bare.
    WorkTreeOnly,

    /// Both are known. The repository is never bare.
    Both,

    /// Neither is known. A control directory must be discovered first.
    Discover,
}

/// The `core.bare` setting, which may be absent.
///
/// Absent is distinct from `false`: only an absent setting lets the
/// `.git` naming convention decide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BareSetting {
    Unset,
    Bare,
    NotBare,
}

impl Default for BareSetting {
    fn default() -> Self {
        BareSetting::Unset
    }
}

impl From<Option<bool>> for BareSetting {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => BareSetting::Unset,
            Some(true) => BareSetting::Bare,
            Some(false) => BareSetting::NotBare,
        }
    }
}

/// Settings from a repository's config file that influence its layout.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    /// `core.bare`
    pub bare: BareSetting,

    /// `core.worktree`. A relative path is taken relative to the parent
    /// of the control directory.
    pub work_tree: Option<PathBuf>,
}

/// Where a repository lives.
///
/// A layout always has a control directory. It has a working tree
/// exactly when it is not bare; the two can't disagree because bareness
/// is derived from the absence of a working tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedLayout {
    git_dir: PathBuf,
    work_tree: Option<PathBuf>,
}

impl ResolvedLayout {
    /// A layout with no working tree.
    pub fn bare<P: Into<PathBuf>>(git_dir: P) -> Self {
        ResolvedLayout {
            git_dir: git_dir.into(),
            work_tree: None,
        }
    }

    /// A layout with the given working tree.
    pub fn with_work_tree<P: Into<PathBuf>, Q: Into<PathBuf>>(git_dir: P, work_tree: Q) -> Self {
        ResolvedLayout {
            git_dir: git_dir.into(),
            work_tree: Some(work_tree.into()),
        }
    }

    /// Apply the precedence rules to a set of hints and the config
    /// settings read from the hinted control directory.
    ///
    /// `overrides` are consulted only when the hints name a control
    /// directory and no working tree. An explicit working tree always
    /// wins over configuration.
    ///
    /// Returns `None` for [`Case::Discover`]: the caller has to find a
    /// control directory before anything can be decided.
    ///
    /// Paths are combined as given, without being made absolute or
    /// canonical. Callers that want canonical output should pass
    /// canonical hints and then canonicalize the result.
    ///
    /// [`Case::Discover`]: enum.Case.html#variant.Discover
    pub fn decide(hints: &ConstructionHints, overrides: &ConfigOverrides) -> Option<Self> {
        match (&hints.git_dir, &hints.work_tree) {
            (Some(git_dir), Some(work_tree)) => {
                Some(Self::with_work_tree(git_dir.clone(), work_tree.clone()))
            }
            (None, Some(work_tree)) => Some(Self::with_work_tree(
                work_tree.join(DOT_GIT),
                work_tree.clone(),
            )),
            (Some(git_dir), None) => Some(Self::from_git_dir(git_dir.clone(), overrides)),
            (None, None) => None,
        }
    }

    fn from_git_dir(git_dir: PathBuf, overrides: &ConfigOverrides) -> Self {
        let parent = git_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let work_tree = match (&overrides.work_tree, overrides.bare) {
            (Some(work_tree), _) => Some(match &parent {
                Some(parent) if work_tree.is_relative() => parent.join(work_tree),
                _ => work_tree.clone(),
            }),
            (None, BareSetting::Bare) => None,
            (None, BareSetting::NotBare) => parent,
            (None, BareSetting::Unset) => {
                if git_dir.file_name() == Some(OsStr::new(DOT_GIT)) {
                    parent
                } else {
                    None
                }
            }
        };

        ResolvedLayout { git_dir, work_tree }
    }

    /// Return the path to the control directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the working tree, if there is one.
    pub fn work_tree(&self) -> Option<&Path> {
        self.work_tree.as_deref()
    }

    pub fn is_bare(&self) -> bool {
        self.work_tree.is_none()
    }

    /// Rewrite every path in the layout, typically to canonicalize it.
    /// Bareness is preserved.
    pub fn map_paths<F, E>(self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&Path) -> Result<PathBuf, E>,
    {
        let git_dir = f(&self.git_dir)?;
        let work_tree = match self.work_tree {
            Some(work_tree) => Some(f(&work_tree)?),
            None => None,
        };

        Ok(ResolvedLayout { git_dir, work_tree })
    }
}
