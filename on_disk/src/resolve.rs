//! Turns [`ConstructionHints`] into a [`ResolvedLayout`] by looking at the
//! file system.
//!
//! The precedence rules themselves live in
//! `gitlayout_core::layout::ResolvedLayout::decide`. This module gathers
//! what those rules need: canonical forms of the hinted paths, a
//! discovered control directory when none was hinted, and the
//! `core.bare` / `core.worktree` settings from the control directory's
//! config file.
//!
//! [`ConstructionHints`]: ../../gitlayout_core/layout/struct.ConstructionHints.html
//! [`ResolvedLayout`]: ../../gitlayout_core/layout/struct.ResolvedLayout.html

use std::path::Path;

use gitlayout_core::{
    layout::{Case, ConfigOverrides, ConstructionHints, ResolvedLayout},
    repo::{Error, Result},
};
use tracing::debug;

use crate::{
    canonical::{absolute, canonicalize},
    config::Config,
    discover::{DiscoverGitDir, FromCurrentDir},
};

/// Resolve `hints` to a layout, discovering the repository from the
/// current working directory if the hints name neither a control
/// directory nor a working tree.
///
/// Every path in the result is canonical. The file system is only read;
/// nothing is created and no config is written.
pub fn resolve(hints: &ConstructionHints) -> Result<ResolvedLayout> {
    resolve_with_probe(hints, &FromCurrentDir)
}

/// Like [`resolve`], but with a caller-supplied discovery strategy.
///
/// [`resolve`]: fn.resolve.html
pub fn resolve_with_probe(
    hints: &ConstructionHints,
    probe: &dyn DiscoverGitDir,
) -> Result<ResolvedLayout> {
    let case = hints.case();
    let must_exist = hints.requires_existing();

    // The rules look at the paths as the caller named them. Symbolic links
    // are only followed once the layout is decided.
    let mut given = ConstructionHints::new().must_exist(must_exist);
    if let Some(git_dir) = hints.explicit_git_dir() {
        given = given.git_dir(absolute(git_dir)?);
    }
    if let Some(work_tree) = hints.explicit_work_tree() {
        given = given.work_tree(absolute(work_tree)?);
    }

    if case == Case::Discover {
        let git_dir = absolute(probe.discover()?)?;
        debug!(git_dir = %git_dir.display(), "discovered git dir");
        given = given.git_dir(git_dir);
    }

    let overrides = match given.explicit_git_dir() {
        // An explicit work tree always wins, so the config isn't read.
        Some(_) if given.explicit_work_tree().is_some() => ConfigOverrides::default(),
        Some(git_dir) => read_overrides(git_dir, must_exist)?,
        None => ConfigOverrides::default(),
    };

    // Discovery has filled in a git dir, so a layout is always decided.
    let layout = match ResolvedLayout::decide(&given, &overrides) {
        Some(layout) => layout,
        None => unreachable!(),
    };

    let layout = layout.map_paths(|path: &Path| canonicalize(path))?;

    debug!(
        ?case,
        git_dir = %layout.git_dir().display(),
        work_tree = ?layout.work_tree(),
        bare = layout.is_bare(),
        "resolved repository layout"
    );

    Ok(layout)
}

fn read_overrides(git_dir: &Path, must_exist: bool) -> Result<ConfigOverrides> {
    if !git_dir.is_dir() {
        return if must_exist {
            Err(Error::RepositoryNotFound(canonicalize(git_dir)?))
        } else {
            Ok(ConfigOverrides::default())
        };
    }

    Config::for_git_dir(git_dir)?.overrides()
}
