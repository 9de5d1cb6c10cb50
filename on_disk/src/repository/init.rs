use std::{env, fs, path::Path};

use gitlayout_core::{
    layout::{Case, ConstructionHints, ResolvedLayout},
    repo::{Error, Result},
};
use tracing::debug;

use super::Repository;
use crate::{canonical, config::Config, resolve::resolve};

impl Repository {
    /// Creates a new, empty git repository on the local file system.
    ///
    /// The hints are resolved as for [`open`], except that the control
    /// directory doesn't have to exist yet. With no hints at all, the
    /// current directory becomes the working tree.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    ///
    /// [`open`]: #method.open
    pub fn init(hints: &ConstructionHints) -> Result<Self> {
        let hints = match hints.case() {
            Case::Discover => hints.clone().work_tree(env::current_dir()?),
            _ => hints.clone(),
        };

        let layout = resolve(&hints.must_exist(false))?;
        create(&layout)
    }

    /// Creates a new, empty bare git repository at `git_dir`.
    ///
    /// Analogous to [`git init --bare`](https://git-scm.com/docs/git-init).
    pub fn init_bare<P: AsRef<Path>>(git_dir: P) -> Result<Self> {
        let layout = ResolvedLayout::bare(canonical::canonicalize(git_dir)?);
        create(&layout)
    }
}

fn create(layout: &ResolvedLayout) -> Result<Repository> {
    let git_dir = layout.git_dir();
    if git_dir.exists() && fs::read_dir(git_dir)?.next().is_some() {
        return Err(Error::GitDirShouldntExist(git_dir.to_path_buf()));
    }

    fs::create_dir_all(git_dir)?;

    create_config(layout)?;
    create_description(git_dir)?;
    create_head(git_dir)?;
    create_hooks_dir(git_dir)?;
    create_info_dir(git_dir)?;
    create_objects_dir(git_dir)?;
    create_refs_dir(git_dir)?;

    if let Some(work_tree) = layout.work_tree() {
        fs::create_dir_all(work_tree)?;
    }

    debug!(
        git_dir = %git_dir.display(),
        bare = layout.is_bare(),
        "initialized repository"
    );

    // Re-resolve from the control directory alone so that what we return
    // is exactly what a later `open` will see.
    Repository::open(&ConstructionHints::new().git_dir(git_dir))
}

fn create_config(layout: &ResolvedLayout) -> Result<()> {
    let git_dir = layout.git_dir();
    let mut config = Config::for_git_dir(git_dir)?;

    config.set_string("core", None, "repositoryformatversion", "0");
    config.set_bool("core", None, "filemode", true);
    config.set_bool("core", None, "bare", layout.is_bare());

    if let Some(work_tree) = layout.work_tree() {
        config.set_bool("core", None, "logallrefupdates", true);

        if git_dir.parent() != Some(work_tree) {
            config.set_string("core", None, "worktree", &work_tree.to_string_lossy());
        }
    }

    config.save()
}

fn create_description(git_dir: &Path) -> Result<()> {
    let desc_path = git_dir.join("description");
    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";

    fs::write(desc_path, desc_txt).map_err(|e| e.into())
}

fn create_head(git_dir: &Path) -> Result<()> {
    let head_path = git_dir.join("HEAD");
    let head_txt = "ref: refs/heads/master\n";

    fs::write(head_path, head_txt).map_err(|e| e.into())
}

fn create_hooks_dir(git_dir: &Path) -> Result<()> {
    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir).map_err(|e| e.into())

    // NOTE: Intentionally not including the sample files.
}

fn create_info_dir(git_dir: &Path) -> Result<()> {
    let info_dir = git_dir.join("info");
    fs::create_dir_all(&info_dir)?;

    let exclude_path = info_dir.join("exclude");
    let exclude_txt = "# git ls-files --others --exclude-from=.git/info/exclude\n# Lines that start with '#' are comments.\n# For a project mostly in C, the following would be a good set of\n# exclude patterns (uncomment them if you want to use them):\n# *.[oa]\n# *~\n.DS_Store\n";

    fs::write(exclude_path, exclude_txt).map_err(|e| e.into())
}

fn create_objects_dir(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("objects/info"))?;
    fs::create_dir_all(git_dir.join("objects/pack")).map_err(|e| e.into())
}

fn create_refs_dir(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("refs/heads"))?;
    fs::create_dir_all(git_dir.join("refs/tags")).map_err(|e| e.into())
}
