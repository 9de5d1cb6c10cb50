use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{canonical, config::Config};

/// A `TempWorkspace` is a temporary directory for building repository
/// layouts by hand: nested directories, config files with particular
/// `core.bare` or `core.worktree` settings, and so on.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempWorkspace {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempWorkspace {
    // Create an empty workspace. The directory is deleted when the
    // struct is dropped.
    #[allow(clippy::new_without_default)]
    pub fn new() -> TempWorkspace {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();

        TempWorkspace { tempdir, path }
    }

    // Return the root of the workspace, exactly as the OS reported it.
    // (Not necessarily canonical: MacOS puts temp dirs behind a symlink.)
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // Create the directory at the given path below the workspace root,
    // including any missing parents, and return its path.
    pub fn dir(&self, components: &[&str]) -> PathBuf {
        let path = self.join(components);
        fs::create_dir_all(&path).unwrap();
        path
    }

    // Return the canonical form of the given path below the workspace
    // root. The path doesn't need to exist.
    pub fn canonical(&self, components: &[&str]) -> PathBuf {
        canonical::canonicalize(self.join(components)).unwrap()
    }

    // Replace the config file of `git_dir` with `text`.
    pub fn write_config(&self, git_dir: &Path, text: &str) {
        fs::write(git_dir.join(crate::config::CONFIG_FILE), text).unwrap();
    }

    // Set `core.bare` in the config file of `git_dir`.
    pub fn set_bare(&self, git_dir: &Path, bare: bool) {
        let mut config = Config::for_git_dir(git_dir).unwrap();
        config.set_bool("core", None, "bare", bare);
        config.save().unwrap();
    }

    // Set `core.worktree` in the config file of `git_dir`, as an
    // absolute path.
    pub fn set_work_tree(&self, git_dir: &Path, work_tree: &Path) {
        let work_tree = canonical::canonicalize(work_tree).unwrap();

        let mut config = Config::for_git_dir(git_dir).unwrap();
        config.set_string("core", None, "worktree", &work_tree.to_string_lossy());
        config.save().unwrap();
    }

    fn join(&self, components: &[&str]) -> PathBuf {
        components
            .iter()
            .fold(self.path.clone(), |path, c| path.join(c))
    }
}

#[cfg(test)]
mod tests {
    use super::TempWorkspace;

    #[test]
    fn removed_on_drop() {
        let path = {
            let ws = TempWorkspace::new();
            let path = ws.path().to_path_buf();
            assert!(path.is_dir());
            path
        };

        assert!(!path.exists());
    }

    #[test]
    fn dir_creates_parents() {
        let ws = TempWorkspace::new();
        let dir = ws.dir(&["workdir", "repoWithBareConfigTrue", "child"]);

        assert!(dir.is_dir());
        assert_eq!(dir, ws.path().join("workdir/repoWithBareConfigTrue/child"));
    }

    #[test]
    fn set_bare_and_work_tree() {
        let ws = TempWorkspace::new();
        let git_dir = ws.dir(&["repo"]);
        let tree = ws.dir(&["tree"]);

        ws.set_bare(&git_dir, false);
        ws.set_work_tree(&git_dir, &tree);

        let config = crate::Config::for_git_dir(&git_dir).unwrap();
        assert_eq!(config.get_bool("core", None, "bare").unwrap(), Some(false));
        assert_eq!(
            config.get_string("core", None, "worktree"),
            Some(&*ws.canonical(&["tree"]).to_string_lossy())
        );
    }
}
