use std::path::{Path, PathBuf};

use gitlayout::{layout::ResolvedLayout, repo::Error};

// Canonical form of a directory that exists. Used as the expected value so
// that the comparison doesn't depend on the code under test.
pub fn real(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap()
}

#[allow(dead_code)]
pub fn assert_git_dir_path(layout: &ResolvedLayout, expected: &Path) {
    assert_eq!(layout.git_dir(), real(expected).as_path());
}

#[allow(dead_code)]
pub fn assert_work_tree_path(layout: &ResolvedLayout, expected: &Path) {
    assert!(!layout.is_bare(), "expected a working tree: {:?}", layout);
    assert_eq!(layout.work_tree(), Some(real(expected).as_path()));
}

#[allow(dead_code)]
pub fn assert_no_work_tree<T: std::fmt::Debug>(r: Result<T, Error>) {
    match r {
        Err(Error::NoWorkTree) => (),
        other => panic!("expected NoWorkTree, got {:?}", other),
    }
}
