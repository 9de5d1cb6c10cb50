use std::fs;

use super::super::*;

use crate::TempWorkspace;

#[test]
fn happy_path() {
    let ws = TempWorkspace::new();
    let git_dir = ws.dir(&["work", ".git"]);

    let r = Repository::open(&ConstructionHints::new().git_dir(&git_dir)).unwrap();
    assert!(!r.is_bare());
    assert_eq!(r.directory(), ws.canonical(&["work", ".git"]));
    assert_eq!(r.work_tree().unwrap(), ws.canonical(&["work"]));
    assert_eq!(
        r.index_file().unwrap(),
        ws.canonical(&["work", ".git", "index"])
    );
}

#[test]
fn bare_repo_refuses_work_tree_queries() {
    let ws = TempWorkspace::new();
    let git_dir = ws.dir(&["workdir"]);
    fs::write(git_dir.join("index"), b"DIRC").unwrap();

    let r = Repository::open(&ConstructionHints::new().git_dir(&git_dir)).unwrap();
    assert!(r.is_bare());
    assert_eq!(r.directory(), ws.canonical(&["workdir"]));

    let err = r.work_tree().unwrap_err();
    if let Error::NoWorkTree = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }

    let err = r.index_file().unwrap_err();
    if let Error::NoWorkTree = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }

    // The index file exists, but a bare repository doesn't read it.
    let err = r.read_index().unwrap_err();
    if let Error::NoWorkTree = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn read_index_before_anything_is_staged() {
    let ws = TempWorkspace::new();
    let work_tree = ws.dir(&["work"]);

    let r = Repository::open(&ConstructionHints::new().work_tree(&work_tree)).unwrap();
    let index = r.read_index().unwrap();
    assert!(index.is_empty());
    assert_eq!(index.path(), ws.canonical(&["work", ".git", "index"]));
}

#[test]
fn read_index_content() {
    let ws = TempWorkspace::new();
    let git_dir = ws.dir(&["work", ".git"]);
    fs::write(git_dir.join("index"), b"DIRC\0\0\0\x02").unwrap();

    let r = Repository::open(&ConstructionHints::new().git_dir(&git_dir)).unwrap();
    assert_eq!(r.read_index().unwrap().content(), b"DIRC\0\0\0\x02");
}

#[test]
fn from_layout_keeps_layout() {
    let layout = ResolvedLayout::with_work_tree("/srv/repo/.git", "/srv/repo");
    let r = Repository::from_layout(layout.clone());

    assert_eq!(r.layout(), &layout);
    assert_eq!(r.work_tree().unwrap(), Path::new("/srv/repo"));
}

#[test]
fn config_is_a_fresh_read() {
    let ws = TempWorkspace::new();
    let git_dir = ws.dir(&["work", ".git"]);
    let r = Repository::open(&ConstructionHints::new().git_dir(&git_dir)).unwrap();

    assert_eq!(r.config().unwrap().get_bool("core", None, "bare").unwrap(), None);

    // The handle keeps its layout even though the config now disagrees.
    ws.set_bare(&git_dir, true);
    assert_eq!(
        r.config().unwrap().get_bool("core", None, "bare").unwrap(),
        Some(true)
    );
    assert!(!r.is_bare());
}

#[test]
fn error_no_git_dir() {
    let ws = TempWorkspace::new();
    let err = Repository::open(&ConstructionHints::new().git_dir(ws.path().join("bogus")))
        .unwrap_err();
    if let Error::RepositoryNotFound(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn handles_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Repository>();
}
