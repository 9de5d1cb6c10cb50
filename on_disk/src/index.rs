use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gitlayout_core::repo::Result;

/// File name of the index inside a control directory.
pub const INDEX_FILE: &str = "index";

/// The raw content of a repository's index (staging area).
///
/// The index format itself is not interpreted here. What matters is that
/// an index only exists for a repository with a working tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Index {
    path: PathBuf,
    content: Vec<u8>,
}

impl Index {
    /// Read the index at `path`. A missing file reads as an empty index.
    pub(crate) fn read(path: PathBuf) -> Result<Self> {
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Index { path, content })
    }

    /// Return the file this index was read from.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
