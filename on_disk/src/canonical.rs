//! Absolute, symlink-free paths.
//!
//! Two paths refer to the same location exactly when their canonical
//! forms are equal, so every path that leaves the resolver passes
//! through [`canonicalize`].
//!
//! [`canonicalize`]: fn.canonicalize.html

use std::{
    env, fs, io,
    path::{Component, Path, PathBuf},
};

/// Returns the canonical form of `path`, which need not exist.
///
/// The longest prefix of `path` that exists on disk is resolved through
/// the file system, so symbolic links in it are followed. Whatever
/// remains is appended lexically: `.` is dropped and `..` removes the
/// preceding missing component. Relative paths are taken relative to
/// the current working directory.
pub fn canonicalize<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let absolute = make_absolute(path.as_ref())?;

    let mut resolved = PathBuf::new();
    let mut missing = 0usize;

    for component in absolute.components() {
        match component {
            Component::Prefix(_) => resolved.push(component.as_os_str()),
            Component::RootDir => {
                resolved.push(component.as_os_str());
                resolved = dunce::canonicalize(&resolved)?;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // The prefix is already canonical, so its lexical parent
                // is also its real parent.
                resolved.pop();
                missing = missing.saturating_sub(1);
            }
            Component::Normal(name) => {
                resolved.push(name);
                if missing > 0 {
                    missing += 1;
                    continue;
                }

                match dunce::canonicalize(&resolved) {
                    Ok(canonical) => resolved = canonical,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => missing = 1,
                    Err(err) => return Err(err),
                }
            }
        }
    }

    Ok(resolved)
}

/// Returns `path` made absolute with `.` and `..` folded away, without
/// consulting the file system. Symbolic links are left as they are, so
/// the last component is still the name the caller chose.
pub fn absolute<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in make_absolute(path.as_ref())?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    Ok(normalized)
}

fn make_absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Create `path` and any missing parents, then return its canonical form.
pub fn create_dir_all<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path)?;
    dunce::canonicalize(path)
}
