use std::{
    env,
    path::{Path, PathBuf},
};

// Changes the current working directory of the whole test process until
// dropped, then changes it back.
//
// Because this struct is intended for testing, its functions
// panic instead of returning Result structs.
//
// Any test that uses this module should be marked #[serial], and so
// should any test whose outcome depends on the working directory.
pub(crate) struct TempCwd {
    previous: PathBuf,
}

impl TempCwd {
    pub fn enter<P: AsRef<Path>>(path: P) -> TempCwd {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { previous }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.previous).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::TempCwd;

    #[test]
    #[serial]
    fn restores_on_drop() {
        let old_path = env::current_dir().unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let new_path = dunce::canonicalize(tempdir.path()).unwrap();

        {
            let _cwd = TempCwd::enter(&new_path);
            assert_eq!(env::current_dir().unwrap(), new_path);
        }

        assert_eq!(env::current_dir().unwrap(), old_path);
    }
}
