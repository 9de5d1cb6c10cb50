//! Reads and writes a repository's `config` file.
//!
//! Only the parts of git's config format that matter for locating a
//! repository are supported: sections with optional quoted subsections,
//! `key = value` entries, comments, quoting and escapes, and line
//! continuations. Includes and conditional includes are not followed.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use gitlayout_core::{
    layout::ConfigOverrides,
    repo::{ConfigError, Error, Result},
};
use tempfile::NamedTempFile;
use tracing::debug;

mod parse;
use parse::{Entry, Section};

/// File name of the config file inside a control directory.
pub const CONFIG_FILE: &str = "config";

/// An in-memory copy of a config file.
///
/// A `Config` is a snapshot: it is read once by [`load`] and does not
/// notice later changes to the file. Changes made with the `set_*`
/// functions reach the disk only when [`save`] is called.
///
/// [`load`]: #method.load
/// [`save`]: #method.save
#[derive(Clone, Debug)]
pub struct Config {
    path: PathBuf,
    sections: Vec<Section>,
}

impl Config {
    /// Read the config file at `path`.
    ///
    /// A missing file is treated as an empty config. Any other failure to
    /// read the file, and any syntax error in it, is reported as
    /// `Error::InvalidConfig`.
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(invalid(&path, ConfigError::Io(err))),
        };

        match parse::parse(&text) {
            Ok(sections) => Ok(Config { path, sections }),
            Err(detail) => Err(invalid(&path, detail)),
        }
    }

    /// Read the config file belonging to the given control directory.
    pub fn for_git_dir(git_dir: &Path) -> Result<Self> {
        Self::load(git_dir.join(CONFIG_FILE))
    }

    /// Return the path this config was read from and will be saved to.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Return the last value assigned to `section.key`.
    ///
    /// Section and key names are case-insensitive; subsection names are
    /// not. A key that appears without `=` has no string value.
    pub fn get_string(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.get(section, subsection, key)
            .and_then(|entry| entry.value.as_deref())
    }

    /// Interpret `section.key` as a boolean.
    ///
    /// Returns `Ok(None)` when the key is absent, so callers can tell an
    /// unset value from an explicit `false`.
    pub fn get_bool(&self, section: &str, subsection: Option<&str>, key: &str) -> Result<Option<bool>> {
        let entry = match self.get(section, subsection, key) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let value = match &entry.value {
            Some(value) => value,
            None => return Ok(Some(true)),
        };

        match parse_bool(value) {
            Some(b) => Ok(Some(b)),
            None => Err(invalid(
                &self.path,
                ConfigError::InvalidBoolean {
                    key: format!("{}.{}", section, key),
                    value: value.clone(),
                },
            )),
        }
    }

    /// Assign `section.key`, replacing the last existing assignment if
    /// there is one.
    pub fn set_string(&mut self, section: &str, subsection: Option<&str>, key: &str, value: &str) {
        let value = Some(value.to_string());

        if let Some(entry) = self.get_mut(section, subsection, key) {
            entry.value = value;
            return;
        }

        let entry = Entry {
            key: key.to_ascii_lowercase(),
            value,
        };

        match self
            .sections
            .iter_mut()
            .rev()
            .find(|s| s.matches(section, subsection))
        {
            Some(existing) => existing.entries.push(entry),
            None => {
                let mut new_section = Section::new(section, subsection);
                new_section.entries.push(entry);
                self.sections.push(new_section);
            }
        }
    }

    pub fn set_bool(&mut self, section: &str, subsection: Option<&str>, key: &str, value: bool) {
        self.set_string(section, subsection, key, if value { "true" } else { "false" });
    }

    /// Extract the settings that influence where the working tree is.
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        Ok(ConfigOverrides {
            bare: self.get_bool("core", None, "bare")?.into(),
            work_tree: self
                .get_string("core", None, "worktree")
                .map(PathBuf::from),
        })
    }

    /// Write this config back to its file.
    ///
    /// The new content is written to a temporary file in the same
    /// directory and then renamed over the old file, so a concurrent
    /// reader sees either the old config or the new one.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(self.to_string().as_bytes())?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    fn get(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<&Entry> {
        self.sections
            .iter()
            .filter(|s| s.matches(section, subsection))
            .flat_map(|s| s.entries.iter())
            .filter(|e| e.key.eq_ignore_ascii_case(key))
            .last()
    }

    fn get_mut(&mut self, section: &str, subsection: Option<&str>, key: &str) -> Option<&mut Entry> {
        self.sections
            .iter_mut()
            .filter(|s| s.matches(section, subsection))
            .flat_map(|s| s.entries.iter_mut())
            .filter(|e| e.key.eq_ignore_ascii_case(key))
            .last()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&parse::serialize(&self.sections))
    }
}

fn invalid(path: &Path, detail: ConfigError) -> Error {
    Error::InvalidConfig {
        path: path.to_path_buf(),
        detail,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}
