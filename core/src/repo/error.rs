use std::{io, path::PathBuf};

use thiserror::Error;

/// Describes the potential error conditions that might arise while locating
/// or querying a repository.
#[derive(Debug, Error)]
pub enum Error {
    /// The control directory (typically `.git`) does not exist.
    #[error("repository not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    /// The repository's config file could not be read or parsed.
    #[error("invalid config file {}: {}", .path.display(), .detail)]
    InvalidConfig {
        path: PathBuf,
        #[source]
        detail: ConfigError,
    },

    /// A working tree was requested from a bare repository.
    #[error("bare repository has no working tree")]
    NoWorkTree,

    /// Attempted to create a repository where one already exists.
    #[error("git directory already exists: {}", .0.display())]
    GitDirShouldntExist(PathBuf),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// A specialized `Result` type for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons why a config file can not be accepted.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read file: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: entry appears before any section header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: malformed section header")]
    BadSectionHeader { line: usize },

    #[error("line {line}: malformed key")]
    BadKey { line: usize },

    #[error("line {line}: unterminated quoted value")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unknown escape sequence `\\{escape}`")]
    BadEscape { line: usize, escape: char },

    #[error("`{key}` is not a valid boolean: `{value}`")]
    InvalidBoolean { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_includes_detail() {
        let err = Error::InvalidConfig {
            path: PathBuf::from("/repo/.git/config"),
            detail: ConfigError::BadSectionHeader { line: 3 },
        };

        assert_eq!(
            err.to_string(),
            "invalid config file /repo/.git/config: line 3: malformed section header"
        );
    }

    #[test]
    fn invalid_config_exposes_source() {
        let err = Error::InvalidConfig {
            path: PathBuf::from("config"),
            detail: ConfigError::InvalidBoolean {
                key: "core.bare".to_string(),
                value: "maybe".to_string(),
            },
        };

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "`core.bare` is not a valid boolean: `maybe`"
        );
    }

    #[test]
    fn bad_escape_message() {
        let err = ConfigError::BadEscape {
            line: 7,
            escape: 'q',
        };
        assert_eq!(err.to_string(), "line 7: unknown escape sequence `\\q`");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err: Error = io_err.into();
        if let Error::IoError(err) = err {
            assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        } else {
            panic!("wrong error: {:?}", err);
        }
    }
}
