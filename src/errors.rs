// src/errors.rs

//! Crate-wide error type and strict/lenient handling mode.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchmonError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no glob expansion for pattern: {0}")]
    EmptyGlob(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WatchmonError>;

/// How configuration and watch-registration problems are handled.
///
/// - `Lenient` (default): report the problem and keep going with the
///   remaining valid globs / searches / definitions.
/// - `Strict` (`--exit-on-error`): the first problem is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    #[default]
    Lenient,
    Strict,
}

impl ErrorMode {
    pub fn is_strict(self) -> bool {
        matches!(self, ErrorMode::Strict)
    }
}
