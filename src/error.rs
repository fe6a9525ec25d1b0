use std::path::PathBuf;

use thiserror::Error;

use crate::codec::Errors;
use crate::loader::Format;

/// Main error type returned by [`Validator::load_config_file`](crate::Validator::load_config_file)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// Raised when a configuration value does not decode against its codec.
///
/// The display form is the report, one line per failure, joined with `\n`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", .lines.join("\n"))]
pub struct ConfigValidationError {
    lines: Vec<String>,
    errors: Errors,
}

impl ConfigValidationError {
    #[must_use]
    pub fn new(lines: Vec<String>, errors: Errors) -> Self {
        Self { lines, errors }
    }

    /// Human-readable report lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Raw failure entries the report was built from
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }
}

/// Loader-specific errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse {} as {format}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        format: Format,
        reason: String,
    },

    #[error("Unsupported config format for {}\n\nSupported extensions: .json, .toml, .yaml, .yml", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
