//! Raw configuration loading
//!
//! A [`Loader`] turns a path into an untyped `serde_json::Value`. The default
//! [`FileLoader`] reads JSON, TOML or YAML from disk, picking the format from
//! the file extension unless one is forced.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Guess the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parse `content` into an untyped value
    pub fn parse(self, content: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Resolves a path to raw configuration data
pub trait Loader {
    fn load_raw(&self, path: &Path) -> std::result::Result<Value, LoadError>;
}

impl<F> Loader for F
where
    F: Fn(&Path) -> std::result::Result<Value, LoadError>,
{
    fn load_raw(&self, path: &Path) -> std::result::Result<Value, LoadError> {
        self(path)
    }
}

/// Reads and parses configuration files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader {
    format: Option<Format>,
}

impl FileLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always parse as `format`, ignoring the extension
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

impl Loader for FileLoader {
    fn load_raw(&self, path: &Path) -> std::result::Result<Value, LoadError> {
        let format = self
            .format
            .or_else(|| Format::from_path(path))
            .ok_or_else(|| LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        tracing::debug!("Loading {format} config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io(e),
        })?;

        format.parse(&content).map_err(|reason| LoadError::Parse {
            path: path.to_path_buf(),
            format,
            reason,
        })
    }
}
