//! Validate, decode and load configuration against a codec
//!
//! [`create_validator`] binds a [`Codec`] to three operations:
//!
//! - [`Validator::validate_config_object`] reports problems without failing
//! - [`Validator::load_config_object`] returns the decoded value or a
//!   [`ConfigValidationError`]
//! - [`Validator::load_config_file`] loads a file through a [`Loader`] and
//!   decodes it
//!
//! # Example
//!
//! ```
//! use config_codec::codec::SerdeCodec;
//! use config_codec::{create_validator, Validity};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, Serialize, PartialEq)]
//! struct Server {
//!     port: u16,
//! }
//!
//! let validator = create_validator(SerdeCodec::<Server>::new());
//! assert_eq!(validator.validate_config_object(&json!({"port": 80})), Validity::Valid);
//! assert_eq!(validator.load_config_object(&json!({"port": 80})).unwrap(), Server { port: 80 });
//! assert!(validator.load_config_object(&json!({"port": "x"})).is_err());
//! ```

use std::path::Path;

use serde_json::Value;

use crate::codec::{Codec, Errors, Validation};
use crate::error::{ConfigValidationError, Result};
use crate::loader::{FileLoader, Loader};
use crate::report::{PathReporter, Reporter};

/// Result of [`Validator::validate_config_object`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Validity {
    Valid,
    /// Report lines, one per failure
    Invalid(Vec<String>),
}

impl Validity {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Report lines, empty when valid
    #[must_use]
    pub fn report(&self) -> &[String] {
        match self {
            Self::Valid => &[],
            Self::Invalid(lines) => lines,
        }
    }
}

/// A codec bound to a loader and a reporter
#[derive(Debug, Clone)]
pub struct Validator<C, L = FileLoader, R = PathReporter> {
    codec: C,
    loader: L,
    reporter: R,
}

/// Bind `codec` to the default [`FileLoader`] and [`PathReporter`]
pub fn create_validator<C: Codec>(codec: C) -> Validator<C> {
    Validator::new(codec)
}

impl<C: Codec> Validator<C> {
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            loader: FileLoader::new(),
            reporter: PathReporter::new(),
        }
    }
}

impl<C, L, R> Validator<C, L, R>
where
    C: Codec,
    L: Loader,
    R: Reporter,
{
    /// Use a different loader for [`Self::load_config_file`]
    #[must_use]
    pub fn with_loader<L2: Loader>(self, loader: L2) -> Validator<C, L2, R> {
        Validator {
            codec: self.codec,
            loader,
            reporter: self.reporter,
        }
    }

    /// Use a different reporter for failure messages
    #[must_use]
    pub fn with_reporter<R2: Reporter>(self, reporter: R2) -> Validator<C, L, R2> {
        Validator {
            codec: self.codec,
            loader: self.loader,
            reporter,
        }
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn decode(&self, data: &Value) -> Validation<C::Output> {
        self.codec.decode(Some(data)).map_err(|errors| {
            tracing::debug!(
                "Config failed to decode as {}: {} error(s)",
                self.codec.name(),
                errors.len()
            );
            errors
        })
    }

    fn report(&self, errors: &Errors) -> Vec<String> {
        self.reporter.report(errors)
    }

    /// Check `data` against the codec without failing
    pub fn validate_config_object(&self, data: &Value) -> Validity {
        match self.decode(data) {
            Ok(_) => Validity::Valid,
            Err(errors) => Validity::Invalid(self.report(&errors)),
        }
    }

    /// Decode `data`, failing with the joined report if it does not match
    pub fn load_config_object(
        &self,
        data: &Value,
    ) -> std::result::Result<C::Output, ConfigValidationError> {
        self.decode(data).map_err(|errors| {
            let lines = self.report(&errors);
            ConfigValidationError::new(lines, errors)
        })
    }

    /// Load `path` through the loader, then decode it
    ///
    /// Loader failures are returned as they are.
    pub fn load_config_file(&self, path: impl AsRef<Path>) -> Result<C::Output> {
        let data = self.loader.load_raw(path.as_ref())?;
        Ok(self.load_config_object(&data)?)
    }
}
