//! Validate, decode and load configuration through composable codecs.
//!
//! ```no_run
//! use config_codec::codec::SerdeCodec;
//! use config_codec::create_validator;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! struct Config {
//!     port: u16,
//! }
//!
//! let validator = create_validator(SerdeCodec::<Config>::new());
//! let config = validator.load_config_file("config.toml").expect("Failed to load config");
//! println!("Port: {}", config.port);
//! ```

pub mod codec;
pub mod default;
pub mod error;
pub mod loader;
pub mod report;
pub mod validator;

pub use codec::{Codec, Context, Errors, Validation, ValidationError};
pub use default::{with_default, WithDefault};
pub use error::{ConfigError, ConfigValidationError, LoadError, Result};
pub use loader::{FileLoader, Format, Loader};
pub use report::{PathReporter, Reporter};
pub use validator::{create_validator, Validator, Validity};
