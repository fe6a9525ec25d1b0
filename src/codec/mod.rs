//! Codec abstraction for config-codec
//!
//! A [`Codec`] turns untyped input (`serde_json::Value`) into a typed value,
//! reports whether a typed value belongs to it, and encodes typed values back.
//! Decoding returns a [`Validation`]: either the typed value or a non-empty
//! list of [`ValidationError`]s, each carrying the offending value, the
//! [`Context`] it was found in and an optional message.
//!
//! Missing input is modelled as `None` (a key that is not there) and
//! `Some(Value::Null)` (an explicit null). See [`is_absent`].
//!
//! # Example
//!
//! ```
//! use config_codec::codec::{Codec, SerdeCodec};
//! use serde_json::json;
//!
//! let port = SerdeCodec::<u16>::named("Port");
//! assert_eq!(port.decode(Some(&json!(8080))), Ok(8080));
//! assert!(port.decode(Some(&json!("x"))).is_err());
//! ```

pub mod fields;
pub mod refine;
pub mod serde_codec;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use refine::{refine, Refinement};
pub use serde_codec::SerdeCodec;

/// One level of the path a decoder walked to reach a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Object key or array index; empty for the root
    pub key: String,
    /// Name of the codec that was decoding at this level
    pub type_name: String,
    /// Input seen at this level, `None` when absent
    pub actual: Option<Value>,
}

/// Ordered path from the root codec down to the failing one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context(Vec<ContextEntry>);

impl Context {
    /// Root context for decoding `input` with a codec called `type_name`
    #[must_use]
    pub fn root(type_name: impl Into<String>, input: Option<&Value>) -> Self {
        Self(vec![ContextEntry {
            key: String::new(),
            type_name: type_name.into(),
            actual: input.cloned(),
        }])
    }

    /// Extend this context by one level
    #[must_use]
    pub fn child(
        &self,
        key: impl Into<String>,
        type_name: impl Into<String>,
        actual: Option<&Value>,
    ) -> Self {
        let mut entries = self.0.clone();
        entries.push(ContextEntry {
            key: key.into(),
            type_name: type_name.into(),
            actual: actual.cloned(),
        });
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[ContextEntry] {
        &self.0
    }

    #[must_use]
    pub fn last(&self) -> Option<&ContextEntry> {
        self.0.last()
    }

    /// Dotted path of the non-empty keys, e.g. `server.port`
    #[must_use]
    pub fn path(&self) -> String {
        self.0
            .iter()
            .map(|entry| entry.key.as_str())
            .filter(|key| !key.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A single decode failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Offending input, `None` when it was absent
    pub value: Option<Value>,
    pub context: Context,
    pub message: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(value: Option<&Value>, context: &Context) -> Self {
        Self {
            value: value.cloned(),
            context: context.clone(),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "invalid value at '{}'", self.context.path()),
        }
    }
}

/// Failures produced by one decode call, never empty
pub type Errors = Vec<ValidationError>;

/// Outcome of a decode call
pub type Validation<T> = std::result::Result<T, Errors>;

/// Shorthand for a failed [`Validation`] with a single entry
pub fn failure<T>(value: Option<&Value>, context: &Context) -> Validation<T> {
    Err(vec![ValidationError::new(value, context)])
}

/// True for the two missing-value markers: no value at all, or `null`
#[must_use]
pub fn is_absent(input: Option<&Value>) -> bool {
    matches!(input, None | Some(Value::Null))
}

/// Validates and converts untyped input into `Output`, and back
pub trait Codec {
    type Output;

    /// Name used in contexts and reports
    fn name(&self) -> String;

    /// Decode `input` inside an existing `context`
    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<Self::Output>;

    /// Decode `input` from the root
    fn decode(&self, input: Option<&Value>) -> Validation<Self::Output> {
        self.validate(input, &Context::root(self.name(), input))
    }

    /// Whether an already typed value belongs to this codec
    fn is(&self, value: &Self::Output) -> bool;

    fn encode(&self, value: &Self::Output) -> Value;
}

impl<C: Codec + ?Sized> Codec for &C {
    type Output = C::Output;

    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<Self::Output> {
        (**self).validate(input, context)
    }

    fn is(&self, value: &Self::Output) -> bool {
        (**self).is(value)
    }

    fn encode(&self, value: &Self::Output) -> Value {
        (**self).encode(value)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    type Output = C::Output;

    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<Self::Output> {
        (**self).validate(input, context)
    }

    fn is(&self, value: &Self::Output) -> bool {
        (**self).is(value)
    }

    fn encode(&self, value: &Self::Output) -> Value {
        (**self).encode(value)
    }
}
