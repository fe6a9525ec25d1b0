//! Fallback values for missing input
//!
//! [`with_default`] wraps a codec so that an absent input (a missing key or
//! `null`) decodes to a fallback value instead of failing. Present input is
//! never replaced: an invalid value still fails exactly as the wrapped codec
//! reports it.

use serde_json::Value;

use crate::codec::{is_absent, Codec, Context, Validation};

/// A codec that substitutes a default for absent input
#[derive(Debug, Clone)]
pub struct WithDefault<C: Codec> {
    codec: C,
    default: C::Output,
    default_is_valid: bool,
    name: String,
}

/// Wrap `codec` so that absent input decodes to `default`
///
/// The default is checked against `codec` once, here. If it does not belong
/// to `codec` it is never substituted and absent input fails as before.
///
/// ```
/// use config_codec::codec::{Codec, SerdeCodec};
/// use config_codec::with_default;
/// use serde_json::json;
///
/// let port = with_default(SerdeCodec::<u16>::new(), 8080);
/// assert_eq!(port.name(), "default(u16)");
/// assert_eq!(port.decode(None), Ok(8080));
/// assert_eq!(port.decode(Some(&json!(null))), Ok(8080));
/// assert_eq!(port.decode(Some(&json!(3000))), Ok(3000));
/// assert!(port.decode(Some(&json!("x"))).is_err());
/// ```
pub fn with_default<C>(codec: C, default: C::Output) -> WithDefault<C>
where
    C: Codec,
    C::Output: Clone,
{
    let name = format!("default({})", codec.name());
    let default_is_valid = codec.is(&default);
    if !default_is_valid {
        tracing::warn!("Default value for {name} does not satisfy its codec and will not be used");
    }

    WithDefault {
        codec,
        default,
        default_is_valid,
        name,
    }
}

impl<C> WithDefault<C>
where
    C: Codec,
    C::Output: Clone,
{
    #[must_use]
    pub fn default_value(&self) -> &C::Output {
        &self.default
    }

    /// Whether the default passed the wrapped codec's membership check
    #[must_use]
    pub fn default_is_valid(&self) -> bool {
        self.default_is_valid
    }

    #[must_use]
    pub fn inner(&self) -> &C {
        &self.codec
    }
}

impl<C> Codec for WithDefault<C>
where
    C: Codec,
    C::Output: Clone,
{
    type Output = C::Output;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<C::Output> {
        match self.codec.validate(input, context) {
            Err(_) if self.default_is_valid && is_absent(input) => {
                tracing::debug!("Using default for {} at '{}'", self.name, context.path());
                Ok(self.default.clone())
            }
            validation => validation,
        }
    }

    fn is(&self, value: &C::Output) -> bool {
        self.codec.is(value)
    }

    fn encode(&self, value: &C::Output) -> Value {
        self.codec.encode(value)
    }
}
