use serde_json::Value;

use super::{Codec, Context, Validation, ValidationError};

/// Narrows another codec with a predicate on the decoded value
#[derive(Debug, Clone)]
pub struct Refinement<C, P> {
    codec: C,
    predicate: P,
    name: String,
}

/// Build a [`Refinement`] of `codec` that also requires `predicate`
///
/// ```
/// use config_codec::codec::{refine, Codec, SerdeCodec};
/// use serde_json::json;
///
/// let port = refine(SerdeCodec::<u16>::new(), |p: &u16| *p > 0, "Port");
/// assert!(port.decode(Some(&json!(0))).is_err());
/// assert!(!port.is(&0));
/// assert!(port.is(&80));
/// ```
pub fn refine<C, P>(codec: C, predicate: P, name: impl Into<String>) -> Refinement<C, P>
where
    C: Codec,
    P: Fn(&C::Output) -> bool,
{
    Refinement {
        codec,
        predicate,
        name: name.into(),
    }
}

impl<C, P> Codec for Refinement<C, P>
where
    C: Codec,
    P: Fn(&C::Output) -> bool,
{
    type Output = C::Output;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<C::Output> {
        let value = self.codec.validate(input, context)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(vec![ValidationError::new(input, context)])
        }
    }

    fn is(&self, value: &C::Output) -> bool {
        self.codec.is(value) && (self.predicate)(value)
    }

    fn encode(&self, value: &C::Output) -> Value {
        self.codec.encode(value)
    }
}
