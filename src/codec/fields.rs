//! Building blocks for hand-written object codecs
//!
//! ```
//! use config_codec::codec::fields::{expect_object, field, Fields};
//! use config_codec::codec::{Codec, Context, SerdeCodec, Validation};
//! use serde_json::{json, Value};
//!
//! #[derive(Debug)]
//! struct Endpoint { host: String, port: u16 }
//!
//! struct EndpointCodec;
//!
//! impl Codec for EndpointCodec {
//!     type Output = Endpoint;
//!
//!     fn name(&self) -> String { "Endpoint".to_string() }
//!
//!     fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<Endpoint> {
//!         let object = expect_object(input, context)?;
//!         let mut fields = Fields::new();
//!         let host = fields.take(field(&SerdeCodec::<String>::new(), object, "host", context));
//!         let port = fields.take(field(&SerdeCodec::<u16>::new(), object, "port", context));
//!         let endpoint = host.zip(port).map(|(host, port)| Endpoint { host, port });
//!         fields.finish(endpoint, input, context)
//!     }
//!
//!     fn is(&self, _: &Endpoint) -> bool { true }
//!
//!     fn encode(&self, e: &Endpoint) -> Value { json!({"host": e.host, "port": e.port}) }
//! }
//!
//! let errors = EndpointCodec.decode(Some(&json!({"port": "x"}))).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use serde_json::{Map, Value};

use super::{failure, Codec, Context, Errors, Validation};

/// Decode `object[key]` with `codec` one level below `context`
///
/// A missing key is passed to the codec as `None`.
pub fn field<C: Codec>(
    codec: &C,
    object: &Map<String, Value>,
    key: &str,
    context: &Context,
) -> Validation<C::Output> {
    let input = object.get(key);
    codec.validate(input, &context.child(key, codec.name(), input))
}

/// Borrow `input` as a JSON object, failing at `context` otherwise
pub fn expect_object<'a>(
    input: Option<&'a Value>,
    context: &Context,
) -> Validation<&'a Map<String, Value>> {
    match input {
        Some(Value::Object(object)) => Ok(object),
        other => failure(other, context),
    }
}

/// Accumulates failures across fields so all of them get reported
#[derive(Debug, Default)]
pub struct Fields {
    errors: Errors,
}

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the value of a successful field, or record its failures
    pub fn take<T>(&mut self, result: Validation<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn the assembled value into a [`Validation`]
    ///
    /// Any recorded failure wins over `value`. A missing `value` with no
    /// recorded failure is reported against `input` at `context`.
    pub fn finish<T>(
        self,
        value: Option<T>,
        input: Option<&Value>,
        context: &Context,
    ) -> Validation<T> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        value.map_or_else(|| failure(input, context), Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SerdeCodec;
    use serde_json::json;

    #[test]
    fn test_field_pushes_key_onto_context() {
        let object = json!({"port": "x"});
        let ctx = Context::root("Server", Some(&object));
        let codec = SerdeCodec::<u16>::named("Port");

        let errors = field(&codec, object.as_object().unwrap(), "port", &ctx).unwrap_err();
        let last = errors[0].context.last().unwrap();

        assert_eq!(errors[0].context.path(), "port");
        assert_eq!(last.type_name, "Port");
        assert_eq!(last.actual, Some(json!("x")));
    }

    #[test]
    fn test_missing_field_is_none() {
        let object = json!({});
        let ctx = Context::root("Server", Some(&object));
        let codec = SerdeCodec::<u16>::new();

        let errors = field(&codec, object.as_object().unwrap(), "port", &ctx).unwrap_err();
        assert_eq!(errors[0].value, None);
    }

    #[test]
    fn test_expect_object() {
        let ctx = Context::root("Server", None);
        assert!(expect_object(Some(&json!({"a": 1})), &ctx).is_ok());
        assert!(expect_object(Some(&json!([1, 2])), &ctx).is_err());
        assert!(expect_object(None, &ctx).is_err());
    }

    #[test]
    fn test_fields_accumulate() {
        let ctx = Context::root("Server", None);
        let mut fields = Fields::new();

        let a: Option<u16> = fields.take(Ok(1));
        let b: Option<u16> = fields.take(failure(Some(&json!("b")), &ctx));
        let c: Option<u16> = fields.take(failure(None, &ctx));

        assert_eq!(a, Some(1));
        assert!(b.is_none() && c.is_none());
        assert!(!fields.is_empty());

        let errors = fields.finish(Some(0), None, &ctx).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_finish_without_value_fails() {
        let ctx = Context::root("Server", None);
        let result: Validation<u16> = Fields::new().finish(None, None, &ctx);
        assert_eq!(result.unwrap_err().len(), 1);
    }
}
