use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};

use super::{failure, Codec, Context, Validation, ValidationError};

/// Codec for any type that already knows how to (de)serialize itself
pub struct SerdeCodec<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeCodec<T> {
    /// Codec named after the Rust type, e.g. `u16` or `String`
    #[must_use]
    pub fn new() -> Self {
        Self::named(short_type_name::<T>())
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeCodec<T> {
    fn clone(&self) -> Self {
        Self::named(self.name.clone())
    }
}

impl<T> fmt::Debug for SerdeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeCodec").field("name", &self.name).finish()
    }
}

impl<T: DeserializeOwned + Serialize> Codec for SerdeCodec<T> {
    type Output = T;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, input: Option<&Value>, context: &Context) -> Validation<T> {
        // A missing value decodes like null so `Option<_>` fields may be left out
        let Some(value) = input else {
            return T::deserialize(&Value::Null).or_else(|_| failure(None, context));
        };

        serde_path_to_error::deserialize(value).map_err(|e| {
            tracing::debug!("{} rejected input at '{}': {}", self.name, e.path(), e.inner());
            vec![self.failure_at(value, context, e.path(), e.inner())]
        })
    }

    fn is(&self, value: &T) -> bool {
        serde_json::to_value(value)
            .ok()
            .is_some_and(|json| T::deserialize(&json).is_ok())
    }

    fn encode(&self, value: &T) -> Value {
        serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::warn!("Failed to encode {}: {e}", self.name);
            Value::Null
        })
    }
}

impl<T> SerdeCodec<T> {
    /// Failure located at the path serde reached inside `input`
    ///
    /// Map keys and sequence indices extend `context`; the entry's value is
    /// the input found at that position and its message is serde's reason.
    fn failure_at(
        &self,
        input: &Value,
        context: &Context,
        path: &Path,
        reason: &serde_json::Error,
    ) -> ValidationError {
        let mut context = context.clone();
        let mut actual = Some(input);
        let mut type_name = self.name.clone();

        for segment in path.iter() {
            let key = match segment {
                Segment::Map { key } => {
                    actual = actual.and_then(|v| v.get(key));
                    key.clone()
                }
                Segment::Seq { index } => {
                    actual = actual.and_then(|v| v.get(index));
                    index.to_string()
                }
                Segment::Enum { variant } => variant.clone(),
                Segment::Unknown => continue,
            };
            type_name = format!("{type_name}.{key}");
            context = context.child(key, type_name.clone(), actual);
        }

        let location = context.path();
        let message = if location.is_empty() {
            reason.to_string()
        } else {
            format!("{location}: {reason}")
        };

        ValidationError::new(actual, &context).with_message(message)
    }
}

/// `alloc::string::String` -> `String`; generic names are kept whole
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Server {
        host: String,
        port: u16,
    }

    #[test]
    fn test_default_names() {
        assert_eq!(SerdeCodec::<u16>::new().name(), "u16");
        assert_eq!(SerdeCodec::<String>::new().name(), "String");
        assert_eq!(SerdeCodec::<Server>::new().name(), "Server");
        assert_eq!(SerdeCodec::<u16>::named("Port").name(), "Port");
    }

    #[test]
    fn test_decode_struct() {
        let codec = SerdeCodec::<Server>::new();
        let decoded = codec
            .decode(Some(&json!({"host": "localhost", "port": 3000})))
            .unwrap();

        assert_eq!(
            decoded,
            Server {
                host: "localhost".to_string(),
                port: 3000
            }
        );
    }

    #[test]
    fn test_decode_wrong_type_keeps_value_and_context() {
        let codec = SerdeCodec::<u16>::named("Port");
        let errors = codec.decode(Some(&json!("x"))).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, Some(json!("x")));
        assert_eq!(errors[0].context.last().unwrap().type_name, "Port");
        assert_eq!(
            errors[0].message.as_deref(),
            Some(r#"invalid type: string "x", expected u16"#)
        );
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Config {
        name: String,
        server: Server,
        #[serde(default)]
        mirrors: Vec<Server>,
    }

    #[test]
    fn test_nested_failure_names_the_field() {
        let codec = SerdeCodec::<Config>::new();
        let input = json!({"name": "a", "server": {"host": "h", "port": "x"}});
        let errors = codec.decode(Some(&input)).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context.path(), "server.port");
        assert_eq!(errors[0].value, Some(json!("x")));
        assert_eq!(
            errors[0].context.last().unwrap().type_name,
            "Config.server.port"
        );
        assert_eq!(
            errors[0].message.as_deref(),
            Some(r#"server.port: invalid type: string "x", expected u16"#)
        );
    }

    #[test]
    fn test_missing_field_is_named() {
        let codec = SerdeCodec::<Config>::new();
        let input = json!({"server": {"host": "h", "port": 1}});
        let errors = codec.decode(Some(&input)).unwrap_err();

        assert_eq!(errors[0].context.path(), "");
        assert_eq!(errors[0].message.as_deref(), Some("missing field `name`"));
    }

    #[test]
    fn test_sequence_index_in_path() {
        let codec = SerdeCodec::<Config>::new();
        let input = json!({
            "name": "a",
            "server": {"host": "h", "port": 1},
            "mirrors": [{"host": "m", "port": 2}, {"host": "n", "port": -2}]
        });
        let errors = codec.decode(Some(&input)).unwrap_err();

        assert_eq!(errors[0].context.path(), "mirrors.1.port");
        assert_eq!(errors[0].value, Some(json!(-2)));
    }

    #[test]
    fn test_path_extends_outer_context() {
        let codec = SerdeCodec::<Server>::new();
        let input = json!({"host": "h", "port": true});
        let ctx = Context::root("App", None).child("backend", "Server", Some(&input));

        let errors = codec.validate(Some(&input), &ctx).unwrap_err();
        assert_eq!(errors[0].context.path(), "backend.port");
        assert!(errors[0]
            .message
            .as_deref()
            .unwrap()
            .starts_with("backend.port: invalid type: boolean `true`"));
    }

    #[test]
    fn test_encode_failure_is_null() {
        use std::collections::HashMap;

        let codec = SerdeCodec::<HashMap<Vec<u8>, u8>>::new();
        let value = HashMap::from([(vec![1u8], 1u8)]);
        assert_eq!(codec.encode(&value), Value::Null);
        assert!(!codec.is(&value));
    }

    #[test]
    fn test_decode_out_of_range() {
        let codec = SerdeCodec::<u8>::new();
        assert!(codec.decode(Some(&json!(300))).is_err());
        assert!(codec.decode(Some(&json!(-1))).is_err());
    }

    #[test]
    fn test_absent_input_fails() {
        let codec = SerdeCodec::<u16>::new();
        assert_eq!(codec.decode(None).unwrap_err()[0].value, None);
        assert!(codec.decode(Some(&Value::Null)).is_err());
    }

    #[test]
    fn test_option_accepts_null() {
        let codec = SerdeCodec::<Option<u16>>::new();
        assert_eq!(codec.decode(Some(&Value::Null)), Ok(None));
        assert_eq!(codec.decode(None), Ok(None));
    }

    #[test]
    fn test_is_and_encode() {
        let codec = SerdeCodec::<Server>::new();
        let server = Server {
            host: "example.org".to_string(),
            port: 443,
        };

        assert!(codec.is(&server));
        assert_eq!(
            codec.encode(&server),
            json!({"host": "example.org", "port": 443})
        );
    }
}
