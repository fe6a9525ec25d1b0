use crate::codec::{Errors, ValidationError};

/// Formats decode failures into human-readable lines
pub trait Reporter {
    fn report(&self, errors: &Errors) -> Vec<String>;
}

impl<F> Reporter for F
where
    F: Fn(&Errors) -> Vec<String>,
{
    fn report(&self, errors: &Errors) -> Vec<String> {
        self(errors)
    }
}

/// One line per failure naming the expected type, the path and the value
///
/// ```text
/// Expecting Port at server.port but instead got: "x"
/// ```
///
/// A failure that carries its own message is reported as that message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathReporter;

impl PathReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn describe(error: &ValidationError) -> String {
        if let Some(message) = &error.message {
            return message.clone();
        }

        let expected = error
            .context
            .last()
            .map_or("unknown", |entry| entry.type_name.as_str());
        let got = error
            .value
            .as_ref()
            .map_or_else(|| "undefined".to_string(), ToString::to_string);

        let path = error.context.path();
        if path.is_empty() {
            format!("Expecting {expected} but instead got: {got}")
        } else {
            format!("Expecting {expected} at {path} but instead got: {got}")
        }
    }
}

impl Reporter for PathReporter {
    fn report(&self, errors: &Errors) -> Vec<String> {
        errors.iter().map(Self::describe).collect()
    }
}
