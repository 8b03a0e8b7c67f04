//! The recursive schema validator.
//!
//! [`Validator::validate`] builds the permitted key set, rejects unknown
//! keys, and then runs the optional and expected checks. Conditional keys
//! re-enter `validate` on the nested object with the branch selected by a
//! sibling value, so every conditional branch gets its own unknown-key
//! check. Failures are reported as `false` plus one [`Diagnostic`] sent to
//! the validator's sink.

mod config;
mod diagnostic;
mod expected;
mod keys;
mod optional;
mod source;

use camino::Utf8Path;

pub use config::{ConfigError, NestedDispatch, ValidatorConfig};
pub use diagnostic::{
    CollectingSink, Diagnostic, DiagnosticSink, FailureStage, SilentSink, TracingSink,
};
pub use source::{SourceError, read_value};

use crate::schema::{KeySpec, Schema, Value};
use keys::{unknown_keys, valid_key_names};

/// Checks values against key schemas.
///
/// A validator holds no per-call state: it can be reused for any number of
/// values and shared between threads whenever its sink is `Sync`.
///
/// # Examples
///
///     use jval::schema::{KeySpec, ValueType};
///     use jval::{Validator, Value};
///     use serde_json::json;
///
///     let expected = vec![
///         KeySpec::new("store_type", ValueType::String).with_possible_values(["pg", "mysql"]),
///     ];
///     let validator = Validator::new();
///     let good = Value::from(json!({"store_type": "pg"}));
///     let bad = Value::from(json!({"store_type": "sqlite"}));
///     assert!(validator.validate(&good, Some(expected.as_slice()), None));
///     assert!(!validator.validate(&bad, Some(expected.as_slice()), None));
#[derive(Debug, Clone, Default)]
pub struct Validator<S = SilentSink> {
    config: ValidatorConfig,
    sink: S,
}

impl Validator<SilentSink> {
    /// Creates a validator with the default configuration that discards its
    /// diagnostics.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_sink(SilentSink)
    }
}

impl<S: DiagnosticSink> Validator<S> {
    /// Creates a validator that reports failures to `sink`.
    #[must_use]
    pub const fn with_sink(sink: S) -> Self {
        Self {
            config: ValidatorConfig {
                nested_dispatch: NestedDispatch::StopAtFirst,
            },
            sink,
        }
    }

    /// Replaces the validator's configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns the diagnostics sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Validates `value` against the given expected and optional key lists.
    ///
    /// Returns `false` when neither list declares a key, when `value` is not
    /// an object, when it carries an undeclared key, or when the optional
    /// or expected check fails. With both lists the optional check runs
    /// first and a failure there skips the expected check.
    #[must_use]
    pub fn validate(
        &self,
        value: &Value,
        expected: Option<&[KeySpec]>,
        optional: Option<&[KeySpec]>,
    ) -> bool {
        self.validate_at(value, expected, optional, "")
    }

    /// Validates `value` against a [`Schema`].
    #[must_use]
    pub fn validate_schema(&self, value: &Value, schema: &Schema) -> bool {
        self.validate(value, schema.expected(), schema.optional())
    }

    /// Reads `path`, parses it, and validates the result.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the file cannot be read or parsed. A
    /// parsed value that fails validation is `Ok(false)`, not an error.
    pub fn validate_from_source(
        &self,
        path: &Utf8Path,
        expected: Option<&[KeySpec]>,
        optional: Option<&[KeySpec]>,
    ) -> Result<bool, SourceError> {
        let value = read_value(path)?;
        Ok(self.validate(&value, expected, optional))
    }

    fn validate_at(
        &self,
        value: &Value,
        expected: Option<&[KeySpec]>,
        optional: Option<&[KeySpec]>,
        path: &str,
    ) -> bool {
        let valid = valid_key_names(expected, optional);
        if valid.is_empty() {
            self.report(FailureStage::EmptySchema, path, Vec::<&str>::new());
            return false;
        }
        let Some(object) = value.as_object() else {
            self.report(FailureStage::NotAnObject, path, Vec::<&str>::new());
            return false;
        };
        let unknown = unknown_keys(object, &valid);
        if !unknown.is_empty() {
            self.report(FailureStage::Unknown, path, unknown);
            return false;
        }
        match (expected, optional) {
            (Some(expected), Some(optional)) => {
                self.check_optional(object, optional, path)
                    && self.check_expected(object, expected, path)
            }
            (Some(expected), None) => self.check_expected(object, expected, path),
            (None, Some(optional)) => self.check_optional(object, optional, path),
            (None, None) => true,
        }
    }

    fn report<I, N>(&self, stage: FailureStage, path: &str, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.sink.record(Diagnostic {
            stage,
            path: path.to_owned(),
            names: names.into_iter().map(Into::into).collect(),
        });
    }

    const fn stops_at_first(&self) -> bool {
        matches!(self.config.nested_dispatch, NestedDispatch::StopAtFirst)
    }
}

/// Appends `name` to a JSON-pointer-style path.
fn child_path(path: &str, name: &str) -> String {
    format!("{path}/{}", name.replace('~', "~0").replace('/', "~1"))
}

/// Validates `value` with a default, silent validator.
///
/// # Examples
///
///     use jval::schema::{KeySpec, ValueType};
///     use jval::Value;
///     use serde_json::json;
///
///     let optional = vec![KeySpec::new("dir_path", ValueType::String)];
///     assert!(jval::validate(&Value::from(json!({})), None, Some(optional.as_slice())));
///     assert!(!jval::validate(&Value::from(json!({"dir_path": 3})), None, Some(optional.as_slice())));
#[must_use]
pub fn validate(value: &Value, expected: Option<&[KeySpec]>, optional: Option<&[KeySpec]>) -> bool {
    Validator::new().validate(value, expected, optional)
}

/// Reads, parses, and validates a file with a default, silent validator.
///
/// # Errors
///
/// Returns [`SourceError`] when the file cannot be read or parsed.
pub fn validate_from_source(
    path: &Utf8Path,
    expected: Option<&[KeySpec]>,
    optional: Option<&[KeySpec]>,
) -> Result<bool, SourceError> {
    Validator::new().validate_from_source(path, expected, optional)
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
