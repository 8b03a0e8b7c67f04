//! `jval`: validate JSON-like values against declarative key schemas.
//!
//! A schema lists the keys a value must carry (`expected`) and the keys it
//! may carry (`optional`). Each key declares a type and may restrict its
//! value to a set of literals, describe the keys of a nested object, or pick
//! a nested schema from the value of a sibling key.
//!
//! The [`validate`] and [`validate_from_source`] functions answer with a
//! plain `bool`; a [`Validator`] with a [`DiagnosticSink`] also reports why a
//! value was rejected.

/// Schema types, values, and schema document loading.
pub mod schema;

mod validator;

pub use schema::Value;
pub use validator::{
    CollectingSink, ConfigError, Diagnostic, DiagnosticSink, FailureStage, NestedDispatch,
    SilentSink, SourceError, TracingSink, Validator, ValidatorConfig, read_value, validate,
    validate_from_source,
};
