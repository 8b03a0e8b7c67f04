//! Structured failure records and the sinks that receive them.
//!
//! Every failing branch of the validator emits exactly one [`Diagnostic`]
//! to the validator's [`DiagnosticSink`] before returning `false`. The sink
//! is injected; nothing is logged unless the caller asks for it.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Stable classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Neither expected nor optional keys were supplied.
    EmptySchema,
    /// The value handed to `validate` is not an object.
    NotAnObject,
    /// The object carries keys the schema does not declare.
    Unknown,
    /// Declared expected keys are absent.
    MissingExpected,
    /// Expected keys hold values of the wrong type.
    IncorrectType,
    /// A key's value is outside its possible values.
    IncorrectValue,
    /// An optional key holds a value of the wrong type.
    IncorrectOptionalType,
    /// A conditional's sibling key is missing or selects no branch.
    ConditionalLookup,
}

impl FailureStage {
    /// Returns the stable, machine-readable stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptySchema => "emptySchema",
            Self::NotAnObject => "notAnObject",
            Self::Unknown => "unknown",
            Self::MissingExpected => "missingExpected",
            Self::IncorrectType => "incorrectType",
            Self::IncorrectValue => "incorrectValue",
            Self::IncorrectOptionalType => "incorrectOptionalType",
            Self::ConditionalLookup => "conditionalLookup",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured failure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which check failed.
    pub stage: FailureStage,
    /// JSON-pointer-style path of the object being checked (`""` for the
    /// value passed to `validate`).
    pub path: String,
    /// The key names the failure is about, in schema or value order.
    pub names: Vec<String>,
}

impl Diagnostic {
    /// Renders the record into a deterministic single-line form.
    ///
    /// # Examples
    ///
    ///     use jval::{Diagnostic, FailureStage};
    ///
    ///     let diagnostic = Diagnostic {
    ///         stage: FailureStage::MissingExpected,
    ///         path: "/source_info".to_owned(),
    ///         names: vec!["connection_string".to_owned(), "container_name".to_owned()],
    ///     };
    ///     assert_eq!(
    ///         diagnostic.render(),
    ///         "missingExpected | /source_info | connection_string, container_name"
    ///     );
    #[must_use]
    pub fn render(&self) -> String {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        format!("{} | {} | {}", self.stage, path, self.names.join(", "))
    }
}

/// Receives failure records from a validator.
pub trait DiagnosticSink {
    /// Records one failure.
    fn record(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn record(&self, diagnostic: Diagnostic) {
        (**self).record(diagnostic);
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Forwards every record to `tracing` as a `WARN` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            stage = diagnostic.stage.as_str(),
            path = %diagnostic.path,
            names = ?diagnostic.names,
            "validation failed"
        );
    }
}

/// Keeps every record for later inspection.
///
/// # Examples
///
///     use jval::{CollectingSink, FailureStage, Validator, Value};
///
///     let validator = Validator::with_sink(CollectingSink::default());
///     assert!(!validator.validate(&Value::Null, None, None));
///     let stages: Vec<FailureStage> =
///         validator.sink().diagnostics().iter().map(|d| d.stage).collect();
///     assert_eq!(stages, vec![FailureStage::EmptySchema]);
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Returns a copy of the records collected so far, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Removes and returns every record collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
