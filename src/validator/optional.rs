//! The optional-key check.

use indexmap::IndexMap;

use super::{DiagnosticSink, FailureStage, Validator, child_path};
use crate::schema::{KeySpec, Value, ValueType};

impl<S: DiagnosticSink> Validator<S> {
    /// Checks the optional keys that are present in `object`.
    ///
    /// Absent keys are skipped. The first present key with the wrong type
    /// fails the check. An `object` key carrying nested optional keys is
    /// checked recursively; under
    /// [`NestedDispatch::StopAtFirst`](super::NestedDispatch) that recursion
    /// decides the whole list.
    pub(super) fn check_optional(
        &self,
        object: &IndexMap<String, Value>,
        specs: &[KeySpec],
        path: &str,
    ) -> bool {
        for spec in specs {
            let Some(value) = object.get(&spec.name) else {
                continue;
            };

            if !spec.value_type.matches(value) {
                tracing::debug!(
                    key = %spec.name,
                    declared = spec.value_type.as_str(),
                    found = ValueType::of(value).as_str(),
                    "optional key has the wrong type"
                );
                self.report(
                    FailureStage::IncorrectOptionalType,
                    path,
                    [spec.name.as_str()],
                );
                return false;
            }

            if spec.value_type != ValueType::Object {
                continue;
            }
            let (Some(nested_specs), Some(nested)) = (&spec.optional, value.as_object()) else {
                continue;
            };

            let nested_path = child_path(path, &spec.name);
            tracing::debug!(path = %nested_path, "checking nested optional keys");
            let passed = self.check_optional(nested, nested_specs, &nested_path);
            if self.stops_at_first() || !passed {
                return passed;
            }
        }

        true
    }
}
