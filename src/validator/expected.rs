//! The expected-key check: presence, type, possible values, then nested and
//! conditional recursion.

use indexmap::IndexMap;

use super::{DiagnosticSink, FailureStage, Validator, child_path};
use crate::schema::{ConditionalSpec, KeySpec, Value, ValueType};

impl<S: DiagnosticSink> Validator<S> {
    /// Checks that every spec in `specs` is satisfied by `object`.
    ///
    /// Stages run in order and stop at the first failing stage:
    ///
    /// 1. Presence: all missing names are reported together.
    /// 2. Type: all mistyped names are reported together.
    /// 3. Refinements, spec by spec in declaration order: possible values,
    ///    then for `object` keys either nested expected keys or, failing
    ///    that, a conditional branch.
    ///
    /// Under [`NestedDispatch::StopAtFirst`](super::NestedDispatch) the
    /// result of the first conditional branch is the result of the whole
    /// check.
    pub(super) fn check_expected(
        &self,
        object: &IndexMap<String, Value>,
        specs: &[KeySpec],
        path: &str,
    ) -> bool {
        let missing: Vec<&str> = specs
            .iter()
            .filter(|spec| !object.contains_key(&spec.name))
            .map(|spec| spec.name.as_str())
            .collect();
        if !missing.is_empty() {
            self.report(FailureStage::MissingExpected, path, missing);
            return false;
        }

        let mistyped: Vec<&str> = specs
            .iter()
            .filter(|spec| {
                object
                    .get(&spec.name)
                    .is_some_and(|value| !spec.value_type.matches(value))
            })
            .map(|spec| spec.name.as_str())
            .collect();
        if !mistyped.is_empty() {
            self.report(FailureStage::IncorrectType, path, mistyped);
            return false;
        }

        for spec in specs {
            let Some(value) = object.get(&spec.name) else {
                continue;
            };

            if let Some(allowed) = &spec.possible_values {
                if !allowed.contains(value) {
                    self.report(FailureStage::IncorrectValue, path, [spec.name.as_str()]);
                    return false;
                }
            }

            if spec.value_type != ValueType::Object {
                continue;
            }
            let Some(nested) = value.as_object() else {
                continue;
            };

            if let Some(nested_specs) = &spec.expected {
                let nested_path = child_path(path, &spec.name);
                tracing::debug!(path = %nested_path, "checking nested expected keys");
                if !self.check_expected(nested, nested_specs, &nested_path) {
                    return false;
                }
            } else if let Some(conditional) = &spec.conditional {
                let passed = self.check_conditional(object, spec, value, conditional, path);
                if self.stops_at_first() || !passed {
                    return passed;
                }
            }
        }

        true
    }

    /// Selects the branch named by the sibling `depends_on` value and
    /// re-enters full validation on the nested value.
    fn check_conditional(
        &self,
        object: &IndexMap<String, Value>,
        spec: &KeySpec,
        nested: &Value,
        conditional: &ConditionalSpec,
        path: &str,
    ) -> bool {
        let Some(selector) = object.get(&conditional.depends_on) else {
            self.report(
                FailureStage::ConditionalLookup,
                path,
                [conditional.depends_on.as_str()],
            );
            return false;
        };
        let Some(branch) = conditional.branch_for(selector) else {
            self.report(
                FailureStage::ConditionalLookup,
                path,
                [conditional.depends_on.as_str(), spec.name.as_str()],
            );
            return false;
        };

        let nested_path = child_path(path, &spec.name);
        tracing::debug!(
            path = %nested_path,
            depends_on = %conditional.depends_on,
            branch = ?selector.branch_key(),
            "dispatching conditional branch"
        );
        self.validate_at(
            nested,
            branch.expected.as_deref(),
            branch.optional.as_deref(),
            &nested_path,
        )
    }
}
