//! Post-deserialization well-formedness checks for schema documents.
//!
//! These checks enforce authoring rules that `serde` attributes cannot
//! express, such as "names are unique within a list" and "a conditional
//! names a sibling key". The entry point is [`check_schema`], called by the
//! loader after successful deserialization. Schemas built in code skip it;
//! the validator itself degrades malformed schemas to failed validations.

use indexmap::IndexSet;

use super::error::SchemaError;
use super::types::{ConditionalSpec, KeySpec, Schema, ValueType};

// ── Helpers ─────────────────────────────────────────────────────────

/// Returns `true` if the string is empty or contains only whitespace.
fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Constructs a [`SchemaError::Malformed`] at the given path.
fn fail(path: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::Malformed {
        path: path.to_owned(),
        reason: reason.into(),
    }
}

// ── Public entry point ──────────────────────────────────────────────

/// Checks a deserialized schema against the authoring rules.
///
/// Checks applied (in order, depth first):
///
/// - At least one of `expected` / `optional` declares a key.
/// - Every name is non-blank and unique within its list.
/// - `possible_values`, when given, is non-empty.
/// - Nested `expected` / `optional` and `conditional` only appear on
///   `object` keys, and `conditional` is never combined with nested
///   `expected`.
/// - `depends_on` is non-blank and names a sibling key.
/// - A conditional has at least one branch, and every branch declares a key.
///
/// # Errors
///
/// Returns [`SchemaError::Malformed`] with the dotted path of the offending
/// declaration on the first violation.
pub(crate) fn check_schema(schema: &Schema) -> Result<(), SchemaError> {
    if schema.is_empty() {
        return Err(fail(
            "<root>",
            "schema must declare at least one expected or optional key",
        ));
    }
    check_container(schema.expected(), schema.optional(), "")
}

// ── Individual checks ───────────────────────────────────────────────

/// Checks the two key lists describing one object.
fn check_container(
    expected: Option<&[KeySpec]>,
    optional: Option<&[KeySpec]>,
    prefix: &str,
) -> Result<(), SchemaError> {
    let siblings: IndexSet<&str> = expected
        .into_iter()
        .chain(optional)
        .flatten()
        .map(|spec| spec.name.as_str())
        .collect();
    if let Some(specs) = expected {
        check_list(specs, &join(prefix, "expected"), &siblings)?;
    }
    if let Some(specs) = optional {
        check_list(specs, &join(prefix, "optional"), &siblings)?;
    }
    Ok(())
}

fn check_list(specs: &[KeySpec], path: &str, siblings: &IndexSet<&str>) -> Result<(), SchemaError> {
    let mut seen = IndexSet::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let spec_path = format!("{path}[{i}]");
        if is_blank(&spec.name) {
            return Err(fail(&spec_path, "name must be non-empty after trimming"));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(fail(
                &spec_path,
                format!("duplicate key name '{}'", spec.name),
            ));
        }
        check_spec(spec, &spec_path, siblings)?;
    }
    Ok(())
}

fn check_spec(spec: &KeySpec, path: &str, siblings: &IndexSet<&str>) -> Result<(), SchemaError> {
    if spec.possible_values.as_ref().is_some_and(Vec::is_empty) {
        return Err(fail(path, "possible_values must not be empty"));
    }

    let has_nested = spec.expected.is_some() || spec.optional.is_some();
    if spec.value_type != ValueType::Object && (has_nested || spec.conditional.is_some()) {
        return Err(fail(
            path,
            format!(
                "nested or conditional keys require type object, found {}",
                spec.value_type.as_str()
            ),
        ));
    }

    if let Some(conditional) = &spec.conditional {
        if spec.expected.is_some() {
            return Err(fail(
                path,
                "conditional cannot be combined with nested expected keys",
            ));
        }
        check_conditional(conditional, path, siblings)?;
    }

    if has_nested {
        check_container(spec.expected.as_deref(), spec.optional.as_deref(), path)?;
    }
    Ok(())
}

fn check_conditional(
    conditional: &ConditionalSpec,
    path: &str,
    siblings: &IndexSet<&str>,
) -> Result<(), SchemaError> {
    let path = join(path, "conditional");
    if is_blank(&conditional.depends_on) {
        return Err(fail(&path, "depends_on must be non-empty after trimming"));
    }
    if !siblings.contains(conditional.depends_on.as_str()) {
        return Err(fail(
            &path,
            format!(
                "depends_on '{}' does not name a sibling key",
                conditional.depends_on
            ),
        ));
    }
    if conditional.dependence_info.is_empty() {
        return Err(fail(&path, "dependence_info must contain at least one branch"));
    }
    for (key, branch) in &conditional.dependence_info {
        let branch_path = format!("{path}.dependence_info[{key}]");
        let empty = branch.expected.as_ref().is_none_or(Vec::is_empty)
            && branch.optional.as_ref().is_none_or(Vec::is_empty);
        if empty {
            return Err(fail(
                &branch_path,
                "branch must declare at least one expected or optional key",
            ));
        }
        check_container(
            branch.expected.as_deref(),
            branch.optional.as_deref(),
            &branch_path,
        )?;
    }
    Ok(())
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use crate::schema::load_schema;

    /// Helper: load inline YAML and return the error string.
    fn load_err(yaml: &str) -> String {
        let result = load_schema(yaml);
        assert!(result.is_err(), "expected YAML to fail the schema checks");
        result.err().map(|e| e.to_string()).unwrap_or_default()
    }

    // ── Empty schemas ───────────────────────────────────────────────

    #[rstest]
    #[case::no_lists("{}")]
    #[case::empty_lists("expected: []\noptional: []\n")]
    fn empty_schema_is_rejected(#[case] yaml: &str) {
        let msg = load_err(yaml);
        assert!(msg.contains("at least one expected or optional key"), "got: {msg}");
    }

    // ── Names ───────────────────────────────────────────────────────

    #[test]
    fn blank_name_is_rejected() {
        let yaml = r#"
expected:
  - name: "  "
    type: string
"#;
        let msg = load_err(yaml);
        assert!(msg.contains("expected[0]"), "got: {msg}");
        assert!(msg.contains("name must be non-empty"), "got: {msg}");
    }

    #[test]
    fn duplicate_name_in_one_list_is_rejected() {
        let yaml = r"
optional:
  - name: host
    type: string
  - name: host
    type: integer
";
        let msg = load_err(yaml);
        assert!(msg.contains("optional[1]"), "got: {msg}");
        assert!(msg.contains("duplicate key name 'host'"), "got: {msg}");
    }

    #[test]
    fn same_name_in_both_lists_is_accepted() {
        let yaml = r"
expected:
  - name: host
    type: string
optional:
  - name: host
    type: string
";
        assert!(load_schema(yaml).is_ok());
    }

    #[test]
    fn empty_possible_values_are_rejected() {
        let yaml = r"
expected:
  - name: mode
    type: string
    possible_values: []
";
        let msg = load_err(yaml);
        assert!(msg.contains("possible_values must not be empty"), "got: {msg}");
    }

    // ── Nesting ─────────────────────────────────────────────────────

    #[test]
    fn nested_keys_on_a_string_are_rejected() {
        let yaml = r"
expected:
  - name: host
    type: string
    expected:
      - name: inner
        type: string
";
        let msg = load_err(yaml);
        assert!(msg.contains("require type object, found string"), "got: {msg}");
    }

    #[test]
    fn nested_errors_report_their_full_path() {
        let yaml = r"
expected:
  - name: store_info
    type: object
    expected:
      - name: host
        type: string
      - name: host
        type: string
";
        let msg = load_err(yaml);
        assert!(msg.contains("expected[0].expected[1]"), "got: {msg}");
    }

    // ── Conditionals ────────────────────────────────────────────────

    #[test]
    fn conditional_with_nested_expected_is_rejected() {
        let yaml = r"
expected:
  - name: kind
    type: string
  - name: info
    type: object
    expected:
      - name: a
        type: string
    conditional:
      depends_on: kind
      dependence_info:
        x:
          expected:
            - name: a
              type: string
";
        let msg = load_err(yaml);
        assert!(msg.contains("cannot be combined"), "got: {msg}");
    }

    #[test]
    fn conditional_on_unknown_sibling_is_rejected() {
        let yaml = r"
expected:
  - name: info
    type: object
    conditional:
      depends_on: kind
      dependence_info:
        x:
          expected:
            - name: a
              type: string
";
        let msg = load_err(yaml);
        assert!(msg.contains("does not name a sibling key"), "got: {msg}");
    }

    #[test]
    fn conditional_may_depend_on_an_optional_sibling() {
        let yaml = r"
expected:
  - name: info
    type: object
    conditional:
      depends_on: kind
      dependence_info:
        x:
          optional:
            - name: a
              type: string
optional:
  - name: kind
    type: string
";
        assert!(load_schema(yaml).is_ok());
    }

    #[test]
    fn empty_branch_is_rejected() {
        let yaml = r"
expected:
  - name: kind
    type: string
  - name: info
    type: object
    conditional:
      depends_on: kind
      dependence_info:
        x: {}
";
        let msg = load_err(yaml);
        assert!(msg.contains("dependence_info[x]"), "got: {msg}");
        assert!(msg.contains("branch must declare"), "got: {msg}");
    }
}
