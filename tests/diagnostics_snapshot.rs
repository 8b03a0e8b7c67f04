//! Snapshot tests for rendered validation diagnostics.

mod common;

use common::{load_schema_fixture, load_value_fixture};
use jval::{CollectingSink, Validator};

fn render_diagnostic_for_fixture(fixture_name: &str) -> String {
    let schema = load_schema_fixture("store_schema.yaml");
    let value = load_value_fixture(fixture_name);
    let validator = Validator::with_sink(CollectingSink::default());
    assert!(
        !validator.validate_schema(&value, &schema),
        "fixture should fail"
    );
    let Some(diagnostic) = validator.sink().last() else {
        panic!("failed validations should record a diagnostic");
    };
    diagnostic.render()
}

#[test]
fn missing_expected_diagnostic_snapshot() {
    let actual = render_diagnostic_for_fixture("missing_expected.json");
    let expected = include_str!("snapshots/diagnostics/missing_expected.snap").trim_end();
    assert_eq!(actual, expected);
}

#[test]
fn unknown_key_in_branch_diagnostic_snapshot() {
    let actual = render_diagnostic_for_fixture("incorrect_nested.json");
    let expected = include_str!("snapshots/diagnostics/unknown_in_branch.snap").trim_end();
    assert_eq!(actual, expected);
}

#[test]
fn nested_type_diagnostic_snapshot() {
    let actual = render_diagnostic_for_fixture("incorrect_nested_type.json");
    let expected = include_str!("snapshots/diagnostics/nested_type.snap").trim_end();
    assert_eq!(actual, expected);
}
