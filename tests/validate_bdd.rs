//! Behaviour-driven tests for whole-document validation.
//!
//! These tests use `rstest` parameterization to express Given/When/Then
//! acceptance criteria against the source/store fixture corpus.

mod common;

use common::{load_schema_fixture, load_value_fixture};
use jval::schema::Schema;
use jval::{CollectingSink, FailureStage, Validator};
use rstest::{fixture, rstest};

#[fixture]
fn store_schema() -> Schema {
    load_schema_fixture("store_schema.yaml")
}

// ── Given a conforming document, validation succeeds ────────────────

#[rstest]
#[case::current_names("store_schema.yaml")]
#[case::legacy_names("legacy_store_schema.yaml")]
fn given_a_valid_document_when_validated_as_expected_then_it_passes(#[case] schema_name: &str) {
    let schema = load_schema_fixture(schema_name);
    let value = load_value_fixture("valid_store.json");
    assert!(Validator::new().validate(&value, schema.expected(), None));
}

#[rstest]
fn given_a_valid_document_when_validated_as_optional_then_it_passes(store_schema: Schema) {
    let value = load_value_fixture("valid_store.json");
    assert!(Validator::new().validate(&value, None, store_schema.expected()));
}

#[rstest]
fn given_a_json_schema_with_camel_case_names_when_validating_then_it_applies() {
    let schema = load_schema_fixture("store_schema.json");
    let valid = load_value_fixture("valid_store.json");
    let mistyped = load_value_fixture("incorrect_optional_type.json");
    let validator = Validator::new();
    assert!(validator.validate_schema(&valid, &schema));
    assert!(!validator.validate_schema(&mistyped, &schema));
}

// ── Given a broken document, validation fails at the right stage ────

#[rstest]
#[case::missing_expected("missing_expected.json", FailureStage::MissingExpected, "", &["source_type"])]
#[case::incorrect_possible("incorrect_possible.json", FailureStage::IncorrectValue, "", &["source_type"])]
#[case::incorrect_type(
    "incorrect_type.json",
    FailureStage::IncorrectType,
    "/source_info",
    &["connection_string"]
)]
#[case::incorrect_nested(
    "incorrect_nested.json",
    FailureStage::Unknown,
    "/source_info",
    &["connection_stringg"]
)]
#[case::incorrect_nested_type(
    "incorrect_nested_type.json",
    FailureStage::IncorrectType,
    "/store_info",
    &["port"]
)]
#[case::incorrect_top_level_type(
    "incorrect_optional_type.json",
    FailureStage::IncorrectType,
    "",
    &["source_type"]
)]
fn given_a_broken_document_when_validated_as_expected_then_the_failure_is_attributed(
    store_schema: Schema,
    #[case] fixture: &str,
    #[case] stage: FailureStage,
    #[case] path: &str,
    #[case] names: &[&str],
) {
    let value = load_value_fixture(fixture);
    let validator = Validator::with_sink(CollectingSink::default());
    assert!(
        !validator.validate(&value, store_schema.expected(), None),
        "expected {fixture} to fail validation"
    );

    let diagnostics = validator.sink().diagnostics();
    assert_eq!(diagnostics.len(), 1, "one record per failure: {diagnostics:?}");
    let Some(diagnostic) = diagnostics.first() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.stage, stage);
    assert_eq!(diagnostic.path, path);
    assert_eq!(diagnostic.names, names);
}

#[rstest]
fn given_a_mistyped_optional_key_when_validated_as_optional_then_it_fails(store_schema: Schema) {
    let value = load_value_fixture("incorrect_optional_type.json");
    let validator = Validator::with_sink(CollectingSink::default());
    assert!(!validator.validate(&value, None, store_schema.expected()));
    assert_eq!(
        validator.sink().last().map(|d| d.render()),
        Some("incorrectOptionalType | / | source_type".to_owned())
    );
}

// ── Given no schema, validation always fails ────────────────────────

#[rstest]
#[case::valid_document("valid_store.json")]
#[case::broken_document("incorrect_nested.json")]
fn given_an_empty_schema_when_validating_then_it_fails(#[case] fixture: &str) {
    let value = load_value_fixture(fixture);
    assert!(!jval::validate(&value, None, None));
}
