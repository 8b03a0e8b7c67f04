//! Shared test helpers for integration tests.

#![expect(dead_code, reason = "each test crate uses a different subset of helpers")]

use camino::Utf8PathBuf;
use jval::Value;
use jval::schema::{Schema, load_schema_with_source};

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Returns the path of a fixture file.
pub fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("tests/fixtures/{name}"))
}

/// Loads and checks a schema fixture.
///
/// # Panics
///
/// Panics if the fixture cannot be read or is not a valid schema.
pub fn load_schema_fixture(name: &str) -> Schema {
    let source = fixture_path(name);
    load_schema_with_source(source.as_str(), &load_fixture(name))
        .unwrap_or_else(|e| panic!("failed to load schema fixture {name}: {e}"))
}

/// Parses a JSON value fixture.
///
/// # Panics
///
/// Panics if the fixture cannot be read or is not valid JSON.
pub fn load_value_fixture(name: &str) -> Value {
    serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("failed to parse value fixture {name}: {e}"))
}
