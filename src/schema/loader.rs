//! Schema document loading.
//!
//! Provides [`load_schema`] which deserializes a YAML (or JSON, being a YAML
//! subset) schema document with strict unknown-key rejection, then enforces
//! the authoring rules post-deserialization.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::SchemaError;
use super::location::SourceLocation;
use super::types::Schema;
use super::validate::check_schema;

/// Synthetic source identifier used by [`load_schema`].
const INLINE_SOURCE: &str = "<inline>";

/// Loads a schema from a YAML or JSON string.
///
/// Unknown fields are rejected at every level, and the legacy key names
/// (`param_name`, `param_type`, `expected_keys`, `optional_keys`,
/// `conditional_keys`) are accepted as aliases. After deserialization the
/// schema must declare at least one key, use unique non-blank names per
/// list, and only attach nested or conditional keys to `object` keys.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if the text is malformed or does not
/// match the schema shape. Returns [`SchemaError::Malformed`] if an authoring
/// rule is violated.
///
/// # Examples
///
///     use jval::schema::{load_schema, ValueType};
///
///     let yaml = r#"
///     expected:
///       - param_name: port
///         param_type: int
///     "#;
///     let schema = load_schema(yaml).unwrap();
///     let expected = schema.expected.unwrap();
///     assert_eq!(expected[0].value_type, ValueType::Integer);
pub fn load_schema(input: &str) -> Result<Schema, SchemaError> {
    load_schema_with_source(INLINE_SOURCE, input)
}

/// Loads a schema and records parse locations against an explicit source
/// identifier.
///
/// # Errors
///
/// Same as [`load_schema`].
pub fn load_schema_with_source(source: &str, input: &str) -> Result<Schema, SchemaError> {
    let schema: Schema = serde_saphyr::from_str(input).map_err(|error| {
        let message = error.to_string();
        let location = error
            .location()
            .map(|location| location_for_source(source, location));
        SchemaError::Deserialize {
            message: first_line(&message),
            location,
        }
    })?;
    check_schema(&schema)?;
    Ok(schema)
}

/// Reads and loads a schema file.
///
/// # Errors
///
/// Returns [`SchemaError::Read`] if the file cannot be read, otherwise the
/// errors of [`load_schema`].
pub fn load_schema_file(path: &Utf8Path) -> Result<Schema, SchemaError> {
    let read_error = |source| SchemaError::Read {
        path: path.to_string(),
        source,
    };
    let text = read_utf8_file(path).map_err(read_error)?;
    load_schema_with_source(path.as_str(), &text)
}

/// Reads a whole UTF-8 file through a capability handle on its parent
/// directory.
fn read_utf8_file(path: &Utf8Path) -> std::io::Result<String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
}

/// Reads a whole file through a capability handle on its parent directory.
pub(crate) fn read_file(path: &Utf8Path) -> std::io::Result<Vec<u8>> {
    let Some(file_name) = path.file_name() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{path}' does not name a file"),
        ));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}

fn location_for_source(source: &str, location: serde_saphyr::Location) -> SourceLocation {
    let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
    let column = usize::try_from(location.column())
        .ok()
        .unwrap_or(usize::MAX);
    SourceLocation {
        source: source.to_owned(),
        line,
        column,
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
