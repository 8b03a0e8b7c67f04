//! Schema types, values, and schema loading.
//!
//! This module provides strongly-typed Rust representations of the
//! declarative key schemas and of the JSON-like values they describe.
//! Schema documents are deserialized using `serde-saphyr` with strict
//! unknown-key rejection and support for the legacy key aliases.

mod error;
mod loader;
mod location;
mod types;
mod validate;
mod value;

pub use error::SchemaError;
pub(crate) use loader::read_file;
pub use loader::{load_schema, load_schema_file, load_schema_with_source};
pub use location::SourceLocation;
pub use types::{Branch, ConditionalSpec, KeySpec, Schema, ValueType};
pub use value::Value;
