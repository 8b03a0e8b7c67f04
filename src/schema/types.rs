//! Strongly-typed schema structs.
//!
//! A [`Schema`] is a pair of key lists. Each [`KeySpec`] names one key,
//! gives its [`ValueType`], and may refine it with possible values, nested
//! key lists, or a [`ConditionalSpec`]. Deserialization uses
//! `serde(deny_unknown_fields)` and accepts the legacy key names
//! (`param_name`, `param_type`, `expected_keys`, `optional_keys`,
//! `conditional_keys`) as aliases.

use indexmap::IndexMap;
use serde::Deserialize;

use super::value::Value;

// ── Value types ─────────────────────────────────────────────────────

/// The closed set of runtime types a key may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// A string value.
    #[serde(alias = "str")]
    String,
    /// An integral number.
    #[serde(alias = "int")]
    Integer,
    /// A non-integral number.
    Float,
    /// `true` or `false`.
    #[serde(alias = "bool")]
    Boolean,
    /// A string-keyed mapping.
    #[serde(alias = "dict")]
    Object,
    /// A sequence.
    #[serde(alias = "list")]
    Array,
    /// The null literal.
    #[serde(alias = "none")]
    Null,
    /// Any value at all.
    Any,
}

impl ValueType {
    /// Returns `true` when `value` is of this type.
    ///
    /// # Examples
    ///
    ///     use jval::schema::{Value, ValueType};
    ///
    ///     assert!(ValueType::Integer.matches(&Value::Integer(3)));
    ///     assert!(!ValueType::Integer.matches(&Value::Bool(true)));
    ///     assert!(ValueType::Any.matches(&Value::Null));
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::String, Value::String(_))
                | (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Object, Value::Object(_))
                | (Self::Array, Value::Array(_))
                | (Self::Null, Value::Null)
        )
    }

    /// Returns the concrete type of `value`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Integer(_) => Self::Integer,
            Value::Float(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name used in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Any => "any",
        }
    }
}

// ── Schema ──────────────────────────────────────────────────────────

/// A complete schema: the keys a value must carry and the keys it may carry.
///
/// # Examples
///
///     use jval::schema::load_schema;
///
///     let yaml = r#"
///     expected:
///       - name: store_type
///         type: string
///         possible_values: [pg, mysql]
///     optional:
///       - name: comment
///         type: string
///     "#;
///     let schema = load_schema(yaml).unwrap();
///     assert_eq!(schema.expected.map(|keys| keys.len()), Some(1));
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Keys that must be present.
    #[serde(alias = "expected_keys", default)]
    pub expected: Option<Vec<KeySpec>>,
    /// Keys that may be present.
    #[serde(alias = "optional_keys", default)]
    pub optional: Option<Vec<KeySpec>>,
}

impl Schema {
    /// Creates a schema from its two key lists.
    #[must_use]
    pub const fn new(expected: Option<Vec<KeySpec>>, optional: Option<Vec<KeySpec>>) -> Self {
        Self { expected, optional }
    }

    /// Returns the expected key list as a slice.
    #[must_use]
    pub fn expected(&self) -> Option<&[KeySpec]> {
        self.expected.as_deref()
    }

    /// Returns the optional key list as a slice.
    #[must_use]
    pub fn optional(&self) -> Option<&[KeySpec]> {
        self.optional.as_deref()
    }

    /// Returns `true` if neither list declares a single key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expected.as_ref().is_none_or(Vec::is_empty)
            && self.optional.as_ref().is_none_or(Vec::is_empty)
    }
}

// ── Key specs ───────────────────────────────────────────────────────

/// The declaration of a single key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeySpec {
    /// The key's name in the containing object.
    #[serde(alias = "param_name")]
    pub name: String,
    /// The runtime type the key's value must have.
    #[serde(rename = "type", alias = "param_type")]
    pub value_type: ValueType,
    /// An allow-list of literal values.
    #[serde(alias = "possibleValues", default)]
    pub possible_values: Option<Vec<Value>>,
    /// Keys that must be present in the nested object.
    #[serde(alias = "expected_keys", default)]
    pub expected: Option<Vec<Self>>,
    /// Keys that may be present in the nested object.
    #[serde(alias = "optional_keys", default)]
    pub optional: Option<Vec<Self>>,
    /// Nested keys chosen by the value of a sibling key.
    #[serde(alias = "conditional_keys", default)]
    pub conditional: Option<ConditionalSpec>,
}

impl KeySpec {
    /// Creates a plain key declaration with no refinements.
    ///
    /// # Examples
    ///
    ///     use jval::schema::{KeySpec, ValueType};
    ///
    ///     let port = KeySpec::new("port", ValueType::Integer);
    ///     assert_eq!(port.name, "port");
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            possible_values: None,
            expected: None,
            optional: None,
            conditional: None,
        }
    }

    /// Restricts the key to the given literal values.
    #[must_use]
    pub fn with_possible_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.possible_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Declares the keys a nested object must carry.
    #[must_use]
    pub fn with_expected(mut self, expected: Vec<Self>) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Declares the keys a nested object may carry.
    #[must_use]
    pub fn with_optional(mut self, optional: Vec<Self>) -> Self {
        self.optional = Some(optional);
        self
    }

    /// Attaches a conditional sub-schema.
    #[must_use]
    pub fn with_conditional(mut self, conditional: ConditionalSpec) -> Self {
        self.conditional = Some(conditional);
        self
    }
}

// ── Conditional specs ───────────────────────────────────────────────

/// Selects a nested schema from the value of a sibling key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalSpec {
    /// The sibling key whose value picks the branch.
    #[serde(alias = "dependsOn")]
    pub depends_on: String,
    /// Branches keyed by the sibling value's text.
    #[serde(alias = "dependenceInfo")]
    pub dependence_info: IndexMap<String, Branch>,
}

impl ConditionalSpec {
    /// Creates a conditional with no branches.
    #[must_use]
    pub fn new(depends_on: impl Into<String>) -> Self {
        Self {
            depends_on: depends_on.into(),
            dependence_info: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the branch selected by `key`.
    #[must_use]
    pub fn branch(mut self, key: impl Into<String>, branch: Branch) -> Self {
        self.dependence_info.insert(key.into(), branch);
        self
    }

    /// Returns the branch selected by a sibling value, if any.
    #[must_use]
    pub fn branch_for(&self, selector: &Value) -> Option<&Branch> {
        selector
            .branch_key()
            .and_then(|key| self.dependence_info.get(&key))
    }
}

/// One arm of a [`ConditionalSpec`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch {
    /// Keys that must be present in the nested object.
    #[serde(alias = "expected_keys", default)]
    pub expected: Option<Vec<KeySpec>>,
    /// Keys that may be present in the nested object.
    #[serde(alias = "optional_keys", default)]
    pub optional: Option<Vec<KeySpec>>,
}

impl Branch {
    /// Creates a branch from its two key lists.
    #[must_use]
    pub const fn new(expected: Vec<KeySpec>, optional: Vec<KeySpec>) -> Self {
        Self {
            expected: Some(expected),
            optional: Some(optional),
        }
    }
}
