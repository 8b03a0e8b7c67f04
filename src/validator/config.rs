//! Validator configuration.

use serde::Deserialize;

/// Errors raised while parsing a [`ValidatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid YAML or has unknown fields.
    #[error("invalid validator configuration: {message}")]
    Parse {
        /// The parser's error message.
        message: String,
    },
}

/// How a nested recursion inside a key list affects the rest of that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedDispatch {
    /// The first conditional key of an expected list, or the first object
    /// key with nested optional keys in an optional list, decides the whole
    /// list; later keys in that list are not checked.
    #[default]
    StopAtFirst,
    /// A passing recursion continues with the following keys; only a failure
    /// stops the list.
    ContinueAll,
}

/// Settings that change how a [`Validator`](super::Validator) walks a
/// schema.
///
/// # Examples
///
///     use jval::{NestedDispatch, ValidatorConfig};
///
///     let config = ValidatorConfig::from_yaml_str("nested_dispatch: continue_all").unwrap();
///     assert_eq!(config.nested_dispatch, NestedDispatch::ContinueAll);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Behaviour after a nested or conditional recursion succeeds.
    #[serde(default)]
    pub nested_dispatch: NestedDispatch,
}

impl ValidatorConfig {
    /// Returns a configuration with the given nested dispatch mode.
    #[must_use]
    pub const fn with_nested_dispatch(mut self, nested_dispatch: NestedDispatch) -> Self {
        self.nested_dispatch = nested_dispatch;
        self
    }

    /// Parses a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is malformed or has
    /// unknown fields.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(input).map_err(|error| ConfigError::Parse {
            message: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::stop("nested_dispatch: stop_at_first", NestedDispatch::StopAtFirst)]
    #[case::continue_all("nested_dispatch: continue_all", NestedDispatch::ContinueAll)]
    #[case::defaulted("{}", NestedDispatch::StopAtFirst)]
    fn parses_nested_dispatch(#[case] yaml: &str, #[case] expected: NestedDispatch) {
        let config = ValidatorConfig::from_yaml_str(yaml).expect("config should parse");
        assert_eq!(config.nested_dispatch, expected);
    }

    #[rstest]
    #[case::unknown_field("strict: true")]
    #[case::unknown_mode("nested_dispatch: sometimes")]
    fn rejects_bad_configuration(#[case] yaml: &str) {
        let Err(error) = ValidatorConfig::from_yaml_str(yaml) else {
            panic!("{yaml:?} should be rejected");
        };
        let message = error.to_string();
        assert!(
            message.starts_with("invalid validator configuration"),
            "got: {message}"
        );
        assert!(!message.contains("schema"), "got: {message}");
    }
}
