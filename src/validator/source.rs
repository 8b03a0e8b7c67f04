//! Reading values from files.
//!
//! This is the only place the crate touches the file system on behalf of
//! the validator. Reading and parsing happen before any validation, and
//! their failures are errors rather than `false`.

use camino::{Utf8Path, Utf8PathBuf};

use crate::schema::{Value, read_file};

/// Errors raised while turning a file into a [`Value`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// The path that was being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON or YAML.
    #[error("failed to parse '{path}': {message}")]
    Parse {
        /// The path that was being parsed.
        path: Utf8PathBuf,
        /// The parser's error message.
        message: String,
    },
}

/// Reads and parses a value file.
///
/// Files with a `yaml` or `yml` extension are parsed with `serde-saphyr`;
/// everything else is parsed as JSON.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if the file cannot be read and
/// [`SourceError::Parse`] if its contents do not parse.
pub fn read_value(path: &Utf8Path) -> Result<Value, SourceError> {
    let bytes = read_file(path).map_err(|source| SourceError::Read {
        path: path.to_owned(),
        source,
    })?;
    let parse_error = |message: String| SourceError::Parse {
        path: path.to_owned(),
        message,
    };

    if is_yaml(path) {
        let text = std::str::from_utf8(&bytes).map_err(|error| parse_error(error.to_string()))?;
        serde_saphyr::from_str(text).map_err(|error| parse_error(error.to_string()))
    } else {
        serde_json::from_slice(&bytes).map_err(|error| parse_error(error.to_string()))
    }
}

fn is_yaml(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|extension| matches!(extension.to_ascii_lowercase().as_str(), "yaml" | "yml"))
}
