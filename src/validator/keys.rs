//! Permitted-key sets and unknown-key detection.

use indexmap::{IndexMap, IndexSet};

use crate::schema::{KeySpec, Value};

/// Collects the names declared by either key list.
///
/// A name declared in both lists appears once. Absent lists contribute
/// nothing, so two absent lists give the empty set.
pub(crate) fn valid_key_names<'s>(
    expected: Option<&'s [KeySpec]>,
    optional: Option<&'s [KeySpec]>,
) -> IndexSet<&'s str> {
    expected
        .into_iter()
        .chain(optional)
        .flatten()
        .map(|spec| spec.name.as_str())
        .collect()
}

/// Returns the keys of `object` that are not in `valid`, in the object's
/// key order.
pub(crate) fn unknown_keys<'v>(
    object: &'v IndexMap<String, Value>,
    valid: &IndexSet<&str>,
) -> Vec<&'v str> {
    object
        .keys()
        .map(String::as_str)
        .filter(|key| !valid.contains(key))
        .collect()
}
