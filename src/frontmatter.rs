//! Typed accessors over the untyped frontmatter mapping.
//!
//! Frontmatter decodes into an untyped key-value map first; these accessors
//! narrow individual entries to the types the task codec needs. A value that
//! is present but of the wrong type behaves exactly like an absent value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_yaml::Value;

/// Frontmatter metadata as an untyped key-value mapping.
///
/// `BTreeMap` keeps serialization order deterministic.
pub type Frontmatter = BTreeMap<String, Value>;

/// Extract a string value. `None` if the key is absent or not a string.
pub fn get_string(fm: &Frontmatter, key: &str) -> Option<String> {
    match fm.get(key) {
        Some(Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}

/// Extract a boolean value. `None` if the key is absent or not a boolean.
pub fn get_bool(fm: &Frontmatter, key: &str) -> Option<bool> {
    match fm.get(key) {
        Some(Value::Bool(value)) => Some(*value),
        _ => None,
    }
}

/// Extract a timestamp value.
///
/// The value must be a string in strict RFC 3339 format; anything else,
/// including date-only strings, yields `None`.
pub fn get_time(fm: &Frontmatter, key: &str) -> Option<DateTime<Utc>> {
    let raw = match fm.get(key) {
        Some(Value::String(value)) => value,
        _ => return None,
    };
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
