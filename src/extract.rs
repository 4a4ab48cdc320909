//! Dotted-path lookups over decoded JSON responses.
//!
//! Providers describe identity fields as `.`-separated key paths (`user_id`,
//! `account.details.domain`). Lookups only descend through JSON objects; a missing key or a
//! non-object intermediate resolves to the caller's default instead of an error, because
//! identity payloads are best-effort by nature.

// self
use crate::_prelude::*;

/// Separator used between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Returns the value addressed by `path`, or `None` when any segment is missing.
///
/// An empty `path` addresses `value` itself. Segments only traverse object keys; there is
/// no array indexing, so `items.0` looks up the key `"0"` and fails on arrays.
pub fn extract<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
	if path.is_empty() {
		return Some(value);
	}

	let mut current = value;

	for segment in path.split(PATH_SEPARATOR) {
		match current {
			Value::Object(map) => current = map.get(segment)?,
			_ => return None,
		}
	}

	Some(current)
}

/// Same as [`extract`] but falls back to `default` for missing paths.
///
/// Only a missing key triggers the fallback: a key present with JSON `null` yields `null`,
/// unlike an `isset`-style check that would treat it as absent.
pub fn extract_or<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
	extract(value, path).unwrap_or(default)
}
