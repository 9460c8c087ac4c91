// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URL parameter overrides.
//!
//! Override values are loosely typed: whatever arrives from a query string or a
//! caller-built map is coerced to a boolean when it is applied. Only features
//! that are already known are affected; an override never creates a feature.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mapping from feature name to a loosely-typed override value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlParameters(BTreeMap<String, Value>);

impl UrlParameters {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses an `application/x-www-form-urlencoded` query string.
	///
	/// A leading `?` is ignored. Every value is kept as a string; a bare key
	/// yields the empty string, which coerces to disabled. Later duplicates win.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		url::form_urlencoded::parse(query.as_bytes())
			.map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
			.collect()
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(name.into(), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
		self.0.iter()
	}
}

impl FromIterator<(String, Value)> for UrlParameters {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Coerces an override value to an enabled state.
///
/// Disabled for `null`, `false`, zero, the empty string and the literal
/// string `"false"`. Everything else is enabled, including the string `"0"`.
pub fn coerce_enabled(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
		Value::String(s) => !(s.is_empty() || s == "false"),
		Value::Array(_) | Value::Object(_) => true,
	}
}
