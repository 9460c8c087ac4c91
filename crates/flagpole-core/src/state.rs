// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature state records and the feature map they live in.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

const ENABLED: &str = "enabled";

/// State of a single feature.
///
/// `enabled` is the only attribute the store interprets. Any other attributes
/// from the configuration are kept in `params` and survive every transition.
/// A param named `enabled` never shadows the real state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureState {
	pub enabled: bool,
	#[serde(flatten)]
	pub params: Map<String, Value>,
}

impl FeatureState {
	pub fn new(enabled: bool) -> Self {
		Self {
			enabled,
			params: Map::new(),
		}
	}

	pub fn enabled() -> Self {
		Self::new(true)
	}

	pub fn disabled() -> Self {
		Self::new(false)
	}

	/// Adds an opaque parameter to this feature. The key `enabled` is ignored.
	pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
		let key = key.into();
		if key != ENABLED {
			self.params.insert(key, value);
		}
		self
	}

	/// Returns the flat attribute object: `enabled` plus every param.
	pub fn to_attributes(&self) -> Map<String, Value> {
		let mut attributes: Map<String, Value> = self
			.params
			.iter()
			.filter(|(key, _)| key.as_str() != ENABLED)
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();
		attributes.insert(ENABLED.to_string(), Value::Bool(self.enabled));
		attributes
	}
}

impl Serialize for FeatureState {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_attributes().serialize(serializer)
	}
}

/// Mapping from feature name to its state.
///
/// Transitions never mutate a published map; they clone it and return the
/// result, so a snapshot held by a reader stays valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, FeatureState>);

impl FeatureMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&FeatureState> {
		self.0.get(name)
	}

	/// Returns true if `name` is a known feature, regardless of its state.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, FeatureState> {
		self.0.iter()
	}

	/// Inserts or replaces the whole record for `name`.
	pub fn insert(&mut self, name: impl Into<String>, state: FeatureState) -> Option<FeatureState> {
		self.0.insert(name.into(), state)
	}

	/// Sets `enabled` on the record for `name`, creating it if absent.
	///
	/// Params of an existing record are left untouched.
	pub fn set_enabled(&mut self, name: &str, enabled: bool) {
		match self.0.get_mut(name) {
			Some(state) => state.enabled = enabled,
			None => {
				self.0.insert(name.to_string(), FeatureState::new(enabled));
			}
		}
	}

	/// Returns a new map with the records of `overlay` laid over `self`.
	///
	/// Records are replaced whole: an overlaid feature keeps none of the
	/// params it had in `self`.
	pub fn merge(&self, overlay: &FeatureMap) -> FeatureMap {
		let mut merged = self.clone();
		for (name, state) in overlay.iter() {
			merged.0.insert(name.clone(), state.clone());
		}
		merged
	}

	/// Returns a new map with `enabled` forced on the record for `name`.
	pub fn with_enabled(&self, name: &str, enabled: bool) -> FeatureMap {
		let mut next = self.clone();
		next.set_enabled(name, enabled);
		next
	}
}

impl FromIterator<(String, FeatureState)> for FeatureMap {
	fn from_iter<I: IntoIterator<Item = (String, FeatureState)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a FeatureMap {
	type Item = (&'a String, &'a FeatureState);
	type IntoIter = btree_map::Iter<'a, String, FeatureState>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn sample() -> FeatureMap {
		let mut map = FeatureMap::new();
		map.insert(
			"checkout",
			FeatureState::enabled().with_param("variant", json!("blue")),
		);
		map.insert("search", FeatureState::disabled());
		map
	}

	#[test]
	fn test_feature_state_serializes_flat() {
		let state = FeatureState::enabled().with_param("variant", json!("blue"));
		let value = serde_json::to_value(&state).unwrap();
		assert_eq!(value, json!({"enabled": true, "variant": "blue"}));

		let parsed: FeatureState = serde_json::from_value(value).unwrap();
		assert_eq!(parsed, state);
	}

	#[test]
	fn test_with_param_ignores_enabled_key() {
		let state = FeatureState::enabled().with_param("enabled", json!(false));
		assert!(state.enabled);
		assert!(state.params.is_empty());
	}

	#[test]
	fn test_enabled_param_never_shadows_state_on_roundtrip() {
		let mut state = FeatureState::enabled().with_param("variant", json!("blue"));
		state.params.insert("enabled".to_string(), json!(false));
		let mut map = FeatureMap::new();
		map.insert("a", state);

		let json = serde_json::to_string(&map).unwrap();
		assert_eq!(json.matches("\"enabled\"").count(), 1);

		let reloaded: FeatureMap = serde_json::from_str(&json).unwrap();
		let a = reloaded.get("a").unwrap();
		assert!(a.enabled);
		assert_eq!(a.params.get("variant"), Some(&json!("blue")));
		assert!(!a.params.contains_key("enabled"));
	}

	#[test]
	fn test_set_enabled_keeps_params() {
		let mut map = sample();
		map.set_enabled("checkout", false);

		let state = map.get("checkout").unwrap();
		assert!(!state.enabled);
		assert_eq!(state.params.get("variant"), Some(&json!("blue")));
	}

	#[test]
	fn test_set_enabled_creates_missing() {
		let mut map = sample();
		map.set_enabled("new_feature", true);
		assert_eq!(map.get("new_feature"), Some(&FeatureState::enabled()));
		assert_eq!(map.len(), 3);
	}

	#[test]
	fn test_merge_replaces_whole_records() {
		let base = sample();
		let mut overlay = FeatureMap::new();
		overlay.insert("checkout", FeatureState::disabled());
		overlay.insert("beta", FeatureState::enabled());

		let merged = base.merge(&overlay);
		assert_eq!(merged.get("checkout"), Some(&FeatureState::disabled()));
		assert_eq!(merged.get("search"), Some(&FeatureState::disabled()));
		assert_eq!(merged.get("beta"), Some(&FeatureState::enabled()));

		// The receiver is untouched
		assert!(base.get("checkout").unwrap().enabled);
		assert!(!base.contains("beta"));
	}

	#[test]
	fn test_with_enabled_leaves_receiver() {
		let base = sample();
		let next = base.with_enabled("search", true);
		assert!(next.get("search").unwrap().enabled);
		assert!(!base.get("search").unwrap().enabled);
	}

	#[test]
	fn test_names_in_key_order() {
		let names: Vec<_> = sample().names().map(str::to_string).collect();
		assert_eq!(names, vec!["checkout", "search"]);
	}
}
