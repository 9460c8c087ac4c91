// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read accessors bound to a single feature name.

use serde_json::{Map, Value};

use crate::error::{FlagsError, Result};
use crate::state::{FeatureMap, FeatureState};

/// Read-only accessor for one feature.
///
/// Evaluating a getter against a map that does not contain the feature is an
/// error. A disabled feature and an unknown one are never conflated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureGetter {
	feature_name: String,
}

/// Creates a getter for `feature_name`.
pub fn make_getter(feature_name: impl Into<String>) -> FeatureGetter {
	FeatureGetter {
		feature_name: feature_name.into(),
	}
}

impl FeatureGetter {
	pub fn feature_name(&self) -> &str {
		&self.feature_name
	}

	/// Returns the `enabled` value of the feature in `features`.
	pub fn evaluate(&self, features: &FeatureMap) -> Result<bool> {
		self.state(features).map(|state| state.enabled)
	}

	/// Returns the opaque parameters of the feature in `features`.
	pub fn params<'a>(&self, features: &'a FeatureMap) -> Result<&'a Map<String, Value>> {
		self.state(features).map(|state| &state.params)
	}

	fn state<'a>(&self, features: &'a FeatureMap) -> Result<&'a FeatureState> {
		features
			.get(&self.feature_name)
			.ok_or_else(|| FlagsError::UnknownFeature(self.feature_name.clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn features() -> FeatureMap {
		let mut map = FeatureMap::new();
		map.insert("on", FeatureState::enabled().with_param("limit", json!(10)));
		map.insert("off", FeatureState::disabled());
		map
	}

	#[test]
	fn test_evaluate_known_features() {
		assert!(make_getter("on").evaluate(&features()).unwrap());
		assert!(!make_getter("off").evaluate(&features()).unwrap());
	}

	#[test]
	fn test_evaluate_unknown_feature() {
		let err = make_getter("missing").evaluate(&features()).unwrap_err();
		assert!(matches!(err, FlagsError::UnknownFeature(ref name) if name == "missing"));
	}

	#[test]
	fn test_evaluate_empty_map() {
		assert!(make_getter("on").evaluate(&FeatureMap::new()).is_err());
	}

	#[test]
	fn test_params() {
		let features = features();
		let params = make_getter("on").params(&features).unwrap();
		assert_eq!(params.get("limit"), Some(&json!(10)));
		assert!(make_getter("off").params(&features).unwrap().is_empty());
		assert!(make_getter("missing").params(&features).is_err());
	}

	#[test]
	fn test_feature_name() {
		assert_eq!(make_getter("beta").feature_name(), "beta");
	}
}
