// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pure state transitions of the feature store.
//!
//! Every transition takes the current [`FeatureMap`] by reference and returns
//! the next one. Precedence, from lowest to highest:
//!
//! 1. registered configuration defaults
//! 2. state already live in the store (queued or toggled before registration)
//! 3. URL parameter overrides
//!
//! On reinitialization the pre-init queue snapshot sits between the store and
//! the URL overrides.

use crate::state::FeatureMap;
use crate::url_params::{coerce_enabled, UrlParameters};

/// A named intent dispatched on the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
	/// Register validated defaults, then apply URL overrides.
	Register {
		defaults: FeatureMap,
		url_parameters: Option<UrlParameters>,
	},
	Enable {
		feature_name: String,
	},
	Disable {
		feature_name: String,
	},
	/// Discard every feature.
	Reset,
	/// Re-read the pre-init queue, then apply URL overrides.
	ReinitializeWithUrlParameters {
		url_parameters: Option<UrlParameters>,
	},
}

impl Action {
	/// Returns the action type name used in logs.
	pub fn name(&self) -> &'static str {
		match self {
			Action::Register { .. } => "register_features",
			Action::Enable { .. } => "enable_feature",
			Action::Disable { .. } => "disable_feature",
			Action::Reset => "reset_features",
			Action::ReinitializeWithUrlParameters { .. } => "update_features_from_client",
		}
	}

	/// Returns the feature an enable or disable action targets.
	pub fn feature_name(&self) -> Option<&str> {
		match self {
			Action::Enable { feature_name } | Action::Disable { feature_name } => {
				Some(feature_name.as_str())
			}
			_ => None,
		}
	}

	/// Applies this action to `state`.
	///
	/// `queue` is the current pre-init queue snapshot, if one is reachable. Only
	/// reinitialization reads it.
	pub fn apply(&self, state: &FeatureMap, queue: Option<&FeatureMap>) -> FeatureMap {
		match self {
			Action::Register {
				defaults,
				url_parameters,
			} => register(state, defaults, url_parameters.as_ref()),
			Action::Enable { feature_name } => enable(state, feature_name),
			Action::Disable { feature_name } => disable(state, feature_name),
			Action::Reset => reset(),
			Action::ReinitializeWithUrlParameters { url_parameters } => {
				reinitialize_with_url_parameters(state, queue, url_parameters.as_ref())
			}
		}
	}
}

/// Merges registered defaults under the live state, then applies URL overrides.
pub fn register(
	state: &FeatureMap,
	defaults: &FeatureMap,
	url_parameters: Option<&UrlParameters>,
) -> FeatureMap {
	let features = defaults.merge(state);
	apply_url_overrides(features, url_parameters)
}

/// Forces `enabled = true`, creating the feature if absent.
pub fn enable(state: &FeatureMap, feature_name: &str) -> FeatureMap {
	state.with_enabled(feature_name, true)
}

/// Forces `enabled = false`, creating the feature if absent.
pub fn disable(state: &FeatureMap, feature_name: &str) -> FeatureMap {
	state.with_enabled(feature_name, false)
}

pub fn reset() -> FeatureMap {
	FeatureMap::new()
}

/// Lays the queue snapshot over the live state, then applies URL overrides.
pub fn reinitialize_with_url_parameters(
	state: &FeatureMap,
	queue: Option<&FeatureMap>,
	url_parameters: Option<&UrlParameters>,
) -> FeatureMap {
	let features = match queue {
		Some(queued) => state.merge(queued),
		None => state.clone(),
	};
	apply_url_overrides(features, url_parameters)
}

/// Applies URL overrides to features already present in `features`.
///
/// Unknown parameter names are ignored.
pub fn apply_url_overrides(
	mut features: FeatureMap,
	url_parameters: Option<&UrlParameters>,
) -> FeatureMap {
	let Some(url_parameters) = url_parameters else {
		return features;
	};

	for (name, value) in url_parameters.iter() {
		if features.contains(name) {
			features.set_enabled(name, coerce_enabled(value));
		}
	}
	features
}
