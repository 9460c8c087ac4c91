// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature configuration loading and validation.
//!
//! A configuration maps each feature name to an object with a boolean
//! `enabled` default and any number of other attributes:
//!
//! ```toml
//! [checkout_redesign]
//! enabled = false
//! owner = "payments"
//!
//! [search_v2]
//! enabled = true
//! ```
//!
//! Configurations arrive untyped and must pass [`FeatureConfiguration::validate`]
//! before the store accepts them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FlagsError, Result};
use crate::state::{FeatureMap, FeatureState};
use crate::url_params::coerce_enabled;

/// Raw, unvalidated feature configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureConfiguration(BTreeMap<String, Value>);

impl FeatureConfiguration {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a configuration from a JSON object value.
	pub fn from_value(value: Value) -> Result<Self> {
		Ok(serde_json::from_value(value)?)
	}

	pub fn from_json_str(s: &str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn from_toml_str(s: &str) -> Result<Self> {
		Ok(toml::from_str(s)?)
	}

	/// Loads a configuration file, picking the format from its extension.
	pub fn load(path: &Path) -> Result<Self> {
		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.map(str::to_ascii_lowercase);

		let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
			Some("json") => Self::from_json_str,
			Some("toml") => Self::from_toml_str,
			_ => return Err(FlagsError::UnsupportedFormat(path.to_path_buf())),
		};

		let contents = std::fs::read_to_string(path).map_err(|source| FlagsError::Io {
			path: path.to_path_buf(),
			source,
		})?;

		let configuration = parse(&contents)?;
		debug!(path = %path.display(), features = configuration.len(), "Loaded feature configuration");
		Ok(configuration)
	}

	/// Builder-style insert of a raw entry.
	pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
		self.0.insert(name.into(), value)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Checks every entry and produces the typed default feature map.
	///
	/// Each entry must be an object with a non-null `enabled` attribute, which
	/// is coerced to a boolean the same way URL overrides are. The first
	/// offending entry, in key order, is reported and nothing is returned.
	pub fn validate(&self) -> Result<FeatureMap> {
		self.0
			.iter()
			.map(|(name, value)| validate_entry(name, value).map(|state| (name.clone(), state)))
			.collect()
	}
}

fn validate_entry(name: &str, value: &Value) -> Result<FeatureState> {
	let Value::Object(attributes) = value else {
		return Err(FlagsError::invalid_configuration(name, value));
	};

	let enabled = match attributes.get("enabled") {
		None | Some(Value::Null) => return Err(FlagsError::invalid_configuration(name, value)),
		Some(enabled) => coerce_enabled(enabled),
	};

	let mut params = attributes.clone();
	params.remove("enabled");

	Ok(FeatureState { enabled, params })
}

impl From<&FeatureMap> for FeatureConfiguration {
	fn from(map: &FeatureMap) -> Self {
		Self(
			map.iter()
				.map(|(name, state)| (name.clone(), Value::Object(state.to_attributes())))
				.collect(),
		)
	}
}
