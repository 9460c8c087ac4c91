// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the feature flag store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while registering, loading or reading feature flags.
#[derive(Debug, Error)]
pub enum FlagsError {
	/// A configuration entry has no boolean `enabled` attribute.
	#[error("invalid configuration: key {key} has value {value} without default enabled state")]
	InvalidConfiguration { key: String, value: String },

	/// A getter was evaluated for a feature that was never registered or toggled.
	#[error("invalid feature accessed in feature store: {0}")]
	UnknownFeature(String),

	/// I/O error reading a configuration file.
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// JSON parsing error.
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	/// TOML parsing error.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Configuration file extension is neither `.json` nor `.toml`.
	#[error("unsupported configuration format: {0}")]
	UnsupportedFormat(PathBuf),
}

impl FlagsError {
	/// Create an invalid configuration error for `key`, rendering `value` as JSON.
	pub fn invalid_configuration(key: impl Into<String>, value: &serde_json::Value) -> Self {
		Self::InvalidConfiguration {
			key: key.into(),
			value: value.to_string(),
		}
	}

	/// Returns true if this error was raised by reading an unknown feature.
	pub fn is_unknown_feature(&self) -> bool {
		matches!(self, Self::UnknownFeature(_))
	}
}

/// Result type alias for feature flag operations.
pub type Result<T> = std::result::Result<T, FlagsError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_configuration_message() {
		let err = FlagsError::invalid_configuration("invalid_feature", &serde_json::json!({}));
		assert_eq!(
			err.to_string(),
			"invalid configuration: key invalid_feature has value {} without default enabled state"
		);
		assert!(!err.is_unknown_feature());
	}

	#[test]
	fn test_unknown_feature_message() {
		let err = FlagsError::UnknownFeature("missing_feature".to_string());
		assert!(err.to_string().contains("invalid feature accessed"));
		assert!(err.to_string().contains("missing_feature"));
		assert!(err.is_unknown_feature());
	}
}
