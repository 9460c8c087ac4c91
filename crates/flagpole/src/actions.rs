// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Action facade over the feature store.

use std::sync::Arc;

use flagpole_core::{make_getter, Action, FeatureConfiguration, FeatureGetter, Result, UrlParameters};
use tracing::{debug, warn};

use crate::queue::DispatchTarget;
use crate::store::FeatureStore;

/// Translates named intents into store actions.
#[derive(Debug, Clone)]
pub struct FeatureActions {
	store: Arc<FeatureStore>,
}

impl FeatureActions {
	pub fn new(store: Arc<FeatureStore>) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &Arc<FeatureStore> {
		&self.store
	}

	/// Registers the default configuration.
	///
	/// Every feature must be registered (or toggled) before it can be read.
	/// Features already live in the store keep their values; URL parameters
	/// override both for features they name. An invalid configuration is
	/// rejected as a whole and the store is left unchanged.
	pub fn register(
		&self,
		configuration: &FeatureConfiguration,
		url_parameters: Option<&UrlParameters>,
	) -> Result<()> {
		let defaults = configuration.validate().map_err(|e| {
			warn!(error = %e, "Rejected feature configuration");
			e
		})?;

		debug!(
			features = defaults.len(),
			url_parameters = url_parameters.map_or(0, UrlParameters::len),
			"Registering features"
		);
		self.store.dispatch(Action::Register {
			defaults,
			url_parameters: url_parameters.cloned(),
		});
		Ok(())
	}

	/// Reloads the pre-init queue, then applies any recognized URL parameters.
	pub fn reinitialize_with_url_parameters(&self, url_parameters: Option<&UrlParameters>) {
		self.store.dispatch(Action::ReinitializeWithUrlParameters {
			url_parameters: url_parameters.cloned(),
		});
	}

	pub fn enable(&self, feature_name: &str) {
		self.store.dispatch(Action::Enable {
			feature_name: feature_name.to_string(),
		});
	}

	pub fn disable(&self, feature_name: &str) {
		self.store.dispatch(Action::Disable {
			feature_name: feature_name.to_string(),
		});
	}

	/// Clears all state from the store.
	pub fn reset(&self) {
		self.store.dispatch(Action::Reset);
	}

	pub fn evaluate(&self, getter: &FeatureGetter) -> Result<bool> {
		self.store.evaluate(getter)
	}

	pub fn is_enabled(&self, feature_name: &str) -> Result<bool> {
		self.evaluate(&make_getter(feature_name))
	}
}

impl DispatchTarget for FeatureActions {
	fn enable(&self, feature_name: &str) {
		FeatureActions::enable(self, feature_name);
	}

	fn disable(&self, feature_name: &str) {
		FeatureActions::disable(self, feature_name);
	}
}
