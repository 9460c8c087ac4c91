// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide feature queue and action facade.
//!
//! The queue from [`features`] is reachable from the first line of the
//! program. Toggles issued through it are buffered until [`bootstrap`] builds
//! the store, seeds it from the buffer and attaches the action facade to the
//! queue. From then on the same calls go straight to the store.
//!
//! [`teardown`] undoes the hand-off and empties the buffer so tests can start
//! from a clean slate.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::info;

use crate::actions::FeatureActions;
use crate::queue::FeatureQueue;
use crate::store::FeatureStore;

static FEATURES: OnceLock<Arc<FeatureQueue>> = OnceLock::new();
static FEATURE_ACTIONS: RwLock<Option<Arc<FeatureActions>>> = parking_lot::const_rwlock(None);

/// Returns the global pre-init queue.
pub fn features() -> Arc<FeatureQueue> {
	Arc::clone(FEATURES.get_or_init(|| Arc::new(FeatureQueue::new())))
}

/// Enables a feature through the global queue.
pub fn enable(feature_name: &str) {
	features().enable(feature_name);
}

/// Disables a feature through the global queue.
pub fn disable(feature_name: &str) {
	features().disable(feature_name);
}

/// Builds the global store and action facade, if not already built.
///
/// The store is seeded from the global queue and the facade is attached to
/// it under the queue's lock, so a toggle from another thread lands either in
/// the seed or in the live store. Returns the installed facade.
pub fn bootstrap() -> Arc<FeatureActions> {
	let mut installed = FEATURE_ACTIONS.write();
	if let Some(actions) = installed.as_ref() {
		return Arc::clone(actions);
	}

	let queue = features();
	let actions = queue.attach_seeded(|seed| {
		let store = FeatureStore::seeded(seed, Arc::clone(&queue));
		Arc::new(FeatureActions::new(Arc::new(store)))
	});
	*installed = Some(Arc::clone(&actions));

	info!(
		features = actions.store().snapshot().len(),
		"Feature store bootstrapped"
	);
	actions
}

/// Returns the installed action facade, if [`bootstrap`] has run.
pub fn feature_actions() -> Option<Arc<FeatureActions>> {
	FEATURE_ACTIONS.read().clone()
}

/// Detaches and drops the global facade and empties the global queue.
pub fn teardown() {
	let previous = FEATURE_ACTIONS.write().take();
	if let Some(queue) = FEATURES.get() {
		queue.detach();
		queue.clear();
	}
	if previous.is_some() {
		info!("Feature store torn down");
	}
}
