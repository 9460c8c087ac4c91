// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The feature store.
//!
//! State is published as an `Arc<FeatureMap>` through a watch channel. Each
//! dispatched action computes the next map from the current one and replaces
//! the published value under the channel's lock, so a reader sees either the
//! old map or the new one and any snapshot it already holds stays valid.

use std::sync::Arc;

use flagpole_core::{Action, FeatureGetter, FeatureMap, Result};
use tokio::sync::watch;
use tracing::debug;

use crate::queue::FeatureQueue;

/// Canonical mapping from feature name to state.
#[derive(Debug)]
pub struct FeatureStore {
	state: watch::Sender<Arc<FeatureMap>>,
	/// Source re-read on reinitialization.
	queue: Option<Arc<FeatureQueue>>,
}

impl FeatureStore {
	/// Creates an empty store with no pre-init queue.
	pub fn new() -> Self {
		Self::from_parts(FeatureMap::new(), None)
	}

	/// Creates a store seeded from the current contents of `queue`.
	///
	/// The queue is kept and re-read by
	/// [`Action::ReinitializeWithUrlParameters`].
	pub fn with_queue(queue: Arc<FeatureQueue>) -> Self {
		let initial = queue.get_feature_queue();
		Self::seeded(initial, queue)
	}

	/// Creates a store from a queue snapshot already taken by the caller.
	///
	/// Used with [`FeatureQueue::attach_seeded`], which takes the snapshot and
	/// attaches the store's facade under one lock.
	pub fn seeded(initial: FeatureMap, queue: Arc<FeatureQueue>) -> Self {
		debug!(features = initial.len(), "Seeding feature store from queue");
		Self::from_parts(initial, Some(queue))
	}

	fn from_parts(initial: FeatureMap, queue: Option<Arc<FeatureQueue>>) -> Self {
		let (state, _) = watch::channel(Arc::new(initial));
		Self { state, queue }
	}

	/// Applies `action` and publishes the resulting state.
	pub fn dispatch(&self, action: Action) {
		// Snapshot the queue before taking the state lock.
		let queued = match action {
			Action::ReinitializeWithUrlParameters { .. } => {
				self.queue.as_ref().map(|queue| queue.get_feature_queue())
			}
			_ => None,
		};

		let mut features = 0;
		self.state.send_modify(|state| {
			let next = action.apply(state, queued.as_ref());
			features = next.len();
			*state = Arc::new(next);
		});

		debug!(
			action = action.name(),
			feature = action.feature_name(),
			features,
			"Dispatched feature action"
		);
	}

	/// Returns the currently published state.
	pub fn snapshot(&self) -> Arc<FeatureMap> {
		let state = self.state.borrow();
		Arc::clone(&*state)
	}

	/// Evaluates `getter` against the current state.
	pub fn evaluate(&self, getter: &FeatureGetter) -> Result<bool> {
		getter.evaluate(&self.state.borrow())
	}

	/// Returns a receiver notified after every dispatched action.
	pub fn subscribe(&self) -> watch::Receiver<Arc<FeatureMap>> {
		self.state.subscribe()
	}

	pub fn queue(&self) -> Option<&Arc<FeatureQueue>> {
		self.queue.as_ref()
	}
}

impl Default for FeatureStore {
	fn default() -> Self {
		Self::new()
	}
}
