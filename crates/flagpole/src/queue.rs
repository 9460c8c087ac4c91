// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pre-initialization queue.
//!
//! Code that runs before the store exists can still enable or disable
//! features: the calls are buffered here and adopted by the store when it is
//! constructed or reinitialized. Once a [`DispatchTarget`] is attached, calls
//! are forwarded to it and the buffer is left as it was.

use std::fmt;
use std::sync::Arc;

use flagpole_core::{FeatureMap, FeatureState};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

/// Receiver of forwarded enable/disable calls.
pub trait DispatchTarget: Send + Sync {
	fn enable(&self, feature_name: &str);
	fn disable(&self, feature_name: &str);
}

/// Shared handle to a dispatch target.
pub type SharedDispatchTarget = Arc<dyn DispatchTarget>;

/// Buffer for toggle calls issued before the store is reachable.
#[derive(Default)]
pub struct FeatureQueue {
	queued: Mutex<FeatureMap>,
	target: RwLock<Option<SharedDispatchTarget>>,
}

impl FeatureQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables `feature_name`, forwarding if a target is attached.
	pub fn enable(&self, feature_name: &str) {
		self.toggle(feature_name, true);
	}

	/// Disables `feature_name`, forwarding if a target is attached.
	pub fn disable(&self, feature_name: &str) {
		self.toggle(feature_name, false);
	}

	/// Returns a snapshot of the buffered feature states.
	pub fn get_feature_queue(&self) -> FeatureMap {
		self.queued.lock().clone()
	}

	/// Hands off to `target`. Subsequent calls are forwarded, not buffered.
	pub fn attach(&self, target: SharedDispatchTarget) {
		*self.target.write() = Some(target);
		debug!("Feature queue attached to dispatch target");
	}

	/// Builds a target from the buffered state and attaches it atomically.
	///
	/// `build` receives the buffer snapshot and runs with the buffer locked, so
	/// no toggle can land between the snapshot and the hand-off. It must not
	/// call back into this queue.
	pub fn attach_seeded<T, F>(&self, build: F) -> Arc<T>
	where
		T: DispatchTarget + 'static,
		F: FnOnce(FeatureMap) -> Arc<T>,
	{
		let queued = self.queued.lock();
		let target = build(queued.clone());
		let shared: SharedDispatchTarget = target.clone();
		*self.target.write() = Some(shared);
		drop(queued);

		debug!("Feature queue attached to seeded dispatch target");
		target
	}

	/// Removes the dispatch target, returning it. Calls are buffered again.
	pub fn detach(&self) -> Option<SharedDispatchTarget> {
		self.target.write().take()
	}

	pub fn is_attached(&self) -> bool {
		self.target.read().is_some()
	}

	/// Empties the buffer.
	pub fn clear(&self) {
		*self.queued.lock() = FeatureMap::new();
	}

	fn toggle(&self, feature_name: &str, enabled: bool) {
		// Buffer or pick the target under the buffer lock, so a concurrent
		// `attach_seeded` either sees this write or hands us the target.
		// The store itself runs after the lock is released.
		let target = {
			let mut queued = self.queued.lock();
			match self.target.read().clone() {
				Some(target) => target,
				None => {
					queued.insert(feature_name, FeatureState::new(enabled));
					debug!(feature = feature_name, enabled, "Buffered feature toggle");
					return;
				}
			}
		};

		debug!(feature = feature_name, enabled, "Forwarding feature toggle");
		if enabled {
			target.enable(feature_name);
		} else {
			target.disable(feature_name);
		}
	}
}

impl fmt::Debug for FeatureQueue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FeatureQueue")
			.field("queued", &*self.queued.lock())
			.field("attached", &self.is_attached())
			.finish()
	}
}
