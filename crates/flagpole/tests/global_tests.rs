// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hand-off between the global pre-init queue and the global action facade.
//!
//! The globals are process-wide, so every test holds `LOCK` and starts from
//! a torn-down state.

use flagpole::{global, FeatureConfiguration, FeatureState};
use parking_lot::{Mutex, MutexGuard};
use serde_json::json;

static LOCK: Mutex<()> = parking_lot::const_mutex(());

fn isolated() -> MutexGuard<'static, ()> {
	let guard = LOCK.lock();
	global::teardown();
	guard
}

#[test]
fn queue_is_always_reachable() {
	let _guard = isolated();
	assert!(global::feature_actions().is_none());
	assert!(global::features().get_feature_queue().is_empty());
	assert!(!global::features().is_attached());
}

#[test]
fn buffers_before_bootstrap() {
	let _guard = isolated();
	global::enable("feature");
	global::disable("feature2");

	let queued = global::features().get_feature_queue();
	assert_eq!(
		serde_json::to_value(&queued).unwrap(),
		json!({"feature": {"enabled": true}, "feature2": {"enabled": false}})
	);
}

#[test]
fn forwards_after_bootstrap_and_freezes_queue() {
	let _guard = isolated();
	global::enable("feature");
	global::disable("feature2");

	let actions = global::bootstrap();
	assert!(global::features().is_attached());

	// Seeded from the queue
	assert!(actions.is_enabled("feature").unwrap());
	assert!(!actions.is_enabled("feature2").unwrap());

	global::enable("feature3");
	global::disable("feature4");

	let queued = global::features().get_feature_queue();
	assert_eq!(queued.len(), 2);
	assert_eq!(queued.get("feature"), Some(&FeatureState::enabled()));
	assert_eq!(queued.get("feature2"), Some(&FeatureState::disabled()));

	assert!(actions.is_enabled("feature3").unwrap());
	assert!(!actions.is_enabled("feature4").unwrap());
}

#[test]
fn bootstrap_is_idempotent() {
	let _guard = isolated();
	let first = global::bootstrap();
	let second = global::bootstrap();
	assert!(std::sync::Arc::ptr_eq(&first, &second));

	let installed = global::feature_actions().unwrap();
	assert!(std::sync::Arc::ptr_eq(&first, &installed));
}

#[test]
fn global_facade_enables_and_disables() {
	let _guard = isolated();
	let actions = global::bootstrap();
	actions
		.register(
			&FeatureConfiguration::from_value(json!({
				"enabled_feature": {"enabled": true},
				"disabled_feature": {"enabled": false},
			}))
			.unwrap(),
			None,
		)
		.unwrap();

	let facade = global::feature_actions().unwrap();
	facade.enable("disabled_feature");
	assert!(actions.is_enabled("disabled_feature").unwrap());
	facade.disable("enabled_feature");
	assert!(!actions.is_enabled("enabled_feature").unwrap());
}

#[test]
fn teardown_restores_buffering() {
	let _guard = isolated();
	let actions = global::bootstrap();
	global::enable("live");
	assert!(actions.is_enabled("live").unwrap());

	global::teardown();
	assert!(global::feature_actions().is_none());
	assert!(!global::features().is_attached());

	global::enable("after_teardown");
	assert!(global::features().get_feature_queue().contains("after_teardown"));
	assert!(actions.is_enabled("after_teardown").is_err());
}

#[test]
fn reinitialize_rereads_frozen_queue() {
	let _guard = isolated();
	global::disable("enabled_feature");

	let actions = global::bootstrap();
	actions
		.register(
			&FeatureConfiguration::from_value(json!({
				"enabled_feature": {"enabled": true},
			}))
			.unwrap(),
			None,
		)
		.unwrap();
	assert!(!actions.is_enabled("enabled_feature").unwrap());

	actions.enable("enabled_feature");
	assert!(actions.is_enabled("enabled_feature").unwrap());

	// The queue still holds the pre-bootstrap value
	actions.reinitialize_with_url_parameters(None);
	assert!(!actions.is_enabled("enabled_feature").unwrap());
}

#[test]
fn toggles_racing_bootstrap_reach_the_store() {
	let _guard = isolated();
	let names: Vec<String> = (0..500).map(|i| format!("racing{i}")).collect();

	let writer = {
		let names = names.clone();
		std::thread::spawn(move || {
			for name in &names {
				global::enable(name);
			}
		})
	};

	let actions = global::bootstrap();
	writer.join().unwrap();

	for name in &names {
		assert!(actions.is_enabled(name).unwrap(), "{name} was lost");
	}
}
