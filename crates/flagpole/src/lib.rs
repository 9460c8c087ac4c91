// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process feature flag store for Flagpole.
//!
//! Three sources feed the store, in increasing precedence:
//!
//! - **Registered configuration**: defaults loaded with
//!   [`FeatureActions::register`]
//! - **Pre-init queue**: toggles issued through [`global::features`] before the
//!   store existed
//! - **URL parameters**: overrides for features that are already known
//!
//! Runtime [`FeatureActions::enable`] and [`FeatureActions::disable`] calls
//! apply directly to the current state.
//!
//! # Example
//!
//! ```
//! use flagpole::{global, FeatureConfiguration, UrlParameters};
//! use serde_json::json;
//!
//! // Before the store exists, toggles are buffered.
//! global::disable("search_v2");
//!
//! let actions = global::bootstrap();
//! let configuration = FeatureConfiguration::from_value(json!({
//!     "checkout_redesign": {"enabled": false},
//!     "search_v2": {"enabled": true},
//! }))?;
//! actions.register(&configuration, Some(&UrlParameters::from_query("checkout_redesign=1")))?;
//!
//! assert!(actions.is_enabled("checkout_redesign")?);
//! assert!(!actions.is_enabled("search_v2")?);
//!
//! // Now toggles go straight to the store.
//! global::enable("search_v2");
//! assert!(actions.is_enabled("search_v2")?);
//!
//! global::teardown();
//! # Ok::<(), flagpole::FlagsError>(())
//! ```

pub mod actions;
pub mod global;
pub mod queue;
pub mod store;

pub use actions::FeatureActions;
pub use queue::{DispatchTarget, FeatureQueue, SharedDispatchTarget};
pub use store::FeatureStore;

// Re-export core types for convenience
pub use flagpole_core::{
	make_getter, Action, FeatureConfiguration, FeatureGetter, FeatureMap, FeatureState, FlagsError,
	Result, UrlParameters,
};
