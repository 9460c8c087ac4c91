// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Flagpole feature flag store.
//!
//! This crate holds everything that does not depend on process-wide state:
//! the feature map, configuration validation, URL overrides, the pure store
//! transitions and getters. The runtime store, pre-init queue and global
//! action facade live in the `flagpole` crate.
//!
//! # Example
//!
//! ```
//! use flagpole_core::{make_getter, transition, FeatureConfiguration, FeatureMap, UrlParameters};
//! use serde_json::json;
//!
//! let configuration = FeatureConfiguration::from_value(json!({
//!     "checkout_redesign": {"enabled": true},
//!     "search_v2": {"enabled": false},
//! }))?;
//! let defaults = configuration.validate()?;
//!
//! let url = UrlParameters::from_query("?checkout_redesign=false&unknown=1");
//! let state = transition::register(&FeatureMap::new(), &defaults, Some(&url));
//!
//! assert!(!make_getter("checkout_redesign").evaluate(&state)?);
//! assert!(make_getter("unknown").evaluate(&state).is_err());
//! # Ok::<(), flagpole_core::FlagsError>(())
//! ```

pub mod config;
pub mod error;
pub mod getter;
pub mod state;
pub mod transition;
pub mod url_params;

pub use config::FeatureConfiguration;
pub use error::{FlagsError, Result};
pub use getter::{make_getter, FeatureGetter};
pub use state::{FeatureMap, FeatureState};
pub use transition::Action;
pub use url_params::{coerce_enabled, UrlParameters};
