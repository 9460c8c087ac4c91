// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flagpole - evaluate feature flag configurations.
#[derive(Parser, Debug)]
#[command(
	name = "flagpole",
	about = "Evaluate feature flag configurations with queued toggles and URL overrides",
	version
)]
pub struct Args {
	/// Feature configuration file (.json or .toml)
	#[arg(long, short = 'c', env = "FLAGPOLE_CONFIG", global = true)]
	pub config: Option<PathBuf>,

	/// URL query string with overrides for known features, e.g. "?beta=1&search=false"
	#[arg(long, env = "FLAGPOLE_URL", global = true)]
	pub url: Option<String>,

	/// Enable a feature before the store is initialized
	#[arg(long = "queue-enable", value_name = "NAME", global = true)]
	pub queue_enable: Vec<String>,

	/// Disable a feature before the store is initialized
	#[arg(long = "queue-disable", value_name = "NAME", global = true)]
	pub queue_disable: Vec<String>,

	/// Enable a feature after registration
	#[arg(long, value_name = "NAME", global = true)]
	pub enable: Vec<String>,

	/// Disable a feature after registration
	#[arg(long, value_name = "NAME", global = true)]
	pub disable: Vec<String>,

	/// Log filter used when RUST_LOG is unset
	#[arg(long, env = "FLAGPOLE_LOG", default_value = "warn", global = true)]
	pub log_level: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Print every known feature as JSON
	Show,

	/// Print the state of the named features
	Get {
		/// Feature names
		#[arg(required = true)]
		names: Vec<String>,
	},

	/// Validate a configuration file
	Check {
		/// Configuration file (.json or .toml)
		path: PathBuf,
	},
}
