// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use flagpole::{global, FeatureActions, FeatureConfiguration, UrlParameters};
use tracing::{info, warn};

use crate::cli::{Args, Command};

/// Runs the selected command, writing results to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
	match &args.command {
		Command::Check { path } => check(path, out),
		Command::Show => {
			let actions = build_store(args)?;
			let snapshot = actions.store().snapshot();
			writeln!(out, "{}", serde_json::to_string_pretty(&*snapshot)?)?;
			Ok(())
		}
		Command::Get { names } => {
			let actions = build_store(args)?;
			get(&actions, names, out)
		}
	}
}

/// Builds the global store from the command-line sources.
///
/// Order: queued toggles, bootstrap, registration with URL overrides, then
/// runtime toggles.
fn build_store(args: &Args) -> anyhow::Result<Arc<FeatureActions>> {
	for name in &args.queue_enable {
		global::enable(name);
	}
	for name in &args.queue_disable {
		global::disable(name);
	}

	let actions = global::bootstrap();
	let url_parameters = args.url.as_deref().map(UrlParameters::from_query);

	match &args.config {
		Some(path) => {
			let configuration = load(path)?;
			actions.register(&configuration, url_parameters.as_ref())?;
		}
		None => actions.reinitialize_with_url_parameters(url_parameters.as_ref()),
	}

	// Forwarded to the store now that it is attached
	for name in &args.enable {
		global::enable(name);
	}
	for name in &args.disable {
		global::disable(name);
	}

	Ok(actions)
}

fn load(path: &Path) -> anyhow::Result<FeatureConfiguration> {
	FeatureConfiguration::load(path)
		.with_context(|| format!("failed to load feature configuration {}", path.display()))
}

fn check(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
	let defaults = load(path)?.validate()?;
	info!(path = %path.display(), features = defaults.len(), "Configuration is valid");
	writeln!(out, "{}: {} features", path.display(), defaults.len())?;
	Ok(())
}

fn get(actions: &FeatureActions, names: &[String], out: &mut impl Write) -> anyhow::Result<()> {
	let mut unknown = Vec::new();
	for name in names {
		match actions.is_enabled(name) {
			Ok(enabled) => writeln!(out, "{name}={enabled}")?,
			Err(e) if e.is_unknown_feature() => {
				warn!(feature = %name, "Unknown feature requested");
				unknown.push(name.as_str());
			}
			Err(e) => return Err(e.into()),
		}
	}

	if !unknown.is_empty() {
		bail!("unknown features: {}", unknown.join(", "));
	}
	Ok(())
}
