//! Check command: load config, build the registry, collect imports, and
//! report violations.

use anyhow::{Context, Result};
use std::path::Path;

use modfence_core::{check, Config, GroupRegistry};
use modfence_go::collect;

use super::output;
use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Runs the check command.
pub fn run(path: &Path, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let source = config_resolver::resolve(path, config_path);
    let config = load_config(&source)?;
    config.validate().context("Config validation failed")?;

    let registry = GroupRegistry::from_config(&config).context("Failed to build group registry")?;

    let collection = collect(path).context("Failed to collect Go sources")?;
    for warning in &collection.warnings {
        tracing::warn!("{warning}");
    }

    tracing::debug!(
        module = %collection.module_path,
        packages = collection.package_imports.len(),
        "running check"
    );

    let result = check(
        &collection.module_path,
        &collection.package_imports,
        &registry,
    );

    output::print(&result, format)?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => {
            anyhow::bail!("No modfence.toml found. Run `modfence init` to create one.")
        }
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load {}", p.display()))
        }
    }
}
