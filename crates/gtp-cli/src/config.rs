//! Configuration file loading.
//!
//! ```json
//! { "lowering": { "identifierPrefix": "_t", "maxFunctionDepth": 64 } }
//! ```
//!
//! Missing keys keep their defaults. Command-line flags are applied on top.

use std::path::Path;

use anyhow::{Context, Result};
use gtp_lowering::LoweringOptions;
use serde::{Deserialize, Serialize};

use crate::args::CliArgs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    pub lowering: LoweringOptions,
}

impl CliConfig {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration: {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid configuration: {}", path.display()))
    }
}

/// Lowering options from the config file named in `args` (if any), with flag
/// overrides applied.
pub fn resolve_options(args: &CliArgs) -> Result<LoweringOptions> {
    let mut options = match &args.config {
        Some(path) => CliConfig::load(path)?.lowering,
        None => LoweringOptions::default(),
    };
    if let Some(prefix) = &args.identifier_prefix {
        options.identifier_prefix.clone_from(prefix);
    }
    if let Some(depth) = args.max_function_depth {
        options.max_function_depth = depth;
    }
    tracing::debug!(?options, "resolved lowering options");
    Ok(options)
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
