//! Tracing setup for the `gtp` binary.
//!
//! `GTP_LOG` takes either a bare level, which applies to the `gtp_*` crates
//! only, or a full `RUST_LOG`-style directive list:
//!
//! ```bash
//! GTP_LOG=debug gtp tree.json                      # pass-level events
//! GTP_LOG="gtp_lowering=trace" GTP_LOG_FORMAT=tree gtp tree.json
//! ```
//!
//! `GTP_LOG_FORMAT` picks `text` (default), `tree` or `json`. Nothing is
//! installed unless `GTP_LOG` or `RUST_LOG` is set.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Crates a bare `GTP_LOG` level is scoped to.
const WORKSPACE_TARGETS: &[&str] = &["gtp_common", "gtp_ast", "gtp_lowering", "gtp_cli"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `GTP_LOG_FORMAT` value; anything unknown is `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Directive string for a `GTP_LOG` value.
///
/// `debug` becomes `warn,gtp_common=debug,gtp_ast=debug,...` so dependency
/// noise stays at `warn`; anything else is passed through untouched.
#[must_use]
pub fn expand_directives(value: &str) -> String {
    let value = value.trim();
    let Ok(level) = value.parse::<LevelFilter>() else {
        return value.to_string();
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

fn build_filter(gtp_log: Option<&str>) -> EnvFilter {
    match gtp_log {
        Some(value) => EnvFilter::builder().parse_lossy(expand_directives(value)),
        None => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing() {
    let gtp_log = std::env::var("GTP_LOG").ok();
    if gtp_log.is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = build_filter(gtp_log.as_deref());
    let format = LogFormat::parse(&std::env::var("GTP_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
