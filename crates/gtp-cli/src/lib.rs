//! Command-line driver for the gtp lowering pass.
//!
//! Reads a syntax tree as JSON, lowers it, and writes JavaScript-like text,
//! the lowered tree as JSON, or the per-function suspension facts.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
