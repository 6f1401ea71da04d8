//! Common types and utilities for the gtp lowering pipeline.
//!
//! This crate provides foundational types used across all gtp crates:
//! - Source spans (`Span`)
//! - Diagnostics and the shared diagnostic sink (`Diagnostic`, `ErrorReporter`)
//! - Run-scoped unique identifier allocation (`UniqueIdentifierGenerator`)
//! - Recursion limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics and the error reporter every pass writes into
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, ErrorReporter};

// Fresh temporaries for desugarings
pub mod unique_identifier;
pub use unique_identifier::UniqueIdentifierGenerator;

// Centralized limits and thresholds
pub mod limits;
