//! Centralized limits and thresholds for the lowering pipeline.
//!
//! The lowering pass recurses on the native stack once per nested function,
//! so the nesting limit below bounds how deep adversarial input can drive it.

/// Maximum nesting of functions the lowering pass descends into.
///
/// Declarations, accessors and function expressions all count.
///
/// Each nested function costs a rewrite frame, an analysis walk and the
/// collaborator calls for that body. Past this depth the pass reports
/// `NESTING_TOO_DEEP` and leaves the subtree as written.
///
/// # Example
///
/// ```text
/// function a() { function b() { function c() { /* ... 128 levels ... */ } } }
/// ```
pub const MAX_FUNCTION_NESTING_DEPTH: u32 = 128;

/// Default prefix for generated identifiers.
///
/// `$` followed by a double underscore is not something hand-written code
/// tends to use, and the generator still checks every candidate against the
/// names reserved from the source tree.
pub const DEFAULT_IDENTIFIER_PREFIX: &str = "$__";
