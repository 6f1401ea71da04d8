//! Diagnostic types and the shared diagnostic sink.
//!
//! Passes never abort on a semantic error. They record a [`Diagnostic`] in the
//! [`ErrorReporter`] they were handed and keep going, so one run surfaces every
//! independent problem instead of stopping at the first.

use serde::Serialize;

use crate::span::Span;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const NESTING_TOO_DEEP: u32 = 9001;
    pub const ASYNC_SUSPENSION_IN_GENERATOR: u32 = 9002;
    pub const UNDESUGARED_ITERATION_SUSPENSION: u32 = 9003;
    pub const SUSPENSION_IN_ASYNC_BODY: u32 = 9004;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const NESTING_TOO_DEEP: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: "Function nesting exceeds the maximum depth of {0}; the body was left unlowered.",
    };

    pub const ASYNC_SUSPENSION_IN_GENERATOR: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::ASYNC_SUSPENSION_IN_GENERATOR,
        category: DiagnosticCategory::Error,
        message: "'await' cannot be used in a body that also contains 'yield'.",
    };

    pub const UNDESUGARED_ITERATION_SUSPENSION: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNDESUGARED_ITERATION_SUSPENSION,
        category: DiagnosticCategory::Error,
        message: "'yield for' reached generator lowering without being desugared.",
    };

    pub const SUSPENSION_IN_ASYNC_BODY: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::SUSPENSION_IN_ASYNC_BODY,
        category: DiagnosticCategory::Error,
        message: "'yield' cannot be used in an asynchronous body.",
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::NESTING_TOO_DEEP,
    diagnostic_messages::ASYNC_SUSPENSION_IN_GENERATOR,
    diagnostic_messages::UNDESUGARED_ITERATION_SUSPENSION,
    diagnostic_messages::SUSPENSION_IN_ASYNC_BODY,
];

/// A lowering diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub span: Span,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            span,
            message_text: message.into(),
        }
    }

    /// Build a diagnostic from a message template, substituting `{0}`, `{1}`, ...
    #[must_use]
    pub fn from_message(span: Span, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            category: message.category,
            code: message.code,
            span,
            message_text: format_message(message.message, args),
        }
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

// =============================================================================
// Error Reporter
// =============================================================================

/// Accumulating diagnostic sink shared by reference across one lowering run.
///
/// Reporting never fails and never interrupts the caller; diagnostics keep
/// the order in which they were reported.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code,
            start = diagnostic.span.start,
            end = diagnostic.span.end,
            "[diagnostics] {}",
            diagnostic.message_text
        );
        self.diagnostics.push(diagnostic);
    }

    /// Report an error at `span` using a message template.
    pub fn report_error(&mut self, span: Span, message: &DiagnosticMessage, args: &[&str]) {
        self.report(Diagnostic::from_message(span, message, args));
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
