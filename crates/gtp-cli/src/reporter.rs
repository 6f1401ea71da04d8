use colored::Colorize;

use gtp_common::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics as `file(start,end) - error GTP9002: message`.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// One line per diagnostic, each newline-terminated.
    #[must_use]
    pub fn render(&self, file: &str, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(file, diagnostic));
            out.push('\n');
        }
        out
    }

    #[must_use]
    pub fn format_diagnostic(&self, file: &str, diagnostic: &Diagnostic) -> String {
        let span = diagnostic.span;
        let location = if span.is_empty() {
            file.to_string()
        } else {
            format!("{file}({},{})", span.start, span.end)
        };
        format!(
            "{} - {} {}: {}",
            location,
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("GTP{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
