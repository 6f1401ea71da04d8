//! Suspension analysis for one function-like body.
//!
//! Reports which suspension forms occur at the body's own scope. Nested
//! function declarations, accessors and function expressions are separate
//! scopes and are never entered; every other construct is, so a `yield`
//! buried in a loop, conditional or `try` still counts.

use gtp_ast::{Node, NodeKind, Visitor, walk_children};
use serde::Serialize;

/// What [`SuspensionAnalyzer`] found at one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionFacts {
    /// An ordinary `yield` occurs at this scope.
    pub has_suspension: bool,
    /// The last `yield` seen at this scope was `yield for`.
    pub is_iteration_form: bool,
    /// A `for (k in o)` loop occurs at this scope.
    pub has_for_in: bool,
    /// An `await` occurs at this scope.
    pub has_async_suspension: bool,
}

impl SuspensionFacts {
    /// Whether the body needs lowering at all.
    #[must_use]
    pub const fn has_any_suspension(&self) -> bool {
        self.has_suspension || self.has_async_suspension
    }
}

#[derive(Debug, Default)]
pub struct SuspensionAnalyzer {
    facts: SuspensionFacts,
}

impl SuspensionAnalyzer {
    /// Classify `body`, normally the `Block` of a function-like declaration.
    #[must_use]
    pub fn analyze(body: &Node) -> SuspensionFacts {
        let mut analyzer = Self::default();
        analyzer.visit_any(body);
        analyzer.facts
    }
}

impl Visitor for SuspensionAnalyzer {
    fn visit_suspension_statement(&mut self, node: &Node) {
        if let NodeKind::SuspensionStatement {
            is_iteration_form, ..
        } = &node.kind
        {
            self.facts.has_suspension = true;
            self.facts.is_iteration_form = *is_iteration_form;
        }
        walk_children(self, node);
    }

    fn visit_yield_expression(&mut self, node: &Node) {
        self.facts.has_suspension = true;
        self.facts.is_iteration_form = false;
        walk_children(self, node);
    }

    fn visit_async_suspension_statement(&mut self, node: &Node) {
        self.facts.has_async_suspension = true;
        walk_children(self, node);
    }

    fn visit_for_in_statement(&mut self, node: &Node) {
        self.facts.has_for_in = true;
        walk_children(self, node);
    }

    // Nested function scopes are classified on their own.
    fn visit_function_declaration(&mut self, _node: &Node) {}

    fn visit_function_expression(&mut self, _node: &Node) {}

    fn visit_get_accessor(&mut self, _node: &Node) {}

    fn visit_set_accessor(&mut self, _node: &Node) {}
}

#[cfg(test)]
#[path = "../tests/suspension_analyzer.rs"]
mod tests;
