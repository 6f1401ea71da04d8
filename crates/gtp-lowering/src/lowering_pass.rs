//! Suspension lowering pass.
//!
//! Walks a compilation unit and rewrites every function-like body that
//! suspends, innermost first. Each body is classified on its own and sent
//! through a fixed pipeline:
//!
//! 1. lower nested function-like bodies (the default rewrite)
//! 2. classify with [`SuspensionAnalyzer`]
//! 3. no suspension: keep the body from step 1
//! 4. a `for (k in o)` loop: for-in lowering
//! 5. `yield for`: [`IterationSuspensionDesugarer`]
//! 6. any `yield`: generator lowering, otherwise async lowering
//! 7. rebuild the declaration around the new body
//!
//! Steps 4-6 are decided up front as a [`LoweringPlan`]. A body mixing `yield`
//! and `await` is sent to generator lowering, which reports the `await`.
//!
//! Nodes that did not change come back as the same `Rc`, so a tree without
//! suspensions is returned untouched.

use std::rc::Rc;

use gtp_ast::factory::update_function_body;
use gtp_ast::names::collect_names;
use gtp_ast::{NodeRef, Transformer, transform_children};
use gtp_common::diagnostics::diagnostic_messages;
use gtp_common::{ErrorReporter, UniqueIdentifierGenerator};
use serde::Serialize;

use crate::collaborators::{Collaborators, StandardCollaborators};
use crate::iteration_suspension::IterationSuspensionDesugarer;
use crate::options::LoweringOptions;
use crate::suspension_analyzer::{SuspensionAnalyzer, SuspensionFacts};

/// Which engine finally takes a suspending body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoweringTarget {
    Generator,
    Async,
}

/// The lowering steps one body needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoweringPlan {
    pub lower_for_in: bool,
    pub desugar_iteration: bool,
    pub target: LoweringTarget,
}

impl LoweringPlan {
    /// `None` when the body does not suspend and is left alone.
    #[must_use]
    pub const fn from_facts(facts: &SuspensionFacts) -> Option<Self> {
        if !facts.has_any_suspension() {
            return None;
        }
        // Mixed bodies go to generator lowering, which reports the `await`.
        let target = if facts.has_suspension {
            LoweringTarget::Generator
        } else {
            LoweringTarget::Async
        };
        Some(Self {
            lower_for_in: facts.has_for_in,
            desugar_iteration: facts.is_iteration_form,
            target,
        })
    }
}

/// Counters for one run, logged when the run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoweringStats {
    pub functions_visited: u32,
    pub bodies_lowered: u32,
    pub for_in_lowered: u32,
    pub iterations_desugared: u32,
    pub generator_bodies: u32,
    pub async_bodies: u32,
    pub depth_limit_hits: u32,
}

pub struct SuspensionLoweringPass<'a, C: Collaborators + ?Sized> {
    collaborators: &'a mut C,
    ids: &'a mut UniqueIdentifierGenerator,
    reporter: &'a mut ErrorReporter,
    max_function_depth: u32,
    function_depth: u32,
    stats: LoweringStats,
}

impl<'a, C: Collaborators + ?Sized> SuspensionLoweringPass<'a, C> {
    pub fn new(
        collaborators: &'a mut C,
        options: &LoweringOptions,
        ids: &'a mut UniqueIdentifierGenerator,
        reporter: &'a mut ErrorReporter,
    ) -> Self {
        Self {
            collaborators,
            ids,
            reporter,
            max_function_depth: options.max_function_depth,
            function_depth: 0,
            stats: LoweringStats::default(),
        }
    }

    /// Lower `tree`, returning it unchanged (same `Rc`) if nothing suspends.
    ///
    /// Every name already used in `tree` is reserved first, so temporaries
    /// never shadow source bindings.
    pub fn run(&mut self, tree: &NodeRef) -> NodeRef {
        self.ids.reserve_all(collect_names(tree));
        let result = self.transform_any(tree);
        tracing::debug!(
            functions = self.stats.functions_visited,
            lowered = self.stats.bodies_lowered,
            generators = self.stats.generator_bodies,
            asyncs = self.stats.async_bodies,
            unchanged = Rc::ptr_eq(tree, &result),
            "[lowering] run finished"
        );
        result
    }

    #[must_use]
    pub const fn stats(&self) -> LoweringStats {
        self.stats
    }

    fn lower_function_like(&mut self, node: &NodeRef) -> NodeRef {
        self.stats.functions_visited += 1;
        let Some(body) = node.function_body() else {
            return Rc::clone(node);
        };
        if !self.enter_function(node) {
            return Rc::clone(node);
        }

        let body = Rc::clone(body);
        let lowered = self.transform_body(&body);
        self.function_depth -= 1;

        update_function_body(node, lowered)
    }

    /// Bump the function nesting depth, or report `node` and refuse once the
    /// limit is reached.
    fn enter_function(&mut self, node: &NodeRef) -> bool {
        if self.function_depth >= self.max_function_depth {
            self.stats.depth_limit_hits += 1;
            let limit = self.max_function_depth.to_string();
            self.reporter.report_error(
                node.span,
                &diagnostic_messages::NESTING_TOO_DEEP,
                &[limit.as_str()],
            );
            return false;
        }
        self.function_depth += 1;
        true
    }

    /// Function expressions are not lowered themselves, but declarations
    /// inside them are, so they count toward the nesting limit.
    fn descend_function_expression(&mut self, node: &NodeRef) -> NodeRef {
        if !self.enter_function(node) {
            return Rc::clone(node);
        }
        let result = transform_children(self, node);
        self.function_depth -= 1;
        result
    }

    fn transform_body(&mut self, body: &NodeRef) -> NodeRef {
        let body = self.transform_any(body);
        let facts = SuspensionAnalyzer::analyze(&body);
        let Some(plan) = LoweringPlan::from_facts(&facts) else {
            return body;
        };
        tracing::debug!(?facts, ?plan, span = ?body.span, "[lowering] body");
        self.stats.bodies_lowered += 1;

        let mut body = body;
        if plan.lower_for_in {
            self.stats.for_in_lowered += 1;
            body = self.collaborators.lower_for_in(self.ids, &body);
        }
        if plan.desugar_iteration {
            self.stats.iterations_desugared += 1;
            body = IterationSuspensionDesugarer::transform_tree(self.ids, self.collaborators, &body);
        }
        match plan.target {
            LoweringTarget::Generator => {
                self.stats.generator_bodies += 1;
                self.collaborators.lower_generator_body(self.reporter, &body)
            }
            LoweringTarget::Async => {
                self.stats.async_bodies += 1;
                self.collaborators.lower_async_body(self.reporter, &body)
            }
        }
    }
}

impl<C: Collaborators + ?Sized> Transformer for SuspensionLoweringPass<'_, C> {
    fn transform_function_declaration(&mut self, node: &NodeRef) -> NodeRef {
        self.lower_function_like(node)
    }

    fn transform_function_expression(&mut self, node: &NodeRef) -> NodeRef {
        self.descend_function_expression(node)
    }

    fn transform_get_accessor(&mut self, node: &NodeRef) -> NodeRef {
        self.lower_function_like(node)
    }

    fn transform_set_accessor(&mut self, node: &NodeRef) -> NodeRef {
        self.lower_function_like(node)
    }
}

/// Lower `tree` with default options and the reference collaborators.
pub fn lower(
    ids: &mut UniqueIdentifierGenerator,
    reporter: &mut ErrorReporter,
    tree: &NodeRef,
) -> NodeRef {
    let options = LoweringOptions::default();
    let mut collaborators = StandardCollaborators::new(&options);
    lower_with(&mut collaborators, &options, ids, reporter, tree)
}

/// Lower `tree` through caller-supplied collaborators.
pub fn lower_with<C: Collaborators + ?Sized>(
    collaborators: &mut C,
    options: &LoweringOptions,
    ids: &mut UniqueIdentifierGenerator,
    reporter: &mut ErrorReporter,
    tree: &NodeRef,
) -> NodeRef {
    SuspensionLoweringPass::new(collaborators, options, ids, reporter).run(tree)
}

#[cfg(test)]
#[path = "../tests/lowering_pass.rs"]
mod tests;
