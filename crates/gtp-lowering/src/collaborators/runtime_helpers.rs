//! Generator and async lowering through runtime helpers.
//!
//! Neither state machine is built here. A body is retargeted onto a native
//! generator function and handed to a helper that drives it:
//!
//! ```javascript
//! function f() { yield 1; }
//! // =>
//! function f() { return __generator(this, function* () { yield 1; }); }
//!
//! function g() { await v = p; use(v); }
//! // =>
//! function g() { return __awaiter(this, function* () { v = yield p; use(v); }); }
//! ```
//!
//! `this` is forwarded explicitly because the inner function expression
//! would otherwise rebind it.

use std::rc::Rc;

use gtp_ast::factory::{
    create_assignment, create_call, create_function_expression, create_identifier, create_return,
    create_this, create_yield_expression, update_kind,
};
use gtp_ast::{Node, NodeKind, NodeRef, Transformer, Visitor, dispatch_transform, walk_children};
use gtp_common::ErrorReporter;
use gtp_common::diagnostics::diagnostic_messages;

use super::{AsyncLowering, GeneratorLowering};
use crate::options::RuntimeHelpers;

#[derive(Debug, Clone, Default)]
pub struct RuntimeHelperLowering {
    helpers: RuntimeHelpers,
}

impl RuntimeHelperLowering {
    #[must_use]
    pub const fn new(helpers: RuntimeHelpers) -> Self {
        Self { helpers }
    }

    /// `{ return helper(this, function* () body); }`, keeping the body's span.
    fn wrap(helper: &str, body: &NodeRef) -> NodeRef {
        let driver = create_function_expression(vec![], Rc::clone(body), true);
        let call = create_call(create_identifier(helper), vec![create_this(), driver]);
        update_kind(
            body,
            NodeKind::Block {
                statements: vec![create_return(Some(call))],
            },
        )
    }
}

impl GeneratorLowering for RuntimeHelperLowering {
    fn lower_generator_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        GeneratorBodyValidator { reporter }.visit_any(body);
        tracing::debug!(helper = %self.helpers.generator, "[runtime] wrapping generator body");
        Self::wrap(&self.helpers.generator, body)
    }
}

impl AsyncLowering for RuntimeHelperLowering {
    fn lower_async_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        let body = AwaitRewriter { reporter }.transform_any(body);
        tracing::debug!(helper = %self.helpers.awaiter, "[runtime] wrapping async body");
        Self::wrap(&self.helpers.awaiter, &body)
    }
}

/// Flags constructs a generator driver cannot run.
struct GeneratorBodyValidator<'a> {
    reporter: &'a mut ErrorReporter,
}

impl Visitor for GeneratorBodyValidator<'_> {
    fn visit_suspension_statement(&mut self, node: &Node) {
        if let NodeKind::SuspensionStatement {
            is_iteration_form: true,
            ..
        } = node.kind
        {
            self.reporter.report_error(
                node.span,
                &diagnostic_messages::UNDESUGARED_ITERATION_SUSPENSION,
                &[],
            );
        }
        walk_children(self, node);
    }

    fn visit_async_suspension_statement(&mut self, node: &Node) {
        self.reporter.report_error(
            node.span,
            &diagnostic_messages::ASYNC_SUSPENSION_IN_GENERATOR,
            &[],
        );
        walk_children(self, node);
    }

    fn visit_function_declaration(&mut self, _node: &Node) {}

    fn visit_function_expression(&mut self, _node: &Node) {}

    fn visit_get_accessor(&mut self, _node: &Node) {}

    fn visit_set_accessor(&mut self, _node: &Node) {}
}

/// `await x = e;` => `x = yield e;`, `await e;` => `yield e;`.
struct AwaitRewriter<'a> {
    reporter: &'a mut ErrorReporter,
}

impl Transformer for AwaitRewriter<'_> {
    fn transform_any(&mut self, node: &NodeRef) -> NodeRef {
        if matches!(node.kind, NodeKind::YieldExpression { .. }) {
            self.reporter.report_error(
                node.span,
                &diagnostic_messages::SUSPENSION_IN_ASYNC_BODY,
                &[],
            );
        }
        dispatch_transform(self, node)
    }

    fn transform_suspension_statement(&mut self, node: &NodeRef) -> NodeRef {
        self.reporter.report_error(
            node.span,
            &diagnostic_messages::SUSPENSION_IN_ASYNC_BODY,
            &[],
        );
        Rc::clone(node)
    }

    fn transform_async_suspension_statement(&mut self, node: &NodeRef) -> NodeRef {
        let NodeKind::AsyncSuspensionStatement {
            binding,
            expression,
        } = &node.kind
        else {
            return Rc::clone(node);
        };
        let expression = self.transform_any(expression);
        let resumed = create_yield_expression(Some(expression));
        let expression = match binding {
            Some(name) => create_assignment(create_identifier(name), resumed),
            None => resumed,
        };
        update_kind(node, NodeKind::ExpressionStatement { expression })
    }

    fn transform_function_declaration(&mut self, node: &NodeRef) -> NodeRef {
        Rc::clone(node)
    }

    fn transform_function_expression(&mut self, node: &NodeRef) -> NodeRef {
        Rc::clone(node)
    }

    fn transform_get_accessor(&mut self, node: &NodeRef) -> NodeRef {
        Rc::clone(node)
    }

    fn transform_set_accessor(&mut self, node: &NodeRef) -> NodeRef {
        Rc::clone(node)
    }
}

#[cfg(test)]
#[path = "../../tests/runtime_helpers.rs"]
mod tests;
