//! Desugaring of iteration-form suspensions.
//!
//! `yield for E;` suspends once per element produced by `E`. Within one body
//! it is rewritten to
//!
//! ```javascript
//! for (var $__n of E) { yield $__n; }
//! ```
//!
//! and the loop goes straight to a [`ForEachLowering`], whose output replaces
//! the statement. The generated `yield` is an ordinary suspension, so the
//! body afterwards holds only forms generator lowering understands.

use std::rc::Rc;

use gtp_ast::factory::{
    create_block, create_identifier, create_suspension_statement, create_variable_statement,
    update_kind,
};
use gtp_ast::{NodeKind, NodeRef, Transformer, transform_children};
use gtp_common::UniqueIdentifierGenerator;

use crate::collaborators::ForEachLowering;

pub struct IterationSuspensionDesugarer<'a, F: ForEachLowering + ?Sized> {
    ids: &'a mut UniqueIdentifierGenerator,
    for_each: &'a mut F,
}

impl<'a, F: ForEachLowering + ?Sized> IterationSuspensionDesugarer<'a, F> {
    pub fn new(ids: &'a mut UniqueIdentifierGenerator, for_each: &'a mut F) -> Self {
        Self { ids, for_each }
    }

    /// Rewrite every iteration-form suspension at `body`'s own scope.
    ///
    /// Returns `body` itself when it holds none.
    pub fn transform_tree(
        ids: &'a mut UniqueIdentifierGenerator,
        for_each: &'a mut F,
        body: &NodeRef,
    ) -> NodeRef {
        Self::new(ids, for_each).transform_any(body)
    }
}

impl<F: ForEachLowering + ?Sized> Transformer for IterationSuspensionDesugarer<'_, F> {
    fn transform_suspension_statement(&mut self, node: &NodeRef) -> NodeRef {
        let NodeKind::SuspensionStatement {
            is_iteration_form: true,
            expression: Some(expression),
        } = &node.kind
        else {
            return transform_children(self, node);
        };

        let element = self.ids.generate_unique_identifier();
        tracing::trace!(element = %element, "[desugar] yield for");
        let loop_node = update_kind(
            node,
            NodeKind::ForEachStatement {
                initializer: create_variable_statement(&element, None),
                expression: Rc::clone(expression),
                body: create_block(vec![create_suspension_statement(
                    Some(create_identifier(&element)),
                    false,
                )]),
            },
        );
        self.for_each.lower_for_each(self.ids, &loop_node)
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
#[path = "../tests/iteration_suspension.rs"]
mod tests;
