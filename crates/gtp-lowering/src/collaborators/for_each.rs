//! For-of lowering onto the iteration protocol.
//!
//! ```javascript
//! for (var x of items) { body }
//! ```
//! Becomes:
//! ```javascript
//! {
//!     var $__0 = __getIterator(items);
//!     for (var $__1 = $__0.next(); !$__1.done; $__1 = $__0.next()) {
//!         var x = $__1.value;
//!         body
//!     }
//! }
//! ```
//!
//! `items` is evaluated exactly once, before the first step.

use std::rc::Rc;

use gtp_ast::factory::{
    create_assignment, create_assignment_statement, create_block, create_call, create_for,
    create_identifier, create_method_call, create_not, create_property_access,
    create_variable_statement, statements_of, update_kind,
};
use gtp_ast::{NodeKind, NodeRef};
use gtp_common::UniqueIdentifierGenerator;

use super::ForEachLowering;

#[derive(Debug, Clone)]
pub struct ForEachTransformer {
    get_iterator: String,
}

impl ForEachTransformer {
    #[must_use]
    pub fn new(get_iterator: impl Into<String>) -> Self {
        Self {
            get_iterator: get_iterator.into(),
        }
    }
}

impl ForEachLowering for ForEachTransformer {
    fn lower_for_each(
        &mut self,
        ids: &mut UniqueIdentifierGenerator,
        for_each: &NodeRef,
    ) -> NodeRef {
        let NodeKind::ForEachStatement {
            initializer,
            expression,
            body,
        } = &for_each.kind
        else {
            return Rc::clone(for_each);
        };

        let iterator = ids.generate_unique_identifier();
        let step = ids.generate_unique_identifier();
        tracing::trace!(iterator = %iterator, step = %step, "[for-each] lowering");

        let next_step = || create_method_call(create_identifier(&iterator), "next", vec![]);
        let value = create_property_access(create_identifier(&step), "value");

        let mut loop_statements = vec![bind_element(initializer, value)];
        loop_statements.extend(statements_of(body));

        let walk = create_for(
            Some(create_variable_statement(&step, Some(next_step()))),
            Some(create_not(create_property_access(
                create_identifier(&step),
                "done",
            ))),
            Some(create_assignment(create_identifier(&step), next_step())),
            create_block(loop_statements),
        );

        update_kind(
            for_each,
            NodeKind::Block {
                statements: vec![
                    create_variable_statement(
                        &iterator,
                        Some(create_call(
                            create_identifier(&self.get_iterator),
                            vec![Rc::clone(expression)],
                        )),
                    ),
                    walk,
                ],
            },
        )
    }
}

fn bind_element(initializer: &NodeRef, value: NodeRef) -> NodeRef {
    if let NodeKind::VariableStatement { declarations } = &initializer.kind
        && let Some(NodeKind::VariableDeclaration { name, .. }) =
            declarations.first().map(|d| &d.kind)
    {
        return create_variable_statement(name, Some(value));
    }
    create_assignment_statement(Rc::clone(initializer), value)
}

#[cfg(test)]
#[path = "../../tests/for_each.rs"]
mod tests;
