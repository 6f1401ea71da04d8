//! ES5-style for-in lowering.
//!
//! A native `for (k in o)` enumeration cannot be paused and resumed, so a
//! loop that a suspension may cross is split into a key snapshot and an
//! indexed walk over that snapshot.
//!
//! # Transform Pattern
//!
//! ```javascript
//! for (var k in obj) { body }
//! ```
//! Becomes:
//! ```javascript
//! {
//!     var $__0 = [];
//!     var $__1 = obj;
//!     for (var $__2 in $__1) $__0.push($__2);
//!     for (var $__3 = 0; $__3 < $__0.length; $__3++) {
//!         if (!($__0[$__3] in $__1)) continue;
//!         var k = $__0[$__3];
//!         body
//!     }
//! }
//! ```
//!
//! The snapshot loop holds no suspension, so it stays a plain for-in. Keys
//! deleted while the body runs are skipped, matching native enumeration. A
//! label on the original loop moves to the indexed loop so `continue label`
//! still targets an iteration statement.

use std::rc::Rc;

use gtp_ast::factory::{
    create_array_literal, create_binary, create_block, create_continue, create_element_access,
    create_expression_statement, create_for, create_for_in, create_identifier, create_if,
    create_method_call, create_not, create_number, create_postfix_increment,
    create_property_access, create_variable_statement, statements_of, update_kind,
};
use gtp_ast::{
    BinaryOperator, Node, NodeKind, NodeRef, Transformer, dispatch_transform, transform_children,
};
use gtp_common::UniqueIdentifierGenerator;

use super::ForInLowering;

#[derive(Debug, Default)]
pub struct ForInTransformer;

impl ForInTransformer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ForInLowering for ForInTransformer {
    fn lower_for_in(&mut self, ids: &mut UniqueIdentifierGenerator, tree: &NodeRef) -> NodeRef {
        let mut rewriter = ForInRewriter { ids, lowered: 0 };
        let result = rewriter.transform_any(tree);
        tracing::debug!("[for-in] lowered {} loop(s)", rewriter.lowered);
        result
    }
}

struct ForInRewriter<'a> {
    ids: &'a mut UniqueIdentifierGenerator,
    lowered: usize,
}

impl ForInRewriter<'_> {
    fn lower(&mut self, node: &NodeRef, label: Option<&str>) -> NodeRef {
        // Inner loops first, so the generated snapshot loop is never revisited.
        let node = transform_children(self, node);
        let NodeKind::ForInStatement {
            initializer,
            expression,
            body,
        } = &node.kind
        else {
            return node;
        };
        self.lowered += 1;

        let keys = self.ids.generate_unique_identifier();
        let collection = self.ids.generate_unique_identifier();
        let property = self.ids.generate_unique_identifier();
        let index = self.ids.generate_unique_identifier();

        let current_key =
            || create_element_access(create_identifier(&keys), create_identifier(&index));

        let collect_keys = create_for_in(
            create_variable_statement(&property, None),
            create_identifier(&collection),
            create_expression_statement(create_method_call(
                create_identifier(&keys),
                "push",
                vec![create_identifier(&property)],
            )),
        );

        let mut loop_statements = Vec::new();
        loop_statements.push(create_if(
            create_not(create_binary(
                BinaryOperator::In,
                current_key(),
                create_identifier(&collection),
            )),
            create_continue(),
            None,
        ));
        loop_statements.push(bind_key(initializer, current_key()));
        loop_statements.extend(statements_of(body));

        let mut walk_keys = create_for(
            Some(create_variable_statement(&index, Some(create_number(0.0)))),
            Some(create_binary(
                BinaryOperator::LessThan,
                create_identifier(&index),
                create_property_access(create_identifier(&keys), "length"),
            )),
            Some(create_postfix_increment(create_identifier(&index))),
            create_block(loop_statements),
        );
        if let Some(label) = label {
            walk_keys = Node::new(NodeKind::LabeledStatement {
                label: label.to_string(),
                statement: walk_keys,
            });
        }

        update_kind(
            &node,
            NodeKind::Block {
                statements: vec![
                    create_variable_statement(&keys, Some(create_array_literal(vec![]))),
                    create_variable_statement(&collection, Some(Rc::clone(expression))),
                    collect_keys,
                    walk_keys,
                ],
            },
        )
    }
}

/// `var k = key;` for a declared loop variable, `target = key;` otherwise.
fn bind_key(initializer: &NodeRef, key: NodeRef) -> NodeRef {
    if let NodeKind::VariableStatement { declarations } = &initializer.kind
        && let Some(NodeKind::VariableDeclaration { name, .. }) =
            declarations.first().map(|d| &d.kind)
    {
        return create_variable_statement(name, Some(key));
    }
    create_expression_statement(create_binary(
        BinaryOperator::Assign,
        Rc::clone(initializer),
        key,
    ))
}

impl Transformer for ForInRewriter<'_> {
    fn transform_any(&mut self, node: &NodeRef) -> NodeRef {
        if let NodeKind::LabeledStatement { label, statement } = &node.kind
            && matches!(statement.kind, NodeKind::ForInStatement { .. })
        {
            return self.lower(statement, Some(label));
        }
        dispatch_transform(self, node)
    }

    fn transform_for_in_statement(&mut self, node: &NodeRef) -> NodeRef {
        self.lower(node, None)
    }

    // Nested function bodies were lowered on their own.
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
#[path = "../../tests/for_in.rs"]
mod tests;
