//! Node constructors and update helpers.
//!
//! `create_*` functions allocate synthetic nodes. `update_*` functions rebuild
//! a declaration around a new body and hand back the original node when the
//! body did not change.

use std::rc::Rc;

use crate::node::{BinaryOperator, Node, NodeKind, NodeRef, UnaryOperator, UpdateOperator};

pub fn create_identifier(name: impl Into<String>) -> NodeRef {
    Node::new(NodeKind::Identifier { name: name.into() })
}

pub fn create_number(value: f64) -> NodeRef {
    Node::new(NodeKind::NumericLiteral { value })
}

pub fn create_string(value: impl Into<String>) -> NodeRef {
    Node::new(NodeKind::StringLiteral {
        value: value.into(),
    })
}

pub fn create_this() -> NodeRef {
    Node::new(NodeKind::ThisExpression)
}

pub fn create_array_literal(elements: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::ArrayLiteral { elements })
}

pub fn create_call(callee: NodeRef, arguments: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::CallExpression { callee, arguments })
}

pub fn create_property_access(object: NodeRef, name: impl Into<String>) -> NodeRef {
    Node::new(NodeKind::PropertyAccess {
        object,
        name: name.into(),
    })
}

/// `object.name(arguments)`
pub fn create_method_call(object: NodeRef, name: &str, arguments: Vec<NodeRef>) -> NodeRef {
    create_call(create_property_access(object, name), arguments)
}

pub fn create_element_access(object: NodeRef, index: NodeRef) -> NodeRef {
    Node::new(NodeKind::ElementAccess { object, index })
}

pub fn create_binary(operator: BinaryOperator, left: NodeRef, right: NodeRef) -> NodeRef {
    Node::new(NodeKind::BinaryExpression {
        operator,
        left,
        right,
    })
}

pub fn create_assignment(target: NodeRef, value: NodeRef) -> NodeRef {
    create_binary(BinaryOperator::Assign, target, value)
}

pub fn create_unary(operator: UnaryOperator, operand: NodeRef) -> NodeRef {
    Node::new(NodeKind::UnaryExpression { operator, operand })
}

pub fn create_not(operand: NodeRef) -> NodeRef {
    create_unary(UnaryOperator::Not, operand)
}

pub fn create_postfix_increment(operand: NodeRef) -> NodeRef {
    Node::new(NodeKind::UpdateExpression {
        operator: UpdateOperator::Increment,
        prefix: false,
        operand,
    })
}

pub fn create_yield_expression(expression: Option<NodeRef>) -> NodeRef {
    Node::new(NodeKind::YieldExpression { expression })
}

pub fn create_function_expression(
    parameters: Vec<NodeRef>,
    body: NodeRef,
    is_generator: bool,
) -> NodeRef {
    Node::new(NodeKind::FunctionExpression {
        name: None,
        parameters,
        body,
        is_generator,
    })
}

// =============================================================================
// Statements
// =============================================================================

pub fn create_block(statements: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::Block { statements })
}

/// `var name = initializer;`
pub fn create_variable_statement(name: impl Into<String>, initializer: Option<NodeRef>) -> NodeRef {
    Node::new(NodeKind::VariableStatement {
        declarations: vec![create_variable_declaration(name, initializer)],
    })
}

pub fn create_variable_declaration(
    name: impl Into<String>,
    initializer: Option<NodeRef>,
) -> NodeRef {
    Node::new(NodeKind::VariableDeclaration {
        name: name.into(),
        initializer,
    })
}

pub fn create_expression_statement(expression: NodeRef) -> NodeRef {
    Node::new(NodeKind::ExpressionStatement { expression })
}

pub fn create_assignment_statement(target: NodeRef, value: NodeRef) -> NodeRef {
    create_expression_statement(create_assignment(target, value))
}

pub fn create_return(expression: Option<NodeRef>) -> NodeRef {
    Node::new(NodeKind::ReturnStatement { expression })
}

pub fn create_continue() -> NodeRef {
    Node::new(NodeKind::ContinueStatement { label: None })
}

pub fn create_if(
    condition: NodeRef,
    then_statement: NodeRef,
    else_statement: Option<NodeRef>,
) -> NodeRef {
    Node::new(NodeKind::IfStatement {
        condition,
        then_statement,
        else_statement,
    })
}

pub fn create_for(
    initializer: Option<NodeRef>,
    condition: Option<NodeRef>,
    incrementor: Option<NodeRef>,
    body: NodeRef,
) -> NodeRef {
    Node::new(NodeKind::ForStatement {
        initializer,
        condition,
        incrementor,
        body,
    })
}

pub fn create_for_in(initializer: NodeRef, expression: NodeRef, body: NodeRef) -> NodeRef {
    Node::new(NodeKind::ForInStatement {
        initializer,
        expression,
        body,
    })
}

pub fn create_for_each(initializer: NodeRef, expression: NodeRef, body: NodeRef) -> NodeRef {
    Node::new(NodeKind::ForEachStatement {
        initializer,
        expression,
        body,
    })
}

pub fn create_suspension_statement(expression: Option<NodeRef>, is_iteration_form: bool) -> NodeRef {
    Node::new(NodeKind::SuspensionStatement {
        is_iteration_form,
        expression,
    })
}

pub fn create_async_suspension_statement(binding: Option<String>, expression: NodeRef) -> NodeRef {
    Node::new(NodeKind::AsyncSuspensionStatement {
        binding,
        expression,
    })
}

// =============================================================================
// Updates
// =============================================================================

/// Rebuild `node` with `kind`, keeping its span.
pub fn update_kind(node: &NodeRef, kind: NodeKind) -> NodeRef {
    Node::with_span(node.span, kind)
}

/// Replace the body of a function-like declaration.
///
/// Name, static flag and parameters are carried over untouched. Returns the
/// original `Rc` when `body` is the declaration's current body or when `node`
/// has no body to replace.
pub fn update_function_body(node: &NodeRef, body: NodeRef) -> NodeRef {
    let Some(current) = node.function_body() else {
        return Rc::clone(node);
    };
    if Rc::ptr_eq(current, &body) {
        return Rc::clone(node);
    }
    let kind = match &node.kind {
        NodeKind::FunctionDeclaration {
            name,
            is_static,
            parameters,
            ..
        } => NodeKind::FunctionDeclaration {
            name: name.clone(),
            is_static: *is_static,
            parameters: parameters.clone(),
            body,
        },
        NodeKind::FunctionExpression {
            name,
            parameters,
            is_generator,
            ..
        } => NodeKind::FunctionExpression {
            name: name.clone(),
            parameters: parameters.clone(),
            body,
            is_generator: *is_generator,
        },
        NodeKind::GetAccessorDeclaration {
            name, is_static, ..
        } => NodeKind::GetAccessorDeclaration {
            name: name.clone(),
            is_static: *is_static,
            body,
        },
        NodeKind::SetAccessorDeclaration {
            name,
            is_static,
            parameter,
            ..
        } => NodeKind::SetAccessorDeclaration {
            name: name.clone(),
            is_static: *is_static,
            parameter: Rc::clone(parameter),
            body,
        },
        _ => return Rc::clone(node),
    };
    update_kind(node, kind)
}

/// Statements of a `Block` or `Program`, or the node itself as a single
/// statement.
pub fn statements_of(node: &NodeRef) -> Vec<NodeRef> {
    match &node.kind {
        NodeKind::Block { statements } | NodeKind::Program { statements } => statements.clone(),
        _ => vec![Rc::clone(node)],
    }
}
