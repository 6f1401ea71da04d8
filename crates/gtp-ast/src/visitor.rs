//! Read-only tree walking.
//!
//! [`Visitor::visit_any`] dispatches on the node kind to a per-kind hook whose
//! default walks the children. Override a hook to observe a kind, and skip the
//! call to [`walk_children`] to stop descending there.

use crate::node::{Node, NodeKind};

pub trait Visitor {
    fn visit_any(&mut self, node: &Node) {
        dispatch_visit(self, node);
    }

    fn visit_function_declaration(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_function_expression(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_get_accessor(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_set_accessor(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_for_in_statement(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_for_each_statement(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_suspension_statement(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_async_suspension_statement(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_yield_expression(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_identifier(&mut self, _node: &Node) {}
}

/// Route `node` to the hook for its kind. This is the body of the default
/// [`Visitor::visit_any`], exposed so an override can wrap it.
pub fn dispatch_visit<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match &node.kind {
        NodeKind::FunctionDeclaration { .. } => visitor.visit_function_declaration(node),
        NodeKind::FunctionExpression { .. } => visitor.visit_function_expression(node),
        NodeKind::GetAccessorDeclaration { .. } => visitor.visit_get_accessor(node),
        NodeKind::SetAccessorDeclaration { .. } => visitor.visit_set_accessor(node),
        NodeKind::ForInStatement { .. } => visitor.visit_for_in_statement(node),
        NodeKind::ForEachStatement { .. } => visitor.visit_for_each_statement(node),
        NodeKind::SuspensionStatement { .. } => visitor.visit_suspension_statement(node),
        NodeKind::AsyncSuspensionStatement { .. } => {
            visitor.visit_async_suspension_statement(node);
        }
        NodeKind::YieldExpression { .. } => visitor.visit_yield_expression(node),
        NodeKind::Identifier { .. } => visitor.visit_identifier(node),
        _ => walk_children(visitor, node),
    }
}

pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    node.kind.for_each_child(&mut |child| visitor.visit_any(child));
}
