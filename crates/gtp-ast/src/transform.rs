//! Generic tree rewriting.
//!
//! A [`Transformer`] maps a tree to a tree. Every per-kind hook defaults to
//! [`transform_children`], which rewrites the children and rebuilds the node
//! only when at least one child came back as a different `Rc`. A transform
//! that touches nothing therefore returns its input by reference, and callers
//! test for "changed" with `Rc::ptr_eq`.

use std::rc::Rc;

use crate::node::{Node, NodeKind, NodeRef};

pub trait Transformer {
    fn transform_any(&mut self, node: &NodeRef) -> NodeRef {
        dispatch_transform(self, node)
    }

    fn transform_block(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_function_declaration(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_function_expression(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_get_accessor(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_set_accessor(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_for_in_statement(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_for_each_statement(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_suspension_statement(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }

    fn transform_async_suspension_statement(&mut self, node: &NodeRef) -> NodeRef {
        transform_children(self, node)
    }
}

/// Route `node` to the hook for its kind. This is the body of the default
/// [`Transformer::transform_any`], exposed so an override can wrap it.
pub fn dispatch_transform<T: Transformer + ?Sized>(transformer: &mut T, node: &NodeRef) -> NodeRef {
    match &node.kind {
        NodeKind::Block { .. } => transformer.transform_block(node),
        NodeKind::FunctionDeclaration { .. } => transformer.transform_function_declaration(node),
        NodeKind::FunctionExpression { .. } => transformer.transform_function_expression(node),
        NodeKind::GetAccessorDeclaration { .. } => transformer.transform_get_accessor(node),
        NodeKind::SetAccessorDeclaration { .. } => transformer.transform_set_accessor(node),
        NodeKind::ForInStatement { .. } => transformer.transform_for_in_statement(node),
        NodeKind::ForEachStatement { .. } => transformer.transform_for_each_statement(node),
        NodeKind::SuspensionStatement { .. } => transformer.transform_suspension_statement(node),
        NodeKind::AsyncSuspensionStatement { .. } => {
            transformer.transform_async_suspension_statement(node)
        }
        _ => transform_children(transformer, node),
    }
}

/// Default rewrite: transform each child, rebuild only on change.
pub fn transform_children<T: Transformer + ?Sized>(transformer: &mut T, node: &NodeRef) -> NodeRef {
    match node
        .kind
        .map_children(&mut |child| transformer.transform_any(child))
    {
        Some(kind) => Node::with_span(node.span, kind),
        None => Rc::clone(node),
    }
}

#[cfg(test)]
#[path = "../tests/transform.rs"]
mod tests;
