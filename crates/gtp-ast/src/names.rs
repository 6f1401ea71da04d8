//! Collection of every name a tree already uses.

use rustc_hash::FxHashSet;

use crate::node::{Node, NodeKind, NodeRef};

/// Every identifier, declared name, label and binding in `root`, nested
/// functions included.
///
/// Seeding a `UniqueIdentifierGenerator` with this set guarantees generated
/// temporaries never capture or shadow a user name. The walk keeps its own
/// worklist, so nesting depth is bounded by memory rather than the stack.
#[must_use]
pub fn collect_names(root: &Node) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    let mut pending: Vec<NodeRef> = Vec::new();

    add_declared_name(&mut names, root);
    root.kind.for_each_child(&mut |child| pending.push(NodeRef::clone(child)));
    while let Some(node) = pending.pop() {
        add_declared_name(&mut names, &node);
        node.kind
            .for_each_child(&mut |child| pending.push(NodeRef::clone(child)));
    }
    names
}

fn add_declared_name(names: &mut FxHashSet<String>, node: &Node) {
    let name = match &node.kind {
        NodeKind::Identifier { name }
        | NodeKind::VariableDeclaration { name, .. }
        | NodeKind::ClassDeclaration { name, .. }
        | NodeKind::CatchClause { binding: name, .. }
        | NodeKind::LabeledStatement { label: name, .. } => name,
        NodeKind::FunctionDeclaration {
            name: Some(name), ..
        }
        | NodeKind::FunctionExpression {
            name: Some(name), ..
        }
        | NodeKind::AsyncSuspensionStatement {
            binding: Some(name),
            ..
        } => name,
        _ => return,
    };
    if !names.contains(name) {
        names.insert(name.clone());
    }
}
