//! Syntax tree for the gtp lowering pipeline.
//!
//! - [`node`]: immutable, `Rc`-shared nodes (`Node`, `NodeKind`, `NodeRef`)
//! - [`factory`]: constructors for synthetic nodes and body-replacing updates
//! - [`visitor`]: read-only walks with per-kind hooks
//! - [`transform`]: identity-preserving rewrites with per-kind hooks
//! - [`printer`]: JavaScript-like rendering
//! - [`names`]: every name a tree already uses

pub mod factory;
pub mod names;
pub mod node;
pub mod printer;
pub mod transform;
pub mod visitor;

pub use node::{BinaryOperator, Node, NodeKind, NodeRef, UnaryOperator, UpdateOperator};
pub use printer::print;
pub use transform::{Transformer, dispatch_transform, transform_children};
pub use visitor::{Visitor, dispatch_visit, walk_children};
