//! Syntax tree node definitions.
//!
//! Nodes are immutable and shared through [`NodeRef`] (`Rc<Node>`). A rewrite
//! either hands back the very same `Rc` or allocates a new node; nothing is
//! mutated in place. Callers detect "unchanged" with [`Rc::ptr_eq`], which is
//! what keeps untouched subtrees shared between the input and output trees.
//!
//! The serialized form is internally tagged on `kind` with camelCase field
//! names:
//!
//! ```json
//! { "kind": "SuspensionStatement", "isIterationForm": true,
//!   "expression": { "kind": "Identifier", "name": "items" } }
//! ```

use std::rc::Rc;

use gtp_common::Span;
use serde::{Deserialize, Serialize};

pub type NodeRef = Rc<Node>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "is_synthetic")]
    pub span: Span,
    #[serde(flatten)]
    pub kind: NodeKind,
}

fn is_synthetic(span: &Span) -> bool {
    *span == Span::SYNTHETIC
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanEquals,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanEquals,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "===")]
    StrictEquals,
    #[serde(rename = "!==")]
    StrictNotEquals,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "||")]
    LogicalOr,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = ",")]
    Comma,
}

impl BinaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::StrictEquals => "===",
            Self::StrictNotEquals => "!==",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::Comma => ",",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Negate,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum NodeKind {
    // =========================================================================
    // Top level and declarations
    // =========================================================================
    /// A compilation unit.
    Program { statements: Vec<NodeRef> },

    FunctionDeclaration {
        name: Option<String>,
        #[serde(default)]
        is_static: bool,
        parameters: Vec<NodeRef>,
        body: NodeRef,
    },

    /// `function* () { ... }` when `is_generator` is set.
    FunctionExpression {
        name: Option<String>,
        parameters: Vec<NodeRef>,
        body: NodeRef,
        #[serde(default)]
        is_generator: bool,
    },

    GetAccessorDeclaration {
        name: String,
        #[serde(default)]
        is_static: bool,
        body: NodeRef,
    },

    SetAccessorDeclaration {
        name: String,
        #[serde(default)]
        is_static: bool,
        parameter: NodeRef,
        body: NodeRef,
    },

    ClassDeclaration { name: String, members: Vec<NodeRef> },

    // =========================================================================
    // Statements
    // =========================================================================
    Block { statements: Vec<NodeRef> },

    /// `var a = 1, b;`
    VariableStatement { declarations: Vec<NodeRef> },

    VariableDeclaration {
        name: String,
        initializer: Option<NodeRef>,
    },

    ExpressionStatement { expression: NodeRef },

    IfStatement {
        condition: NodeRef,
        then_statement: NodeRef,
        else_statement: Option<NodeRef>,
    },

    WhileStatement { condition: NodeRef, body: NodeRef },

    DoWhileStatement { body: NodeRef, condition: NodeRef },

    ForStatement {
        initializer: Option<NodeRef>,
        condition: Option<NodeRef>,
        incrementor: Option<NodeRef>,
        body: NodeRef,
    },

    /// `for (initializer in expression) body`; the initializer is either a
    /// single-declaration `VariableStatement` or an assignment target.
    ForInStatement {
        initializer: NodeRef,
        expression: NodeRef,
        body: NodeRef,
    },

    /// `for (initializer of expression) body`
    ForEachStatement {
        initializer: NodeRef,
        expression: NodeRef,
        body: NodeRef,
    },

    ReturnStatement { expression: Option<NodeRef> },

    BreakStatement { label: Option<String> },

    ContinueStatement { label: Option<String> },

    ThrowStatement { expression: NodeRef },

    TryStatement {
        try_block: NodeRef,
        catch_clause: Option<NodeRef>,
        finally_block: Option<NodeRef>,
    },

    CatchClause { binding: String, block: NodeRef },

    LabeledStatement { label: String, statement: NodeRef },

    EmptyStatement,

    /// `yield expression;`, or `yield for expression;` when `is_iteration_form`.
    SuspensionStatement {
        #[serde(default)]
        is_iteration_form: bool,
        expression: Option<NodeRef>,
    },

    /// `await binding = expression;` / `await expression;`
    AsyncSuspensionStatement {
        binding: Option<String>,
        expression: NodeRef,
    },

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier { name: String },

    NumericLiteral { value: f64 },

    StringLiteral { value: String },

    BooleanLiteral { value: bool },

    NullLiteral,

    ThisExpression,

    ArrayLiteral { elements: Vec<NodeRef> },

    ObjectLiteral { properties: Vec<NodeRef> },

    PropertyAssignment { name: String, value: NodeRef },

    CallExpression {
        callee: NodeRef,
        arguments: Vec<NodeRef>,
    },

    NewExpression {
        callee: NodeRef,
        arguments: Vec<NodeRef>,
    },

    PropertyAccess { object: NodeRef, name: String },

    ElementAccess { object: NodeRef, index: NodeRef },

    BinaryExpression {
        operator: BinaryOperator,
        left: NodeRef,
        right: NodeRef,
    },

    UnaryExpression {
        operator: UnaryOperator,
        operand: NodeRef,
    },

    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        operand: NodeRef,
    },

    ConditionalExpression {
        condition: NodeRef,
        when_true: NodeRef,
        when_false: NodeRef,
    },

    /// Expression-position `yield`, produced when a body is retargeted onto a
    /// native generator function.
    YieldExpression { expression: Option<NodeRef> },
}

impl Node {
    /// Allocate a node with a synthetic span.
    #[must_use]
    pub fn new(kind: NodeKind) -> NodeRef {
        Rc::new(Self {
            span: Span::SYNTHETIC,
            kind,
        })
    }

    #[must_use]
    pub fn with_span(span: Span, kind: NodeKind) -> NodeRef {
        Rc::new(Self { span, kind })
    }

    /// True for the declarations whose body is a suspension scope the
    /// lowering pass rewrites.
    #[must_use]
    pub const fn is_function_like(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::FunctionDeclaration { .. }
                | NodeKind::GetAccessorDeclaration { .. }
                | NodeKind::SetAccessorDeclaration { .. }
        )
    }

    /// True for every node that opens a new function scope, including
    /// function expressions.
    #[must_use]
    pub const fn is_function_scope(&self) -> bool {
        self.is_function_like() || matches!(self.kind, NodeKind::FunctionExpression { .. })
    }

    #[must_use]
    pub const fn function_body(&self) -> Option<&NodeRef> {
        match &self.kind {
            NodeKind::FunctionDeclaration { body, .. }
            | NodeKind::FunctionExpression { body, .. }
            | NodeKind::GetAccessorDeclaration { body, .. }
            | NodeKind::SetAccessorDeclaration { body, .. } => Some(body),
            _ => None,
        }
    }

    #[must_use]
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl NodeKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::FunctionExpression { .. } => "FunctionExpression",
            Self::GetAccessorDeclaration { .. } => "GetAccessorDeclaration",
            Self::SetAccessorDeclaration { .. } => "SetAccessorDeclaration",
            Self::ClassDeclaration { .. } => "ClassDeclaration",
            Self::Block { .. } => "Block",
            Self::VariableStatement { .. } => "VariableStatement",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::WhileStatement { .. } => "WhileStatement",
            Self::DoWhileStatement { .. } => "DoWhileStatement",
            Self::ForStatement { .. } => "ForStatement",
            Self::ForInStatement { .. } => "ForInStatement",
            Self::ForEachStatement { .. } => "ForEachStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::BreakStatement { .. } => "BreakStatement",
            Self::ContinueStatement { .. } => "ContinueStatement",
            Self::ThrowStatement { .. } => "ThrowStatement",
            Self::TryStatement { .. } => "TryStatement",
            Self::CatchClause { .. } => "CatchClause",
            Self::LabeledStatement { .. } => "LabeledStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::SuspensionStatement { .. } => "SuspensionStatement",
            Self::AsyncSuspensionStatement { .. } => "AsyncSuspensionStatement",
            Self::Identifier { .. } => "Identifier",
            Self::NumericLiteral { .. } => "NumericLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::ThisExpression => "ThisExpression",
            Self::ArrayLiteral { .. } => "ArrayLiteral",
            Self::ObjectLiteral { .. } => "ObjectLiteral",
            Self::PropertyAssignment { .. } => "PropertyAssignment",
            Self::CallExpression { .. } => "CallExpression",
            Self::NewExpression { .. } => "NewExpression",
            Self::PropertyAccess { .. } => "PropertyAccess",
            Self::ElementAccess { .. } => "ElementAccess",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::UpdateExpression { .. } => "UpdateExpression",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::YieldExpression { .. } => "YieldExpression",
        }
    }

    /// Call `f` on every direct child, in source order.
    pub fn for_each_child(&self, f: &mut dyn FnMut(&NodeRef)) {
        match self {
            Self::Program { statements } | Self::Block { statements } => {
                statements.iter().for_each(|s| f(s));
            }
            Self::FunctionDeclaration {
                parameters, body, ..
            }
            | Self::FunctionExpression {
                parameters, body, ..
            } => {
                parameters.iter().for_each(|p| f(p));
                f(body);
            }
            Self::GetAccessorDeclaration { body, .. } => f(body),
            Self::SetAccessorDeclaration {
                parameter, body, ..
            } => {
                f(parameter);
                f(body);
            }
            Self::ClassDeclaration { members, .. } => members.iter().for_each(|m| f(m)),
            Self::VariableStatement { declarations } => declarations.iter().for_each(|d| f(d)),
            Self::VariableDeclaration { initializer, .. } => visit_opt(initializer, f),
            Self::ExpressionStatement { expression } | Self::ThrowStatement { expression } => {
                f(expression);
            }
            Self::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                f(condition);
                f(then_statement);
                visit_opt(else_statement, f);
            }
            Self::WhileStatement { condition, body } => {
                f(condition);
                f(body);
            }
            Self::DoWhileStatement { body, condition } => {
                f(body);
                f(condition);
            }
            Self::ForStatement {
                initializer,
                condition,
                incrementor,
                body,
            } => {
                visit_opt(initializer, f);
                visit_opt(condition, f);
                visit_opt(incrementor, f);
                f(body);
            }
            Self::ForInStatement {
                initializer,
                expression,
                body,
            }
            | Self::ForEachStatement {
                initializer,
                expression,
                body,
            } => {
                f(initializer);
                f(expression);
                f(body);
            }
            Self::ReturnStatement { expression }
            | Self::SuspensionStatement { expression, .. }
            | Self::YieldExpression { expression } => visit_opt(expression, f),
            Self::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => {
                f(try_block);
                visit_opt(catch_clause, f);
                visit_opt(finally_block, f);
            }
            Self::CatchClause { block, .. } => f(block),
            Self::LabeledStatement { statement, .. } => f(statement),
            Self::AsyncSuspensionStatement { expression, .. } => f(expression),
            Self::ArrayLiteral { elements } => elements.iter().for_each(|e| f(e)),
            Self::ObjectLiteral { properties } => properties.iter().for_each(|p| f(p)),
            Self::PropertyAssignment { value, .. } => f(value),
            Self::CallExpression { callee, arguments } | Self::NewExpression { callee, arguments } => {
                f(callee);
                arguments.iter().for_each(|a| f(a));
            }
            Self::PropertyAccess { object, .. } => f(object),
            Self::ElementAccess { object, index } => {
                f(object);
                f(index);
            }
            Self::BinaryExpression { left, right, .. } => {
                f(left);
                f(right);
            }
            Self::UnaryExpression { operand, .. } | Self::UpdateExpression { operand, .. } => {
                f(operand);
            }
            Self::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                f(condition);
                f(when_true);
                f(when_false);
            }
            Self::BreakStatement { .. }
            | Self::ContinueStatement { .. }
            | Self::EmptyStatement
            | Self::Identifier { .. }
            | Self::NumericLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::ThisExpression => {}
        }
    }

    /// Rebuild this kind with every direct child passed through `f`.
    ///
    /// Returns `None` when `f` handed back every child unchanged (by
    /// reference), so the caller can keep the original node.
    pub fn map_children(&self, f: &mut dyn FnMut(&NodeRef) -> NodeRef) -> Option<Self> {
        let mut m = ChildMapper { f, changed: false };
        let kind = match self {
            Self::Program { statements } => Self::Program {
                statements: m.list(statements),
            },
            Self::Block { statements } => Self::Block {
                statements: m.list(statements),
            },
            Self::FunctionDeclaration {
                name,
                is_static,
                parameters,
                body,
            } => Self::FunctionDeclaration {
                name: name.clone(),
                is_static: *is_static,
                parameters: m.list(parameters),
                body: m.one(body),
            },
            Self::FunctionExpression {
                name,
                parameters,
                body,
                is_generator,
            } => Self::FunctionExpression {
                name: name.clone(),
                parameters: m.list(parameters),
                body: m.one(body),
                is_generator: *is_generator,
            },
            Self::GetAccessorDeclaration {
                name,
                is_static,
                body,
            } => Self::GetAccessorDeclaration {
                name: name.clone(),
                is_static: *is_static,
                body: m.one(body),
            },
            Self::SetAccessorDeclaration {
                name,
                is_static,
                parameter,
                body,
            } => Self::SetAccessorDeclaration {
                name: name.clone(),
                is_static: *is_static,
                parameter: m.one(parameter),
                body: m.one(body),
            },
            Self::ClassDeclaration { name, members } => Self::ClassDeclaration {
                name: name.clone(),
                members: m.list(members),
            },
            Self::VariableStatement { declarations } => Self::VariableStatement {
                declarations: m.list(declarations),
            },
            Self::VariableDeclaration { name, initializer } => Self::VariableDeclaration {
                name: name.clone(),
                initializer: m.opt(initializer),
            },
            Self::ExpressionStatement { expression } => Self::ExpressionStatement {
                expression: m.one(expression),
            },
            Self::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => Self::IfStatement {
                condition: m.one(condition),
                then_statement: m.one(then_statement),
                else_statement: m.opt(else_statement),
            },
            Self::WhileStatement { condition, body } => Self::WhileStatement {
                condition: m.one(condition),
                body: m.one(body),
            },
            Self::DoWhileStatement { body, condition } => Self::DoWhileStatement {
                body: m.one(body),
                condition: m.one(condition),
            },
            Self::ForStatement {
                initializer,
                condition,
                incrementor,
                body,
            } => Self::ForStatement {
                initializer: m.opt(initializer),
                condition: m.opt(condition),
                incrementor: m.opt(incrementor),
                body: m.one(body),
            },
            Self::ForInStatement {
                initializer,
                expression,
                body,
            } => Self::ForInStatement {
                initializer: m.one(initializer),
                expression: m.one(expression),
                body: m.one(body),
            },
            Self::ForEachStatement {
                initializer,
                expression,
                body,
            } => Self::ForEachStatement {
                initializer: m.one(initializer),
                expression: m.one(expression),
                body: m.one(body),
            },
            Self::ReturnStatement { expression } => Self::ReturnStatement {
                expression: m.opt(expression),
            },
            Self::ThrowStatement { expression } => Self::ThrowStatement {
                expression: m.one(expression),
            },
            Self::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => Self::TryStatement {
                try_block: m.one(try_block),
                catch_clause: m.opt(catch_clause),
                finally_block: m.opt(finally_block),
            },
            Self::CatchClause { binding, block } => Self::CatchClause {
                binding: binding.clone(),
                block: m.one(block),
            },
            Self::LabeledStatement { label, statement } => Self::LabeledStatement {
                label: label.clone(),
                statement: m.one(statement),
            },
            Self::SuspensionStatement {
                is_iteration_form,
                expression,
            } => Self::SuspensionStatement {
                is_iteration_form: *is_iteration_form,
                expression: m.opt(expression),
            },
            Self::AsyncSuspensionStatement {
                binding,
                expression,
            } => Self::AsyncSuspensionStatement {
                binding: binding.clone(),
                expression: m.one(expression),
            },
            Self::ArrayLiteral { elements } => Self::ArrayLiteral {
                elements: m.list(elements),
            },
            Self::ObjectLiteral { properties } => Self::ObjectLiteral {
                properties: m.list(properties),
            },
            Self::PropertyAssignment { name, value } => Self::PropertyAssignment {
                name: name.clone(),
                value: m.one(value),
            },
            Self::CallExpression { callee, arguments } => Self::CallExpression {
                callee: m.one(callee),
                arguments: m.list(arguments),
            },
            Self::NewExpression { callee, arguments } => Self::NewExpression {
                callee: m.one(callee),
                arguments: m.list(arguments),
            },
            Self::PropertyAccess { object, name } => Self::PropertyAccess {
                object: m.one(object),
                name: name.clone(),
            },
            Self::ElementAccess { object, index } => Self::ElementAccess {
                object: m.one(object),
                index: m.one(index),
            },
            Self::BinaryExpression {
                operator,
                left,
                right,
            } => Self::BinaryExpression {
                operator: *operator,
                left: m.one(left),
                right: m.one(right),
            },
            Self::UnaryExpression { operator, operand } => Self::UnaryExpression {
                operator: *operator,
                operand: m.one(operand),
            },
            Self::UpdateExpression {
                operator,
                prefix,
                operand,
            } => Self::UpdateExpression {
                operator: *operator,
                prefix: *prefix,
                operand: m.one(operand),
            },
            Self::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => Self::ConditionalExpression {
                condition: m.one(condition),
                when_true: m.one(when_true),
                when_false: m.one(when_false),
            },
            Self::YieldExpression { expression } => Self::YieldExpression {
                expression: m.opt(expression),
            },
            Self::BreakStatement { .. }
            | Self::ContinueStatement { .. }
            | Self::EmptyStatement
            | Self::Identifier { .. }
            | Self::NumericLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::ThisExpression => return None,
        };
        m.changed.then_some(kind)
    }
}

fn visit_opt(node: &Option<NodeRef>, f: &mut dyn FnMut(&NodeRef)) {
    if let Some(node) = node {
        f(node);
    }
}

struct ChildMapper<'f> {
    f: &'f mut dyn FnMut(&NodeRef) -> NodeRef,
    changed: bool,
}

impl ChildMapper<'_> {
    fn one(&mut self, node: &NodeRef) -> NodeRef {
        let result = (self.f)(node);
        if !Rc::ptr_eq(&result, node) {
            self.changed = true;
        }
        result
    }

    fn opt(&mut self, node: &Option<NodeRef>) -> Option<NodeRef> {
        node.as_ref().map(|n| self.one(n))
    }

    fn list(&mut self, nodes: &[NodeRef]) -> Vec<NodeRef> {
        nodes.iter().map(|n| self.one(n)).collect()
    }
}
