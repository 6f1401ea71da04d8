//! Shared fixtures for the lowering integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtp_ast::factory::{create_block, create_identifier, create_suspension_statement};
use gtp_ast::{BinaryOperator, Node, NodeKind, NodeRef, UnaryOperator, UpdateOperator};
use gtp_common::{ErrorReporter, UniqueIdentifierGenerator};
use gtp_lowering::collaborators::ForEachTransformer;
use gtp_lowering::{AsyncLowering, ForEachLowering, ForInLowering, GeneratorLowering};

// =============================================================================
// Tree builders
// =============================================================================

pub fn function(name: &str, statements: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::FunctionDeclaration {
        name: Some(name.to_string()),
        is_static: false,
        parameters: vec![],
        body: create_block(statements),
    })
}

pub fn program(statements: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::Program { statements })
}

pub fn yield_of(name: &str) -> NodeRef {
    create_suspension_statement(Some(create_identifier(name)), false)
}

pub fn yield_for(expression: NodeRef) -> NodeRef {
    create_suspension_statement(Some(expression), true)
}

pub fn function_body(node: &NodeRef) -> NodeRef {
    match node.function_body() {
        Some(body) => Rc::clone(body),
        None => panic!("not a function-like node: {}", node.kind_name()),
    }
}

// =============================================================================
// Recording collaborators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ForIn,
    ForEach,
    Generator,
    Async,
}

/// Collaborators that log every call and return their input untouched,
/// except for-each lowering which runs the reference transformer.
pub struct Recording {
    pub calls: Vec<Call>,
    /// Bodies handed to generator or async lowering, in call order.
    pub lowered_bodies: Vec<NodeRef>,
    for_each: ForEachTransformer,
}

impl Default for Recording {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            lowered_bodies: Vec::new(),
            for_each: ForEachTransformer::new("__getIterator"),
        }
    }
}

impl ForInLowering for Recording {
    fn lower_for_in(&mut self, _ids: &mut UniqueIdentifierGenerator, tree: &NodeRef) -> NodeRef {
        self.calls.push(Call::ForIn);
        Rc::clone(tree)
    }
}

impl ForEachLowering for Recording {
    fn lower_for_each(
        &mut self,
        ids: &mut UniqueIdentifierGenerator,
        for_each: &NodeRef,
    ) -> NodeRef {
        self.calls.push(Call::ForEach);
        self.for_each.lower_for_each(ids, for_each)
    }
}

impl GeneratorLowering for Recording {
    fn lower_generator_body(&mut self, _reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        self.calls.push(Call::Generator);
        self.lowered_bodies.push(Rc::clone(body));
        Rc::clone(body)
    }
}

impl AsyncLowering for Recording {
    fn lower_async_body(&mut self, _reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        self.calls.push(Call::Async);
        self.lowered_bodies.push(Rc::clone(body));
        Rc::clone(body)
    }
}

// =============================================================================
// Evaluator
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Number(f64),
    Bool(bool),
    Str(String),
    Array(Rc<Vec<Value>>),
    Iterator(Rc<IteratorState>),
    Step { done: bool, value: Box<Value> },
}

#[derive(Debug, PartialEq)]
pub struct IteratorState {
    items: Rc<Vec<Value>>,
    position: Cell<usize>,
}

/// Runs the statement subset the iteration lowerings produce and records
/// every value passed to an ordinary suspension.
///
/// `source()` returns the configured items and counts how often it ran.
/// `__getIterator(array)` and `iterator.next()` follow the iteration protocol.
pub struct Evaluator {
    scopes: RefCell<Vec<(String, Value)>>,
    items: Rc<Vec<Value>>,
    pub source_calls: Cell<u32>,
    pub suspended: RefCell<Vec<Value>>,
}

impl Evaluator {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            scopes: RefCell::new(Vec::new()),
            items: Rc::new(items),
            source_calls: Cell::new(0),
            suspended: RefCell::new(Vec::new()),
        }
    }

    pub fn run(&self, body: &Node) {
        self.statement(body);
    }

    fn lookup(&self, name: &str) -> Value {
        self.scopes
            .borrow()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map_or(Value::Undefined, |(_, v)| v.clone())
    }

    fn assign(&self, name: &str, value: Value) {
        let mut scopes = self.scopes.borrow_mut();
        match scopes.iter_mut().rev().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => scopes.push((name.to_string(), value)),
        }
    }

    fn statement(&self, node: &Node) {
        match &node.kind {
            NodeKind::Program { statements } | NodeKind::Block { statements } => {
                for statement in statements {
                    self.statement(statement);
                }
            }
            NodeKind::VariableStatement { declarations } => {
                for declaration in declarations {
                    if let NodeKind::VariableDeclaration { name, initializer } = &declaration.kind {
                        let value = initializer
                            .as_ref()
                            .map_or(Value::Undefined, |e| self.expression(e));
                        self.assign(name, value);
                    }
                }
            }
            NodeKind::ExpressionStatement { expression } => {
                self.expression(expression);
            }
            NodeKind::ForStatement {
                initializer,
                condition,
                incrementor,
                body,
            } => {
                if let Some(initializer) = initializer {
                    self.statement(initializer);
                }
                while condition
                    .as_ref()
                    .is_none_or(|c| self.expression(c) == Value::Bool(true))
                {
                    self.statement(body);
                    if let Some(incrementor) = incrementor {
                        self.expression(incrementor);
                    }
                }
            }
            NodeKind::SuspensionStatement {
                is_iteration_form,
                expression,
            } => {
                let value = expression
                    .as_ref()
                    .map_or(Value::Undefined, |e| self.expression(e));
                if *is_iteration_form {
                    if let Value::Array(items) = value {
                        self.suspended.borrow_mut().extend(items.iter().cloned());
                    }
                } else {
                    self.suspended.borrow_mut().push(value);
                }
            }
            other => panic!("evaluator does not run {}", other.name()),
        }
    }

    fn expression(&self, node: &Node) -> Value {
        match &node.kind {
            NodeKind::Identifier { name } => self.lookup(name),
            NodeKind::NumericLiteral { value } => Value::Number(*value),
            NodeKind::StringLiteral { value } => Value::Str(value.clone()),
            NodeKind::BooleanLiteral { value } => Value::Bool(*value),
            NodeKind::ArrayLiteral { elements } => {
                Value::Array(Rc::new(elements.iter().map(|e| self.expression(e)).collect()))
            }
            NodeKind::CallExpression { callee, arguments } => self.call(callee, arguments),
            NodeKind::PropertyAccess { object, name } => match (self.expression(object), name.as_str()) {
                (Value::Step { done, .. }, "done") => Value::Bool(done),
                (Value::Step { value, .. }, "value") => *value,
                (Value::Array(items), "length") => Value::Number(items.len() as f64),
                (value, name) => panic!("no property {name} on {value:?}"),
            },
            NodeKind::UnaryExpression {
                operator: UnaryOperator::Not,
                operand,
            } => Value::Bool(self.expression(operand) != Value::Bool(true)),
            NodeKind::BinaryExpression {
                operator: BinaryOperator::Assign,
                left,
                right,
            } => {
                let value = self.expression(right);
                match left.identifier_name() {
                    Some(name) => self.assign(name, value.clone()),
                    None => panic!("unsupported assignment target"),
                }
                value
            }
            NodeKind::BinaryExpression {
                operator: BinaryOperator::LessThan,
                left,
                right,
            } => match (self.expression(left), self.expression(right)) {
                (Value::Number(a), Value::Number(b)) => Value::Bool(a < b),
                _ => Value::Bool(false),
            },
            NodeKind::UpdateExpression {
                operator: UpdateOperator::Increment,
                operand,
                ..
            } => {
                let Value::Number(n) = self.expression(operand) else {
                    panic!("increment of a non-number");
                };
                if let Some(name) = operand.identifier_name() {
                    self.assign(name, Value::Number(n + 1.0));
                }
                Value::Number(n)
            }
            other => panic!("evaluator does not compute {}", other.name()),
        }
    }

    fn call(&self, callee: &Node, arguments: &[NodeRef]) -> Value {
        if let NodeKind::PropertyAccess { object, name } = &callee.kind
            && name == "next"
        {
            let Value::Iterator(state) = self.expression(object) else {
                panic!("next() on a non-iterator");
            };
            let position = state.position.get();
            return match state.items.get(position) {
                Some(value) => {
                    state.position.set(position + 1);
                    Value::Step {
                        done: false,
                        value: Box::new(value.clone()),
                    }
                }
                None => Value::Step {
                    done: true,
                    value: Box::new(Value::Undefined),
                },
            };
        }
        match callee.identifier_name() {
            Some("source") => {
                self.source_calls.set(self.source_calls.get() + 1);
                Value::Array(Rc::clone(&self.items))
            }
            Some("__getIterator") => match arguments.first().map(|a| self.expression(a)) {
                Some(Value::Array(items)) => Value::Iterator(Rc::new(IteratorState {
                    items,
                    position: Cell::new(0),
                })),
                other => panic!("__getIterator on {other:?}"),
            },
            other => panic!("unknown callee {other:?}"),
        }
    }
}
