//! JavaScript-like printer.
//!
//! Used by the CLI's `--emit js` mode and by tests that assert on lowered
//! output. Suspension statements print in their source spelling
//! (`yield x;`, `yield for xs;`, `await v = p;`).

use crate::node::{BinaryOperator, Node, NodeKind, NodeRef};

const INDENT: &str = "    ";

/// Print `node` followed by a trailing newline for statements.
#[must_use]
pub fn print(node: &Node) -> String {
    let mut printer = Printer::new();
    printer.emit(node);
    printer.finish()
}

pub struct Printer {
    output: String,
    indent_level: u32,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            indent_level: 0,
        }
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }

    pub fn emit(&mut self, node: &Node) {
        if is_expression(node) {
            self.emit_expression(node, 0);
        } else {
            self.emit_statement(node);
        }
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_statement(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Program { statements } => {
                for statement in statements {
                    self.emit_statement(statement);
                }
            }
            NodeKind::ClassDeclaration { name, members } => {
                self.write_indent();
                self.write("class ");
                self.write(name);
                self.write(" {");
                self.newline();
                self.indent_level += 1;
                for member in members {
                    self.emit_statement(member);
                }
                self.indent_level -= 1;
                self.write_indent();
                self.write("}");
                self.newline();
            }
            NodeKind::FunctionDeclaration { .. }
            | NodeKind::GetAccessorDeclaration { .. }
            | NodeKind::SetAccessorDeclaration { .. } => {
                self.write_indent();
                self.emit_function_head(node);
                self.newline();
            }
            _ => {
                self.write_indent();
                self.emit_statement_inline(node);
                self.newline();
            }
        }
    }

    /// Emit a statement without leading indent or trailing newline.
    fn emit_statement_inline(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Block { statements } => self.emit_block(statements),
            NodeKind::VariableStatement { declarations } => {
                self.emit_variable_list(declarations);
                self.write(";");
            }
            NodeKind::VariableDeclaration { name, initializer } => {
                self.write(name);
                if let Some(initializer) = initializer {
                    self.write(" = ");
                    self.emit_expression(initializer, COMMA_PRECEDENCE + 1);
                }
            }
            NodeKind::ExpressionStatement { expression } => {
                self.emit_expression(expression, 0);
                self.write(";");
            }
            NodeKind::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                self.write("if (");
                self.emit_expression(condition, 0);
                self.write(") ");
                self.emit_statement_inline(then_statement);
                if let Some(else_statement) = else_statement {
                    self.write(" else ");
                    self.emit_statement_inline(else_statement);
                }
            }
            NodeKind::WhileStatement { condition, body } => {
                self.write("while (");
                self.emit_expression(condition, 0);
                self.write(") ");
                self.emit_statement_inline(body);
            }
            NodeKind::DoWhileStatement { body, condition } => {
                self.write("do ");
                self.emit_statement_inline(body);
                self.write(" while (");
                self.emit_expression(condition, 0);
                self.write(");");
            }
            NodeKind::ForStatement {
                initializer,
                condition,
                incrementor,
                body,
            } => {
                self.write("for (");
                if let Some(initializer) = initializer {
                    self.emit_for_initializer(initializer);
                }
                self.write(";");
                if let Some(condition) = condition {
                    self.write(" ");
                    self.emit_expression(condition, 0);
                }
                self.write(";");
                if let Some(incrementor) = incrementor {
                    self.write(" ");
                    self.emit_expression(incrementor, 0);
                }
                self.write(") ");
                self.emit_statement_inline(body);
            }
            NodeKind::ForInStatement {
                initializer,
                expression,
                body,
            } => {
                self.write("for (");
                self.emit_for_initializer(initializer);
                self.write(" in ");
                self.emit_expression(expression, 0);
                self.write(") ");
                self.emit_statement_inline(body);
            }
            NodeKind::ForEachStatement {
                initializer,
                expression,
                body,
            } => {
                self.write("for (");
                self.emit_for_initializer(initializer);
                self.write(" of ");
                self.emit_expression(expression, 0);
                self.write(") ");
                self.emit_statement_inline(body);
            }
            NodeKind::ReturnStatement { expression } => {
                self.write("return");
                if let Some(expression) = expression {
                    self.write(" ");
                    self.emit_expression(expression, 0);
                }
                self.write(";");
            }
            NodeKind::BreakStatement { label } => self.emit_jump("break", label.as_deref()),
            NodeKind::ContinueStatement { label } => self.emit_jump("continue", label.as_deref()),
            NodeKind::ThrowStatement { expression } => {
                self.write("throw ");
                self.emit_expression(expression, 0);
                self.write(";");
            }
            NodeKind::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => {
                self.write("try ");
                self.emit_statement_inline(try_block);
                if let Some(catch_clause) = catch_clause {
                    self.write(" ");
                    self.emit_statement_inline(catch_clause);
                }
                if let Some(finally_block) = finally_block {
                    self.write(" finally ");
                    self.emit_statement_inline(finally_block);
                }
            }
            NodeKind::CatchClause { binding, block } => {
                self.write("catch (");
                self.write(binding);
                self.write(") ");
                self.emit_statement_inline(block);
            }
            NodeKind::LabeledStatement { label, statement } => {
                self.write(label);
                self.write(": ");
                self.emit_statement_inline(statement);
            }
            NodeKind::EmptyStatement => self.write(";"),
            NodeKind::SuspensionStatement {
                is_iteration_form,
                expression,
            } => {
                self.write(if *is_iteration_form { "yield for" } else { "yield" });
                if let Some(expression) = expression {
                    self.write(" ");
                    self.emit_expression(expression, 0);
                }
                self.write(";");
            }
            NodeKind::AsyncSuspensionStatement {
                binding,
                expression,
            } => {
                self.write("await ");
                if let Some(binding) = binding {
                    self.write(binding);
                    self.write(" = ");
                }
                self.emit_expression(expression, 0);
                self.write(";");
            }
            NodeKind::FunctionDeclaration { .. }
            | NodeKind::GetAccessorDeclaration { .. }
            | NodeKind::SetAccessorDeclaration { .. } => self.emit_function_head(node),
            NodeKind::Program { .. } | NodeKind::ClassDeclaration { .. } => {
                self.newline();
                self.emit_statement(node);
            }
            _ => {
                self.emit_expression(node, 0);
                self.write(";");
            }
        }
    }

    fn emit_jump(&mut self, keyword: &str, label: Option<&str>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(label);
        }
        self.write(";");
    }

    fn emit_block(&mut self, statements: &[NodeRef]) {
        if statements.is_empty() {
            self.write("{ }");
            return;
        }
        self.write("{");
        self.newline();
        self.indent_level += 1;
        for statement in statements {
            self.emit_statement(statement);
        }
        self.indent_level -= 1;
        self.write_indent();
        self.write("}");
    }

    fn emit_for_initializer(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::VariableStatement { declarations } => self.emit_variable_list(declarations),
            _ => self.emit_expression(node, 0),
        }
    }

    fn emit_variable_list(&mut self, declarations: &[NodeRef]) {
        self.write("var ");
        for (i, declaration) in declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let NodeKind::VariableDeclaration { name, initializer } = &declaration.kind {
                self.write(name);
                if let Some(initializer) = initializer {
                    self.write(" = ");
                    self.emit_expression(initializer, COMMA_PRECEDENCE + 1);
                }
            }
        }
    }

    fn emit_function_head(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::FunctionDeclaration {
                name,
                is_static,
                parameters,
                body,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.write("function");
                if let Some(name) = name {
                    self.write(" ");
                    self.write(name);
                }
                self.emit_parameters(parameters);
                self.write(" ");
                self.emit_statement_inline(body);
            }
            NodeKind::FunctionExpression {
                name,
                parameters,
                body,
                is_generator,
            } => {
                self.write(if *is_generator { "function* " } else { "function " });
                if let Some(name) = name {
                    self.write(name);
                }
                self.emit_parameters(parameters);
                self.write(" ");
                self.emit_statement_inline(body);
            }
            NodeKind::GetAccessorDeclaration {
                name,
                is_static,
                body,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.write("get ");
                self.write(name);
                self.write("() ");
                self.emit_statement_inline(body);
            }
            NodeKind::SetAccessorDeclaration {
                name,
                is_static,
                parameter,
                body,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.write("set ");
                self.write(name);
                self.write("(");
                self.emit_expression(parameter, 0);
                self.write(") ");
                self.emit_statement_inline(body);
            }
            _ => {}
        }
    }

    fn emit_parameters(&mut self, parameters: &[NodeRef]) {
        self.write("(");
        self.emit_list(parameters);
        self.write(")");
    }

    fn emit_list(&mut self, nodes: &[NodeRef]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(node, COMMA_PRECEDENCE + 1);
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn emit_expression(&mut self, node: &Node, min_precedence: u8) {
        let precedence = expression_precedence(node);
        let parenthesize = precedence < min_precedence;
        if parenthesize {
            self.write("(");
        }
        match &node.kind {
            NodeKind::Identifier { name } => self.write(name),
            NodeKind::NumericLiteral { value } => {
                let text = format_number(*value);
                self.write(&text);
            }
            NodeKind::StringLiteral { value } => {
                self.write("\"");
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                self.write(&escaped);
                self.write("\"");
            }
            NodeKind::BooleanLiteral { value } => self.write(if *value { "true" } else { "false" }),
            NodeKind::NullLiteral => self.write("null"),
            NodeKind::ThisExpression => self.write("this"),
            NodeKind::ArrayLiteral { elements } => {
                self.write("[");
                self.emit_list(elements);
                self.write("]");
            }
            NodeKind::ObjectLiteral { properties } => {
                if properties.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    for (i, property) in properties.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        match &property.kind {
                            NodeKind::PropertyAssignment { name, value } => {
                                self.write(name);
                                self.write(": ");
                                self.emit_expression(value, COMMA_PRECEDENCE + 1);
                            }
                            _ => self.emit_function_head(property),
                        }
                    }
                    self.write(" }");
                }
            }
            NodeKind::PropertyAssignment { name, value } => {
                self.write(name);
                self.write(": ");
                self.emit_expression(value, COMMA_PRECEDENCE + 1);
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.emit_expression(callee, MEMBER_PRECEDENCE);
                self.write("(");
                self.emit_list(arguments);
                self.write(")");
            }
            NodeKind::NewExpression { callee, arguments } => {
                self.write("new ");
                self.emit_expression(callee, MEMBER_PRECEDENCE);
                self.write("(");
                self.emit_list(arguments);
                self.write(")");
            }
            NodeKind::PropertyAccess { object, name } => {
                self.emit_expression(object, MEMBER_PRECEDENCE);
                self.write(".");
                self.write(name);
            }
            NodeKind::ElementAccess { object, index } => {
                self.emit_expression(object, MEMBER_PRECEDENCE);
                self.write("[");
                self.emit_expression(index, 0);
                self.write("]");
            }
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                // Assignment is right associative and takes a bare `yield` on
                // its right; everything else is left associative.
                let (left_min, right_min) = if *operator == BinaryOperator::Assign {
                    (precedence + 1, YIELD_PRECEDENCE)
                } else {
                    (precedence, precedence + 1)
                };
                self.emit_expression(left, left_min);
                if *operator == BinaryOperator::Comma {
                    self.write(", ");
                } else {
                    self.write(" ");
                    self.write(operator.as_str());
                    self.write(" ");
                }
                self.emit_expression(right, right_min);
            }
            NodeKind::UnaryExpression { operator, operand } => {
                self.write(operator.as_str());
                if operator.as_str().chars().all(char::is_alphabetic) {
                    self.write(" ");
                }
                self.emit_expression(operand, UNARY_PRECEDENCE);
            }
            NodeKind::UpdateExpression {
                operator,
                prefix,
                operand,
            } => {
                if *prefix {
                    self.write(operator.as_str());
                }
                self.emit_expression(operand, MEMBER_PRECEDENCE);
                if !*prefix {
                    self.write(operator.as_str());
                }
            }
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_expression(condition, CONDITIONAL_PRECEDENCE + 1);
                self.write(" ? ");
                self.emit_expression(when_true, ASSIGNMENT_PRECEDENCE);
                self.write(" : ");
                self.emit_expression(when_false, ASSIGNMENT_PRECEDENCE);
            }
            NodeKind::YieldExpression { expression } => {
                self.write("yield");
                if let Some(expression) = expression {
                    self.write(" ");
                    self.emit_expression(expression, ASSIGNMENT_PRECEDENCE);
                }
            }
            NodeKind::FunctionExpression { .. } => self.emit_function_head(node),
            _ => self.emit_statement_inline(node),
        }
        if parenthesize {
            self.write(")");
        }
    }
}

const COMMA_PRECEDENCE: u8 = 1;
const YIELD_PRECEDENCE: u8 = 2;
const ASSIGNMENT_PRECEDENCE: u8 = 3;
const CONDITIONAL_PRECEDENCE: u8 = 4;
const UNARY_PRECEDENCE: u8 = 14;
const MEMBER_PRECEDENCE: u8 = 16;
const PRIMARY_PRECEDENCE: u8 = 20;

fn expression_precedence(node: &Node) -> u8 {
    match &node.kind {
        NodeKind::YieldExpression { .. } => YIELD_PRECEDENCE,
        NodeKind::ConditionalExpression { .. } => CONDITIONAL_PRECEDENCE,
        NodeKind::BinaryExpression { operator, .. } => binary_precedence(*operator),
        NodeKind::UnaryExpression { .. } => UNARY_PRECEDENCE,
        NodeKind::UpdateExpression { .. } => UNARY_PRECEDENCE + 1,
        NodeKind::CallExpression { .. }
        | NodeKind::NewExpression { .. }
        | NodeKind::PropertyAccess { .. }
        | NodeKind::ElementAccess { .. } => MEMBER_PRECEDENCE,
        // Parenthesized as a callee: `(function () { })()`.
        NodeKind::FunctionExpression { .. } => MEMBER_PRECEDENCE - 1,
        _ => PRIMARY_PRECEDENCE,
    }
}

const fn binary_precedence(operator: BinaryOperator) -> u8 {
    match operator {
        BinaryOperator::Comma => COMMA_PRECEDENCE,
        BinaryOperator::Assign => ASSIGNMENT_PRECEDENCE,
        BinaryOperator::LogicalOr => 5,
        BinaryOperator::LogicalAnd => 6,
        BinaryOperator::Equals
        | BinaryOperator::NotEquals
        | BinaryOperator::StrictEquals
        | BinaryOperator::StrictNotEquals => 9,
        BinaryOperator::LessThan
        | BinaryOperator::LessThanEquals
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanEquals
        | BinaryOperator::In
        | BinaryOperator::InstanceOf => 10,
        BinaryOperator::Add | BinaryOperator::Subtract => 12,
        BinaryOperator::Multiply | BinaryOperator::Divide => 13,
    }
}

const fn is_expression(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. }
            | NodeKind::NumericLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NullLiteral
            | NodeKind::ThisExpression
            | NodeKind::ArrayLiteral { .. }
            | NodeKind::ObjectLiteral { .. }
            | NodeKind::CallExpression { .. }
            | NodeKind::NewExpression { .. }
            | NodeKind::PropertyAccess { .. }
            | NodeKind::ElementAccess { .. }
            | NodeKind::BinaryExpression { .. }
            | NodeKind::UnaryExpression { .. }
            | NodeKind::UpdateExpression { .. }
            | NodeKind::ConditionalExpression { .. }
            | NodeKind::YieldExpression { .. }
            | NodeKind::FunctionExpression { .. }
    )
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[path = "../tests/printer.rs"]
mod tests;
