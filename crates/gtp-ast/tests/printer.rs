use super::*;
use crate::factory::*;
use crate::node::{BinaryOperator, Node, NodeKind};

#[test]
fn test_prints_suspension_statements_in_function() {
    let body = create_block(vec![
        create_suspension_statement(Some(create_identifier("x")), false),
        create_suspension_statement(Some(create_identifier("xs")), true),
    ]);
    let function = Node::new(NodeKind::FunctionDeclaration {
        name: Some("g".to_string()),
        is_static: false,
        parameters: vec![create_identifier("x")],
        body,
    });

    assert_eq!(
        print(&function),
        "function g(x) {\n    yield x;\n    yield for xs;\n}\n"
    );
}

#[test]
fn test_prints_for_statement_header() {
    let loop_node = create_for(
        Some(create_variable_statement("i", Some(create_number(0.0)))),
        Some(create_binary(
            BinaryOperator::LessThan,
            create_identifier("i"),
            create_identifier("n"),
        )),
        Some(create_postfix_increment(create_identifier("i"))),
        create_block(vec![]),
    );

    assert_eq!(print(&loop_node), "for (var i = 0; i < n; i++) { }\n");
}

#[test]
fn test_parenthesizes_lower_precedence_operands() {
    let check = create_not(create_binary(
        BinaryOperator::In,
        create_identifier("k"),
        create_identifier("c"),
    ));
    assert_eq!(print(&check), "!(k in c)");

    let sum_times = create_binary(
        BinaryOperator::Multiply,
        create_binary(BinaryOperator::Add, create_number(1.0), create_number(2.0)),
        create_number(3.5),
    );
    assert_eq!(print(&sum_times), "(1 + 2) * 3.5");
}

#[test]
fn test_assignment_of_yield_needs_no_parentheses() {
    let assignment = create_assignment(
        create_identifier("x"),
        create_yield_expression(Some(create_identifier("p"))),
    );
    assert_eq!(print(&assignment), "x = yield p");
}

#[test]
fn test_prints_generator_function_expression_argument() {
    let call = create_call(
        create_identifier("__generator"),
        vec![
            create_this(),
            create_function_expression(vec![], create_block(vec![]), true),
        ],
    );
    assert_eq!(print(&call), "__generator(this, function* () { })");
}

#[test]
fn test_prints_async_suspension_with_binding() {
    let with_binding = create_async_suspension_statement(Some("v".to_string()), create_identifier("p"));
    let bare = create_async_suspension_statement(None, create_identifier("p"));
    assert_eq!(print(&with_binding), "await v = p;\n");
    assert_eq!(print(&bare), "await p;\n");
}

#[test]
fn test_prints_accessors_inside_class() {
    let getter = Node::new(NodeKind::GetAccessorDeclaration {
        name: "size".to_string(),
        is_static: true,
        body: create_block(vec![create_return(Some(create_number(1.0)))]),
    });
    let class = Node::new(NodeKind::ClassDeclaration {
        name: "Bag".to_string(),
        members: vec![getter],
    });

    assert_eq!(
        print(&class),
        "class Bag {\n    static get size() {\n        return 1;\n    }\n}\n"
    );
}
