use super::*;
use gtp_ast::NodeRef;
use gtp_ast::factory::*;

fn function(name: &str, statements: Vec<NodeRef>) -> NodeRef {
    Node::new(NodeKind::FunctionDeclaration {
        name: Some(name.to_string()),
        is_static: false,
        parameters: vec![],
        body: create_block(statements),
    })
}

fn yield_of(name: &str) -> NodeRef {
    create_suspension_statement(Some(create_identifier(name)), false)
}

fn yield_for(name: &str) -> NodeRef {
    create_suspension_statement(Some(create_identifier(name)), true)
}

#[test]
fn test_suspension_under_hundreds_of_blocks_is_found() {
    let mut statement = yield_of("x");
    for _ in 0..600 {
        statement = create_block(vec![statement]);
    }
    let facts = SuspensionAnalyzer::analyze(&create_block(vec![statement]));
    assert!(facts.has_suspension);
    assert!(!facts.is_iteration_form);
}

#[test]
fn test_body_without_suspension_has_no_facts() {
    let body = create_block(vec![create_expression_statement(create_call(
        create_identifier("log"),
        vec![create_number(1.0)],
    ))]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert_eq!(facts, SuspensionFacts::default());
    assert!(!facts.has_any_suspension());
}

#[test]
fn test_nested_function_is_a_separate_scope() {
    let body = create_block(vec![function("inner", vec![yield_of("x")])]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert!(!facts.has_suspension);
    assert!(!facts.has_any_suspension());
}

#[test]
fn test_accessors_and_function_expressions_are_not_entered() {
    let getter = Node::new(NodeKind::GetAccessorDeclaration {
        name: "value".to_string(),
        is_static: false,
        body: create_block(vec![create_async_suspension_statement(
            None,
            create_identifier("p"),
        )]),
    });
    let setter = Node::new(NodeKind::SetAccessorDeclaration {
        name: "value".to_string(),
        is_static: false,
        parameter: create_identifier("v"),
        body: create_block(vec![yield_of("v")]),
    });
    let callback = create_expression_statement(create_function_expression(
        vec![],
        create_block(vec![yield_for("xs")]),
        true,
    ));
    let body = create_block(vec![
        Node::new(NodeKind::ClassDeclaration {
            name: "Box".to_string(),
            members: vec![getter, setter],
        }),
        callback,
    ]);

    assert_eq!(SuspensionAnalyzer::analyze(&body), SuspensionFacts::default());
}

#[test]
fn test_suspension_inside_control_flow_counts() {
    let body = create_block(vec![Node::new(NodeKind::TryStatement {
        try_block: create_block(vec![create_if(
            create_identifier("ready"),
            create_block(vec![yield_of("x")]),
            None,
        )]),
        catch_clause: None,
        finally_block: None,
    })]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert!(facts.has_suspension);
    assert!(!facts.is_iteration_form);
}

#[test]
fn test_iteration_flag_follows_last_suspension_seen() {
    let last_iterates = create_block(vec![yield_of("a"), yield_for("b")]);
    let facts = SuspensionAnalyzer::analyze(&last_iterates);
    assert!(facts.has_suspension);
    assert!(facts.is_iteration_form);

    let last_plain = create_block(vec![yield_for("a"), yield_of("b")]);
    let facts = SuspensionAnalyzer::analyze(&last_plain);
    assert!(facts.has_suspension);
    assert!(!facts.is_iteration_form);
}

#[test]
fn test_yield_expression_is_an_ordinary_suspension() {
    let body = create_block(vec![
        yield_for("xs"),
        create_assignment_statement(
            create_identifier("v"),
            create_yield_expression(Some(create_identifier("p"))),
        ),
    ]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert!(facts.has_suspension);
    assert!(!facts.is_iteration_form);
}

#[test]
fn test_for_in_is_recorded_and_traversed() {
    let body = create_block(vec![create_for_in(
        create_variable_statement("k", None),
        create_identifier("o"),
        create_block(vec![create_async_suspension_statement(
            Some("v".to_string()),
            create_identifier("k"),
        )]),
    )]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert!(facts.has_for_in);
    assert!(facts.has_async_suspension);
    assert!(!facts.has_suspension);
    assert!(facts.has_any_suspension());
}

#[test]
fn test_for_in_alone_does_not_suspend() {
    let body = create_block(vec![create_for_in(
        create_variable_statement("k", None),
        create_identifier("o"),
        create_block(vec![]),
    )]);
    let facts = SuspensionAnalyzer::analyze(&body);
    assert!(facts.has_for_in);
    assert!(!facts.has_any_suspension());
}

#[test]
fn test_analysis_is_repeatable() {
    let body = create_block(vec![
        yield_of("x"),
        create_async_suspension_statement(None, create_identifier("p")),
    ]);
    let first = SuspensionAnalyzer::analyze(&body);
    let second = SuspensionAnalyzer::analyze(&body);
    assert_eq!(first, second);
    assert!(first.has_suspension && first.has_async_suspension);
}

#[test]
fn test_facts_serialize_camel_case() {
    let facts = SuspensionFacts {
        has_suspension: true,
        ..SuspensionFacts::default()
    };
    let json = serde_json::to_value(facts).expect("serializable");
    assert_eq!(json["hasSuspension"], true);
    assert_eq!(json["hasAsyncSuspension"], false);
}
