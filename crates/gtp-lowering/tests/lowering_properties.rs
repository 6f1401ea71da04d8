//! End-to-end properties of the lowering pass over whole compilation units.

mod support;

use std::rc::Rc;

use gtp_ast::factory::*;
use gtp_ast::{Node, NodeKind, NodeRef, print};
use gtp_common::diagnostics::diagnostic_codes;
use gtp_common::{ErrorReporter, UniqueIdentifierGenerator};
use gtp_lowering::{LoweringOptions, SuspensionAnalyzer, lower, lower_with};
use support::{Call, Recording, function, function_body, program, yield_for, yield_of};

fn run_recording(tree: &NodeRef) -> (NodeRef, Recording, ErrorReporter) {
    let mut recording = Recording::default();
    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    let result = lower_with(
        &mut recording,
        &LoweringOptions::default(),
        &mut ids,
        &mut reporter,
        tree,
    );
    (result, recording, reporter)
}

fn await_of(name: &str) -> NodeRef {
    create_async_suspension_statement(None, create_identifier(name))
}

fn codes(reporter: &ErrorReporter) -> Vec<u32> {
    reporter.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn test_tree_without_suspension_is_returned_by_reference() {
    let tree = program(vec![
        function(
            "plain",
            vec![create_for_in(
                create_variable_statement("k", None),
                create_identifier("o"),
                create_block(vec![]),
            )],
        ),
        create_expression_statement(create_call(create_identifier("plain"), vec![])),
    ]);

    let (result, recording, reporter) = run_recording(&tree);
    assert!(Rc::ptr_eq(&result, &tree));
    assert!(recording.calls.is_empty());
    assert!(reporter.is_empty());

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    assert!(Rc::ptr_eq(&lower(&mut ids, &mut reporter, &tree), &tree));
}

#[test]
fn test_nested_suspension_does_not_lower_enclosing_body() {
    let inner = function("inner", vec![yield_of("x")]);
    let outer = function("outer", vec![inner]);
    let tree = program(vec![outer]);

    let (result, recording, _) = run_recording(&tree);

    assert_eq!(recording.calls, vec![Call::Generator]);
    let NodeKind::Program { statements } = &result.kind else {
        panic!("expected a program");
    };
    let outer_body = function_body(&statements[0]);
    assert!(!SuspensionAnalyzer::analyze(&outer_body).has_any_suspension());
    let lowered = &recording.lowered_bodies[0];
    assert!(Rc::ptr_eq(lowered, &function_body(&statements_of(&outer_body)[0])));
}

#[test]
fn test_for_in_lowering_runs_before_dispatch() {
    let body = vec![create_for_in(
        create_variable_statement("k", None),
        create_identifier("o"),
        create_block(vec![await_of("k")]),
    )];
    let (_, recording, _) = run_recording(&program(vec![function("f", body)]));
    assert_eq!(recording.calls, vec![Call::ForIn, Call::Async]);
}

#[test]
fn test_each_body_goes_to_exactly_one_engine() {
    let tree = program(vec![
        function("generator", vec![yield_of("a")]),
        function("asynchronous", vec![await_of("p")]),
        function("neither", vec![]),
    ]);
    let (_, recording, _) = run_recording(&tree);
    assert_eq!(recording.calls, vec![Call::Generator, Call::Async]);
}

#[test]
fn test_mixed_body_goes_to_generator_lowering() {
    let tree = program(vec![function("mixed", vec![yield_of("a"), await_of("p")])]);

    let (_, recording, _) = run_recording(&tree);
    assert_eq!(recording.calls, vec![Call::Generator]);

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    lower(&mut ids, &mut reporter, &tree);
    assert_eq!(
        codes(&reporter),
        vec![diagnostic_codes::ASYNC_SUSPENSION_IN_GENERATOR]
    );
}

#[test]
fn test_iteration_form_is_desugared_before_generator_lowering() {
    let tree = program(vec![function(
        "each",
        vec![yield_for(create_identifier("xs"))],
    )]);
    let (_, recording, _) = run_recording(&tree);

    assert_eq!(recording.calls, vec![Call::ForEach, Call::Generator]);
    let facts = SuspensionAnalyzer::analyze(&recording.lowered_bodies[0]);
    assert!(facts.has_suspension);
    assert!(!facts.is_iteration_form);
}

#[test]
fn test_inner_bodies_are_lowered_first_and_kept() {
    let inner = function("inner", vec![yield_of("x")]);
    let outer = function("outer", vec![inner, await_of("p")]);
    let tree = program(vec![outer]);

    let (_, recording, _) = run_recording(&tree);
    assert_eq!(recording.calls, vec![Call::Generator, Call::Async]);

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    let printed = print(&lower(&mut ids, &mut reporter, &tree));
    assert_eq!(
        printed,
        "function outer() {
    return __awaiter(this, function* () {
        function inner() {
            return __generator(this, function* () {
                yield x;
            });
        }
        yield p;
    });
}
"
    );
    assert!(reporter.is_empty());
}

#[test]
fn test_accessor_keeps_name_and_static_flag() {
    let getter = Node::new(NodeKind::GetAccessorDeclaration {
        name: "size".to_string(),
        is_static: true,
        body: create_block(vec![await_of("p")]),
    });
    let setter = Node::new(NodeKind::SetAccessorDeclaration {
        name: "size".to_string(),
        is_static: false,
        parameter: create_identifier("v"),
        body: create_block(vec![yield_of("v")]),
    });
    let tree = program(vec![Node::new(NodeKind::ClassDeclaration {
        name: "Sized".to_string(),
        members: vec![getter, setter],
    })]);

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    let printed = print(&lower(&mut ids, &mut reporter, &tree));

    assert!(printed.contains("static get size() {"), "{printed}");
    assert!(printed.contains("return __awaiter(this,"), "{printed}");
    assert!(printed.contains("set size(v) {"), "{printed}");
    assert!(printed.contains("return __generator(this,"), "{printed}");
}

#[test]
fn test_temporaries_avoid_source_names() {
    let tree = program(vec![function(
        "f",
        vec![
            create_variable_statement("$__0", Some(create_number(1.0))),
            yield_for(create_identifier("$__0")),
        ],
    )]);

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    let printed = print(&lower(&mut ids, &mut reporter, &tree));

    assert!(printed.contains("var $__2 = __getIterator($__0);"), "{printed}");
    assert!(printed.contains("var $__1 = $__3.value;"), "{printed}");
    assert!(printed.contains("yield $__1;"), "{printed}");
    assert!(ids.is_taken("$__0"));
}

#[test]
fn test_function_nesting_limit_reports_and_stops() {
    let mut node = function("innermost", vec![yield_of("x")]);
    for depth in 0..4 {
        node = function(&format!("level{depth}"), vec![node]);
    }
    let tree = program(vec![node]);
    let options = LoweringOptions {
        max_function_depth: 2,
        ..LoweringOptions::default()
    };

    let mut recording = Recording::default();
    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    let result = lower_with(&mut recording, &options, &mut ids, &mut reporter, &tree);

    assert_eq!(codes(&reporter), vec![diagnostic_codes::NESTING_TOO_DEEP]);
    assert!(reporter.diagnostics()[0].message_text.contains('2'));
    assert!(recording.calls.is_empty());
    assert!(Rc::ptr_eq(&result, &tree));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let mut node = function("innermost", vec![yield_of("x")]);
    for depth in 0..300 {
        node = function(&format!("f{depth}"), vec![node]);
    }
    let tree = program(vec![node]);

    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    lower(&mut ids, &mut reporter, &tree);

    assert_eq!(codes(&reporter), vec![diagnostic_codes::NESTING_TOO_DEEP]);
}

#[test]
fn test_suspension_under_hundreds_of_blocks_is_lowered() {
    std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(|| {
            let mut statement = yield_of("x");
            for _ in 0..600 {
                statement = create_block(vec![statement]);
            }
            let tree = program(vec![function("buried", vec![statement])]);

            let (_, recording, reporter) = run_recording(&tree);
            assert_eq!(recording.calls, vec![Call::Generator]);
            assert_eq!(recording.lowered_bodies.len(), 1);
            assert!(reporter.is_empty());
        })
        .expect("spawn")
        .join()
        .expect("lowering thread panicked");
}

#[test]
fn test_function_expressions_count_toward_nesting_limit() {
    let mut node = function("innermost", vec![yield_of("x")]);
    for _ in 0..400 {
        node = create_expression_statement(create_function_expression(
            vec![],
            create_block(vec![node]),
            false,
        ));
    }
    let tree = program(vec![node]);

    let (result, recording, reporter) = run_recording(&tree);

    assert_eq!(codes(&reporter), vec![diagnostic_codes::NESTING_TOO_DEEP]);
    assert!(recording.calls.is_empty());
    assert!(Rc::ptr_eq(&result, &tree));
}

#[test]
fn test_declaration_inside_function_expressions_respects_limit() {
    let inner = function("inner", vec![yield_of("x")]);
    let wrapped = create_expression_statement(create_function_expression(
        vec![],
        create_block(vec![create_expression_statement(create_function_expression(
            vec![],
            create_block(vec![inner]),
            false,
        ))]),
        false,
    ));
    let tree = program(vec![wrapped]);
    let options = LoweringOptions {
        max_function_depth: 2,
        ..LoweringOptions::default()
    };

    let mut recording = Recording::default();
    let mut ids = UniqueIdentifierGenerator::new();
    let mut reporter = ErrorReporter::new();
    lower_with(&mut recording, &options, &mut ids, &mut reporter, &tree);
    assert_eq!(codes(&reporter), vec![diagnostic_codes::NESTING_TOO_DEEP]);
    assert!(recording.calls.is_empty());

    let options = LoweringOptions {
        max_function_depth: 3,
        ..LoweringOptions::default()
    };
    let mut recording = Recording::default();
    let mut reporter = ErrorReporter::new();
    lower_with(&mut recording, &options, &mut ids, &mut reporter, &tree);
    assert!(reporter.is_empty());
    assert_eq!(recording.calls, vec![Call::Generator]);
}
