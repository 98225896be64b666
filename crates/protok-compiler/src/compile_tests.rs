//! End-to-end tests for the compile driver.

use indoc::indoc;
use protok_core::ops;

use crate::compile::{CompileOptions, abstraction, compile};
use crate::error::CompileError;

fn options() -> CompileOptions {
    CompileOptions {
        live_building: false,
        fair_abstraction: true,
    }
}

#[test]
fn one_automaton_per_definition_in_source_order() {
    let output = compile("P = a -> STOP, Q = b -> STOP.", &options()).expect("compiles");
    let names: Vec<&str> = output
        .automata
        .iter()
        .map(|automaton| automaton.name.as_str())
        .collect();
    assert_eq!(names, vec!["P", "Q"]);
}

#[test]
fn single_action_process() {
    let output = compile("P = a -> STOP.", &options()).expect("compiles");
    let lts = &output.automata[0].lts;
    assert_eq!(lts.node_count(), 2);
    assert_eq!(lts.edge_count(), 1);
    let labels: Vec<String> = lts.alphabet().iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["a"]);
}

#[test]
fn binary_choice_process() {
    let output = compile("P = (a -> STOP | b -> STOP).", &options()).expect("compiles");
    let lts = &output.automata[0].lts;
    assert_eq!(lts.node_count(), 3);
    assert_eq!(lts.edge_count(), 2);
    let root = lts.root().expect("root present");
    assert_eq!(lts.outgoing(root).count(), 2);
}

#[test]
fn identical_definitions_are_bisimilar() {
    let output = compile("P = a -> b -> STOP, Q = a -> b -> STOP.", &options()).expect("compiles");
    assert!(ops::equivalent(&[
        &output.automata[0].lts,
        &output.automata[1].lts
    ]));
}

#[test]
fn transposed_definitions_are_not_bisimilar() {
    let output = compile("P = a -> b -> STOP, Q = b -> a -> STOP.", &options()).expect("compiles");
    assert!(!ops::equivalent(&[
        &output.automata[0].lts,
        &output.automata[1].lts
    ]));
}

#[test]
fn hidden_actions_abstract_away_entirely() {
    let source = "P = a -> STOP, Q = b -> STOP \\{b}.";
    let mut output = compile(source, &options()).expect("compiles");

    let q = &output.automata[1].lts;
    assert_eq!(q.edges().filter(|edge| edge.is_hidden()).count(), 1);

    let abstracted = abstraction(q, &options(), &mut output.alloc);
    assert_eq!(abstracted.node_count(), 1);
    assert_eq!(abstracted.edge_count(), 0);

    let p = &output.automata[0].lts;
    let product = ops::parallel(p, &abstracted, &mut output.alloc);
    assert!(ops::equivalent(&[&product, p]));
}

#[test]
fn synchronised_product_after_trim() {
    let output = compile("P = a -> STOP || a -> STOP.", &options()).expect("compiles");
    let lts = &output.automata[0].lts;
    assert_eq!(lts.node_count(), 2);
    assert_eq!(lts.edge_count(), 1);
}

#[test]
fn unfair_abstraction_option_is_honoured() {
    let source = "P = a -> b -> STOP \\{b}.";
    let mut output = compile(source, &options()).expect("compiles");
    let unfair = CompileOptions {
        live_building: false,
        fair_abstraction: false,
    };
    let lts = &output.automata[0].lts;
    let abstracted = abstraction(lts, &unfair, &mut output.alloc);
    // The hidden `b` step disappears under both variants; without τ
    // cycles the unfair variant introduces no deadlock either.
    assert!(abstracted.edges().all(|edge| !edge.is_hidden()));
    assert!(abstracted.edges().all(|edge| !edge.is_deadlock()));
}

#[test]
fn operation_log_positions_point_into_the_source() {
    let source = "P = a -> STOP \\{a}.";
    let output = compile(source, &options()).expect("compiles");
    assert_eq!(output.operations.operations, vec!["hide {a} in P"]);
    assert_eq!(output.operations.positions.len(), 1);
    let span = output.operations.positions[0];
    assert_eq!(span.start.line, 1);
    assert_eq!(span.start.column, 16);
    assert_eq!(&source[span.start.offset as usize..span.end.offset as usize], "{a}");
}

#[test]
fn multi_line_models_report_positions_on_later_lines() {
    let source = indoc! {r"
        P = a -> STOP,
        Q = b -> STOP
        \{b}.
    "};
    let output = compile(source, &options()).expect("compiles");
    assert_eq!(
        output.operations.operations,
        vec!["hide {b} in P", "hide {b} in Q"]
    );
    for span in &output.operations.positions {
        assert_eq!(span.start.line, 3);
        assert_eq!(span.start.column, 2);
    }
}

#[test]
fn live_building_fills_display_labels() {
    let live = compile("P = a -> STOP.", &CompileOptions::default()).expect("compiles");
    assert!(
        live.automata[0]
            .lts
            .nodes()
            .all(|node| node.label.is_some())
    );

    let headless = compile("P = a -> STOP.", &options()).expect("compiles");
    assert!(
        headless.automata[0]
            .lts
            .nodes()
            .all(|node| node.label.is_none())
    );
}

#[test]
fn syntax_and_interpreter_errors_are_distinct_kinds() {
    let syntax = compile("P = ", &options()).expect_err("must fail");
    assert!(matches!(syntax, CompileError::Syntax(_)));
    assert!(syntax.to_string().starts_with("Syntax error "));

    let interpreter = compile("P = a -> Q.", &options()).expect_err("must fail");
    assert!(matches!(interpreter, CompileError::Interpreter(_)));
    assert!(interpreter.to_string().starts_with("Error: "));
}

#[test]
fn errors_render_as_annotated_snippets() {
    let source = "P = a -> Q.";
    let error = compile(source, &options()).expect_err("must fail");
    let rendered = error.render(source);
    assert!(rendered.contains("unknown process `Q`"));
    assert!(rendered.contains("P = a -> Q."));
}

#[test]
fn output_serialises_with_label_strings() {
    let source = "P = a -> STOP \\{a}.";
    let output = compile(source, &options()).expect("compiles");
    let json = serde_json::to_value(&output).expect("serialises");

    assert_eq!(json["automata"][0]["name"], "P");
    let edges = json["automata"][0]["lts"]["edges"]
        .as_object()
        .expect("edges are a map");
    let labels: Vec<&str> = edges
        .values()
        .map(|edge| edge["label"].as_str().expect("label is a string"))
        .collect();
    assert_eq!(labels, vec!["\u{3c4}"]);

    assert_eq!(json["operations"]["positions"][0]["start"]["line"], 1);
}

#[test]
fn compiles_are_independent() {
    let first = compile("P = a -> STOP.", &options()).expect("compiles");
    let second = compile("P = a -> STOP.", &options()).expect("compiles");
    // Fresh allocator per compile: both runs produce identical graphs.
    assert_eq!(first.automata[0].lts, second.automata[0].lts);
}
