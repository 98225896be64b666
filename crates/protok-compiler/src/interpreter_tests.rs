//! Tests for model expansion.

use protok_core::dump::dump;
use protok_core::{IdAllocator, Terminal};

use crate::interpreter::{Interpreter, ModelOutcome};
use crate::parser;
use crate::srcpos::LineIndex;

fn expand(source: &str) -> ModelOutcome {
    let file = parser::parse(source).expect("source parses");
    let line_index = LineIndex::new(source);
    let mut alloc = IdAllocator::new();
    Interpreter::new(&mut alloc, &line_index)
        .run(&file.models[0])
        .expect("model expands")
}

fn expand_err(source: &str) -> crate::error::InterpreterError {
    let file = parser::parse(source).expect("source parses");
    let line_index = LineIndex::new(source);
    let mut alloc = IdAllocator::new();
    Interpreter::new(&mut alloc, &line_index)
        .run(&file.models[0])
        .expect_err("model must fail")
}

#[test]
fn action_prefix_builds_an_edge_to_the_continuation() {
    let outcome = expand("P = a -> STOP.");
    let lts = &outcome.automata["P"];
    assert_eq!(lts.node_count(), 2);
    assert_eq!(lts.edge_count(), 1);
    insta::assert_snapshot!(dump(lts), @r"
    root n0
    n0 [start]
    n1 [stop]
    n0 -a-> n1
    ");
}

#[test]
fn choice_fuses_the_two_roots() {
    let outcome = expand("P = (a -> STOP | b -> STOP).");
    let lts = &outcome.automata["P"];
    assert_eq!(lts.node_count(), 3);
    assert_eq!(lts.edge_count(), 2);
    insta::assert_snapshot!(dump(lts), @r"
    root n0
    n0 [start]
    n1 [stop]
    n3 [stop]
    n0 -a-> n1
    n0 -b-> n3
    ");
}

#[test]
fn stop_choice_root_loses_its_terminal_tag() {
    let outcome = expand("P = STOP | a -> STOP.");
    let lts = &outcome.automata["P"];
    let root = lts.root().expect("root present");
    assert_eq!(lts.node(root).and_then(|node| node.meta.terminal), None);
    lts.assert_valid();
}

#[test]
fn error_builds_a_deadlock_self_loop() {
    let outcome = expand("P = ERROR.");
    let lts = &outcome.automata["P"];
    insta::assert_snapshot!(dump(lts), @r"
    root n0
    n0 [start error]
    n0 -δ-> n0
    ");
    lts.assert_valid();
}

#[test]
fn name_references_are_fresh_copies() {
    let outcome = expand("P = a -> STOP, Q = b -> P.");
    let p = &outcome.automata["P"];
    let q = &outcome.automata["Q"];

    // Q embeds a copy of P with fresh ids: no node id is shared.
    for node in q.nodes() {
        assert!(p.node(node.id).is_none(), "{} is aliased", node.id);
    }
    assert_eq!(q.node_count(), 3);
    assert_eq!(q.edge_count(), 2);

    // The embedded copy no longer counts as a start state.
    let root = q.root().expect("root present");
    for node in q.nodes() {
        assert_eq!(node.meta.start_node, node.id == root);
    }
}

#[test]
fn model_hide_set_rewrites_matching_labels() {
    let outcome = expand("P = a -> b -> STOP \\{b}.");
    let lts = &outcome.automata["P"];
    insta::assert_snapshot!(dump(lts), @r"
    root n0
    n0 [start]
    n1
    n2 [stop]
    n1 -τ-> n2
    n0 -a-> n1
    ");
}

#[test]
fn hide_matches_bare_names_of_prefixed_actions() {
    let outcome = expand("P = !send -> STOP \\{send}.");
    let lts = &outcome.automata["P"];
    assert!(lts.edges().all(|edge| edge.is_hidden()));
}

#[test]
fn parallel_composition_synchronises_shared_actions() {
    let outcome = expand("P = a -> STOP || a -> STOP.");
    let lts = &outcome.automata["P"];
    assert_eq!(lts.node_count(), 2);
    assert_eq!(lts.edge_count(), 1);
    let root = lts.root().expect("root present");
    let node = lts.node(root).expect("root node present");
    assert!(node.meta.parallel);
}

#[test]
fn operations_are_recorded_with_their_source_ranges() {
    let outcome = expand("P = a -> STOP || b -> STOP \\{a}.");
    let descriptions: Vec<&str> = outcome
        .operations
        .iter()
        .map(|record| record.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec!["parallel composition in P", "hide {a} in P"]
    );
}

#[test]
fn unknown_references_name_the_identifier() {
    let error = expand_err("P = a -> Q.");
    assert_eq!(error.message, "unknown process `Q`");
    assert_eq!(error.location.start.line, 1);
    assert_eq!(error.location.start.column, 10);
}

#[test]
fn self_reference_is_rejected() {
    let error = expand_err("P = a -> P.");
    assert_eq!(error.message, "recursive definition of `P` is not supported");
}

#[test]
fn duplicate_definitions_are_rejected() {
    let error = expand_err("P = STOP, P = STOP.");
    assert_eq!(error.message, "duplicate definition of `P`");
    assert_eq!(error.location.start.column, 11);
}

#[test]
fn forward_references_are_unknown() {
    let error = expand_err("P = a -> Q, Q = STOP.");
    assert_eq!(error.message, "unknown process `Q`");
}

#[test]
fn terminal_nodes_satisfy_their_invariants() {
    for source in [
        "P = a -> STOP.",
        "P = ERROR.",
        "P = (a -> STOP | b -> ERROR).",
        "P = a -> STOP || b -> STOP.",
    ] {
        let outcome = expand(source);
        for lts in outcome.automata.values() {
            lts.assert_valid();
        }
    }
}
