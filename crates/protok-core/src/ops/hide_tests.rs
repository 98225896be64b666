//! Tests for action hiding.

use indexmap::IndexSet;

use super::hide::hide;
use crate::dump::dump;
use crate::{EdgeId, Label, Lts, Node, NodeId};

fn actions(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn chain() -> Lts {
    let mut g = Lts::new();
    g.add_node(Node::new(NodeId(0)));
    g.add_node(Node::new(NodeId(1)));
    g.add_node(Node::new(NodeId(2)));
    g.set_root(Some(NodeId(0)));
    g.add_edge(EdgeId(0), NodeId(0), NodeId(1), Label::visible("a"));
    g.add_edge(EdgeId(1), NodeId(1), NodeId(2), Label::visible("!b"));
    g
}

#[test]
fn relabels_matching_actions_to_tau() {
    let g = chain();
    let hidden = hide(&g, &actions(&["a"]));
    insta::assert_snapshot!(dump(&hidden), @r#"
    root n0
    n0
    n1
    n2
    n0 -τ-> n1
    n1 -!b-> n2
    "#);
}

#[test]
fn matches_bare_names_ignoring_prefixes() {
    let g = chain();
    let hidden = hide(&g, &actions(&["b"]));
    assert!(
        hidden
            .edges()
            .any(|edge| edge.is_hidden() && edge.id == EdgeId(1))
    );
}

#[test]
fn does_not_mutate_its_input() {
    let g = chain();
    let before = dump(&g);
    let _ = hide(&g, &actions(&["a", "b"]));
    assert_eq!(dump(&g), before);
}

#[test]
fn hiding_in_two_steps_equals_hiding_the_union() {
    let g = chain();
    let stepwise = hide(&hide(&g, &actions(&["a"])), &actions(&["b"]));
    let at_once = hide(&g, &actions(&["a", "b"]));
    assert_eq!(stepwise, at_once);
}
