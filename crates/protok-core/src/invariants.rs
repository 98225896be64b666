//! Structural invariant checks, used by tests and debug assertions.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::lts::{Lts, Terminal};

impl Lts {
    /// Panics if the graph violates a structural invariant: dangling edge
    /// endpoints, a root that is not a node, a `stop` node with outgoing
    /// edges, or an `error` node without an incoming δ edge.
    pub fn assert_valid(&self) {
        for edge in self.edges() {
            assert!(
                self.node(edge.from).is_some(),
                "edge {} references missing source node {}",
                edge.id,
                edge.from
            );
            assert!(
                self.node(edge.to).is_some(),
                "edge {} references missing target node {}",
                edge.id,
                edge.to
            );
        }
        if let Some(root) = self.root() {
            assert!(self.node(root).is_some(), "root {root} is not in the graph");
        }
        for node in self.nodes() {
            match node.meta.terminal {
                Some(Terminal::Stop) => assert!(
                    self.outgoing(node.id).next().is_none(),
                    "stop node {} has outgoing edges",
                    node.id
                ),
                Some(Terminal::Error) => assert!(
                    self.incoming(node.id).any(|edge| edge.is_deadlock()),
                    "error node {} has no incoming δ edge",
                    node.id
                ),
                None => {}
            }
        }
    }
}
