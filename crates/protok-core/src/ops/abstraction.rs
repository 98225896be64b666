//! Weak abstraction: removing hidden τ transitions while preserving
//! observable behaviour.
//!
//! Two variants share one rewrite. The fair variant treats τ cycles as
//! progressing and deletes every τ edge once observable transitions have
//! been rerouted. The unfair variant keeps the possibility of staying in a
//! τ cycle forever: each surviving τ self-loop becomes a δ edge into a
//! fresh `error` sink.

use indexmap::IndexSet;

use crate::ids::{EdgeId, IdAllocator, NodeId};
use crate::label::Label;
use crate::lts::{Lts, Node, Terminal};

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// τ-closure of `start`, including `start` itself. A τ step back into an
/// already-visited node marks that node as sitting on a τ loop.
fn tau_closure(
    lts: &Lts,
    start: NodeId,
    direction: Direction,
    loops: &mut IndexSet<NodeId>,
) -> IndexSet<NodeId> {
    let mut visited = IndexSet::new();
    visited.insert(start);
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let next: Vec<NodeId> = match direction {
            Direction::Forward => lts
                .outgoing(id)
                .filter(|edge| edge.is_hidden())
                .map(|edge| edge.to)
                .collect(),
            Direction::Backward => lts
                .incoming(id)
                .filter(|edge| edge.is_hidden())
                .map(|edge| edge.from)
                .collect(),
        };
        for neighbour in next {
            if visited.insert(neighbour) {
                stack.push(neighbour);
            } else {
                loops.insert(neighbour);
            }
        }
    }
    visited
}

/// Applies weak abstraction to a clone of `lts`.
///
/// For every τ edge u → v, observable transitions entering u are rerouted
/// to v and everything τ-reachable beyond it, and observable transitions
/// leaving v are made available from u and everything τ-reaching it. The
/// enumerated τ edges are then deleted and the collected reroutes added
/// (skipping ones already present). With `fair` any remaining τ edge is
/// deleted too; otherwise each remaining τ self-loop is replaced by a δ
/// edge into a fresh `error` sink. Finally terminal tags are re-detected
/// and unreachable nodes trimmed.
pub fn abstraction(lts: &Lts, fair: bool, alloc: &mut IdAllocator) -> Lts {
    let mut out = lts.clone();

    let tau_edges: Vec<(EdgeId, NodeId, NodeId)> = out
        .edges()
        .filter(|edge| edge.is_hidden())
        .map(|edge| (edge.id, edge.from, edge.to))
        .collect();

    let mut pending: Vec<(NodeId, NodeId, Label)> = Vec::new();
    let mut loops: IndexSet<NodeId> = IndexSet::new();
    for &(_, from, to) in &tau_edges {
        let observable_in: Vec<(NodeId, Label)> = out
            .incoming(from)
            .filter(|edge| !edge.is_hidden())
            .map(|edge| (edge.from, edge.label.clone()))
            .collect();
        let observable_out: Vec<(NodeId, Label)> = out
            .outgoing(to)
            .filter(|edge| !edge.is_hidden())
            .map(|edge| (edge.to, edge.label.clone()))
            .collect();

        let successors = tau_closure(&out, to, Direction::Forward, &mut loops);
        for (source, label) in &observable_in {
            for &successor in &successors {
                pending.push((*source, successor, label.clone()));
            }
        }

        let predecessors = tau_closure(&out, from, Direction::Backward, &mut loops);
        for (target, label) in &observable_out {
            for &predecessor in &predecessors {
                pending.push((predecessor, *target, label.clone()));
            }
        }
    }
    for &id in &loops {
        pending.push((id, id, Label::Tau));
    }

    for &(id, _, _) in &tau_edges {
        out.remove_edge(id);
    }
    for (from, to, label) in pending {
        if !out.has_edge(from, to, &label) {
            out.add_edge(alloc.fresh_edge(), from, to, label);
        }
    }

    if fair {
        let remaining: Vec<EdgeId> = out
            .edges()
            .filter(|edge| edge.is_hidden())
            .map(|edge| edge.id)
            .collect();
        for id in remaining {
            out.remove_edge(id);
        }
    } else {
        let self_loops: Vec<(EdgeId, NodeId)> = out
            .edges()
            .filter(|edge| edge.is_hidden() && edge.from == edge.to)
            .map(|edge| (edge.id, edge.from))
            .collect();
        for (id, node) in self_loops {
            out.remove_edge(id);
            let sink = alloc.fresh_node();
            out.add_node(Node::new(sink).with_terminal(Terminal::Error));
            out.add_edge(alloc.fresh_edge(), node, sink, Label::Delta);
        }
    }

    out.retag_terminals();
    out.trim();
    out
}
