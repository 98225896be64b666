//! Strong-bisimulation minimisation by colour partition refinement.
//!
//! Every node carries a colour. Two nodes get the same colour in a
//! refinement round iff their signatures — the set of (own colour,
//! successor colour, label) triples over their outgoing edges, plus
//! markers for sink nodes and δ targets — are equal. Rounds repeat until
//! the number of distinct signatures stops growing; the final colouring is
//! the strong-bisimilarity partition.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::ids::NodeId;
use crate::label::Label;
use crate::lts::Lts;

type Colour = i64;

/// One signature entry. The sink marker is `(own, None, None)`; the
/// δ-target marker is `(-1, None, None)`.
type SigEntry = (Colour, Option<Colour>, Option<Label>);

/// Colours the disjoint union of `graphs`, one colour map per graph.
/// Colours are comparable across graphs.
fn colour_union(graphs: &[&Lts]) -> Vec<IndexMap<NodeId, Colour>> {
    let delta_targets: Vec<IndexSet<NodeId>> = graphs
        .iter()
        .map(|lts| {
            lts.edges()
                .filter(|edge| edge.is_deadlock())
                .map(|edge| edge.to)
                .collect()
        })
        .collect();

    let mut colours: Vec<IndexMap<NodeId, Colour>> = graphs
        .iter()
        .zip(&delta_targets)
        .map(|(lts, targets)| {
            lts.nodes()
                .map(|node| {
                    let colour = if targets.contains(&node.id) { -1 } else { 0 };
                    (node.id, colour)
                })
                .collect()
        })
        .collect();

    let mut distinct = 0usize;
    loop {
        let mut table: IndexMap<Vec<SigEntry>, Colour> = IndexMap::new();
        let mut next: Vec<IndexMap<NodeId, Colour>> = Vec::with_capacity(graphs.len());
        for ((lts, current), targets) in graphs.iter().zip(&colours).zip(&delta_targets) {
            let mut recoloured = IndexMap::with_capacity(current.len());
            for node in lts.nodes() {
                let own = current[&node.id];
                let mut signature: BTreeSet<SigEntry> = BTreeSet::new();
                let mut has_outgoing = false;
                for edge in lts.outgoing(node.id) {
                    has_outgoing = true;
                    signature.insert((own, Some(current[&edge.to]), Some(edge.label.clone())));
                }
                if !has_outgoing {
                    signature.insert((own, None, None));
                }
                if targets.contains(&node.id) {
                    signature.insert((-1, None, None));
                }
                let key: Vec<SigEntry> = signature.into_iter().collect();
                let fresh = table.len() as Colour;
                let colour = *table.entry(key).or_insert(fresh);
                recoloured.insert(node.id, colour);
            }
            next.push(recoloured);
        }
        colours = next;
        if table.len() <= distinct {
            break;
        }
        distinct = table.len();
    }
    colours
}

/// Quotients `lts` by strong bisimilarity: nodes sharing a final colour
/// are merged (the lowest id survives), then duplicate edges collapse.
/// The input is untouched.
pub fn simplify(lts: &Lts) -> Lts {
    let mut out = lts.clone();
    let colours = match colour_union(&[lts]).pop() {
        Some(map) => map,
        None => return out,
    };

    let mut groups: IndexMap<Colour, Vec<NodeId>> = IndexMap::new();
    for node in lts.nodes() {
        groups.entry(colours[&node.id]).or_default().push(node.id);
    }
    for ids in groups.into_values() {
        let mut ids = ids;
        ids.sort();
        out.merge_nodes(&ids);
    }
    out.remove_duplicate_edges();
    out
}

/// True iff the given LTSs are all strongly bisimilar: their roots share a
/// colour in the colouring of the disjoint union. An LTS without a root is
/// only equivalent to other rootless LTSs.
pub fn equivalent(graphs: &[&Lts]) -> bool {
    if graphs.len() < 2 {
        return true;
    }
    let colours = colour_union(graphs);
    let mut root_colours = graphs
        .iter()
        .zip(&colours)
        .map(|(lts, map)| lts.root().map(|root| map[&root]));
    let first = root_colours.next().and_then(|colour| colour);
    match first {
        Some(colour) => root_colours.all(|other| other == Some(colour)),
        None => root_colours.all(|other| other.is_none()),
    }
}
