//! Parallel composition: the Cartesian product of two LTSs, synchronising
//! on the shared alphabet.

use indexmap::{IndexMap, IndexSet};

use crate::ids::{IdAllocator, NodeId};
use crate::label::{Action, ActionKind, Label};
use crate::lts::{Lts, Node, Terminal};

/// Synchronisation key of a label. Visible actions synchronise by bare
/// name; the broadcast/listen flag is orthogonal and carried through onto
/// the emitted edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SyncKey {
    Tau,
    Delta,
    Name(String),
}

fn sync_key(label: &Label) -> SyncKey {
    match label {
        Label::Tau => SyncKey::Tau,
        Label::Delta => SyncKey::Delta,
        Label::Visible(action) => SyncKey::Name(action.name.clone()),
    }
}

fn alphabet_keys(lts: &Lts) -> IndexSet<SyncKey> {
    lts.edges().map(|edge| sync_key(&edge.label)).collect()
}

fn action_kind(label: &Label) -> ActionKind {
    match label {
        Label::Visible(action) => action.kind,
        _ => ActionKind::Plain,
    }
}

/// Label of a synchronised move. Hiddenness and deadlock are inherited;
/// for visible actions the stronger of the two flags wins (broadcast over
/// listen over plain).
fn synchronised_label(key: &SyncKey, left: &Label, right: &Label) -> Label {
    match key {
        SyncKey::Tau => Label::Tau,
        SyncKey::Delta => Label::Delta,
        SyncKey::Name(name) => {
            let kind = match (action_kind(left), action_kind(right)) {
                (ActionKind::Broadcast, _) | (_, ActionKind::Broadcast) => ActionKind::Broadcast,
                (ActionKind::Listen, _) | (_, ActionKind::Listen) => ActionKind::Listen,
                _ => ActionKind::Plain,
            };
            Label::Visible(Action::with_kind(name.clone(), kind))
        }
    }
}

fn display_or_id(node: &Node) -> String {
    match &node.label {
        Some(label) if !label.is_empty() => label.clone(),
        _ => node.id.to_string(),
    }
}

/// Composes `left` and `right` into their product.
///
/// Shared actions move synchronously (every pair of same-named transitions
/// is enumerated, so nondeterminism survives), private actions interleave.
/// The product root is the pair of the component roots, tagged `parallel`;
/// a product node is a start state iff both components are, and `stop` iff
/// both components are. Unreachable product states are trimmed away.
/// Edges are not deduplicated here; callers invoke duplicate removal when
/// they need it.
pub fn parallel(left: &Lts, right: &Lts, alloc: &mut IdAllocator) -> Lts {
    let mut out = Lts::new();
    let mut pairs: IndexMap<(NodeId, NodeId), NodeId> = IndexMap::new();

    for a in left.nodes() {
        for b in right.nodes() {
            let id = alloc.fresh_node();
            let mut node =
                Node::new(id).with_label(format!("{}.{}", display_or_id(a), display_or_id(b)));
            node.meta.start_node = left.is_start(a.id) && right.is_start(b.id);
            if a.meta.terminal == Some(Terminal::Stop) && b.meta.terminal == Some(Terminal::Stop) {
                node.meta.terminal = Some(Terminal::Stop);
            }
            out.add_node(node);
            pairs.insert((a.id, b.id), id);
        }
    }

    if let (Some(left_root), Some(right_root)) = (left.root(), right.root()) {
        let root = pairs[&(left_root, right_root)];
        if let Some(node) = out.node_mut(root) {
            node.meta.parallel = true;
        }
        out.set_root(Some(root));
    }

    let left_keys = alphabet_keys(left);
    let right_keys = alphabet_keys(right);
    for key in left_keys.union(&right_keys) {
        match (left_keys.contains(key), right_keys.contains(key)) {
            (true, true) => {
                for e1 in left.edges().filter(|edge| sync_key(&edge.label) == *key) {
                    for e2 in right.edges().filter(|edge| sync_key(&edge.label) == *key) {
                        out.add_edge(
                            alloc.fresh_edge(),
                            pairs[&(e1.from, e2.from)],
                            pairs[&(e1.to, e2.to)],
                            synchronised_label(key, &e1.label, &e2.label),
                        );
                    }
                }
            }
            (true, false) => {
                for e1 in left.edges().filter(|edge| sync_key(&edge.label) == *key) {
                    for b in right.nodes() {
                        out.add_edge(
                            alloc.fresh_edge(),
                            pairs[&(e1.from, b.id)],
                            pairs[&(e1.to, b.id)],
                            e1.label.clone(),
                        );
                    }
                }
            }
            (false, true) => {
                for e2 in right.edges().filter(|edge| sync_key(&edge.label) == *key) {
                    for a in left.nodes() {
                        out.add_edge(
                            alloc.fresh_edge(),
                            pairs[&(a.id, e2.from)],
                            pairs[&(a.id, e2.to)],
                            e2.label.clone(),
                        );
                    }
                }
            }
            (false, false) => unreachable!("key comes from the union of both alphabets"),
        }
    }

    out.trim();
    out
}
