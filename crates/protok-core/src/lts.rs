//! The labelled transition system: nodes, edges, metadata, and the
//! maintenance operations the algebra is built from.
//!
//! An [`Lts`] owns its nodes and edges; operations receive the graph they
//! work on instead of nodes holding back-references to their container.
//! Node and edge tables are `IndexMap`s so iteration order is the insertion
//! order, which keeps every pass deterministic.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::ids::{EdgeId, IdAllocator, NodeId};
use crate::label::Label;

/// Sink role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Stop,
    /// Deadlock sink; the destination of at least one δ edge.
    Error,
}

/// Typed metadata carried by a node.
///
/// The recognised keys are a fixed set, so this is a struct of optional
/// fields rather than an open map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Node is (or must be treated as) a root after structural rewrites.
    pub start_node: bool,
    pub terminal: Option<Terminal>,
    /// Node is the product root of a parallel composition.
    pub parallel: bool,
}

impl Metadata {
    /// Union with `other`. Flags are or-ed; on a conflicting `terminal`
    /// value the later one (`other`) wins, which is the deterministic
    /// tie-break node merging relies on.
    pub fn merge(&mut self, other: &Metadata) {
        self.start_node |= other.start_node;
        self.parallel |= other.parallel;
        if other.terminal.is_some() {
            self.terminal = other.terminal;
        }
    }
}

/// A state of an LTS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display label; `None` means the renderer falls back to the id.
    pub label: Option<String>,
    pub meta: Metadata,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            label: None,
            meta: Metadata::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.meta.terminal = Some(terminal);
        self
    }

    pub fn with_start(mut self) -> Self {
        self.meta.start_node = true;
        self
    }
}

/// A directed, labelled transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub label: Label,
}

impl Edge {
    pub fn is_hidden(&self) -> bool {
        self.label.is_hidden()
    }

    pub fn is_deadlock(&self) -> bool {
        self.label.is_deadlock()
    }
}

/// A rooted, directed, labelled multigraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lts {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    root: Option<NodeId>,
}

impl Lts {
    pub fn new() -> Self {
        Self::default()
    }

    // --- nodes ---

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        debug_assert!(!self.nodes.contains_key(&id), "duplicate node id {id}");
        self.nodes.insert(id, node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes a node together with its incident edges. Clears the root if
    /// it pointed at the removed node.
    pub fn remove_node(&mut self, id: NodeId) {
        if self.nodes.shift_remove(&id).is_none() {
            return;
        }
        self.edges.retain(|_, edge| edge.from != id && edge.to != id);
        if self.root == Some(id) {
            self.root = None;
        }
    }

    // --- edges ---

    pub fn add_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId, label: Label) -> EdgeId {
        debug_assert!(self.nodes.contains_key(&from), "edge {id} from missing {from}");
        debug_assert!(self.nodes.contains_key(&to), "edge {id} to missing {to}");
        debug_assert!(!self.edges.contains_key(&id), "duplicate edge id {id}");
        self.edges.insert(id, Edge { id, from, to, label });
        id
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.values_mut()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn remove_edge(&mut self, id: EdgeId) {
        self.edges.shift_remove(&id);
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.from == id)
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.to == id)
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId, label: &Label) -> bool {
        self.edges
            .values()
            .any(|edge| edge.from == from && edge.to == to && edge.label == *label)
    }

    // --- root ---

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Reassigns the root. The new root must already be in the graph;
    /// clearing is always allowed.
    pub fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            debug_assert!(self.nodes.contains_key(&id), "root {id} not in graph");
        }
        self.root = root;
    }

    /// A node counts as a start state if it is the root or tagged as one.
    pub fn is_start(&self, id: NodeId) -> bool {
        self.root == Some(id)
            || self
                .node(id)
                .is_some_and(|node| node.meta.start_node)
    }

    /// The set of labels appearing on edges, in first-appearance order.
    pub fn alphabet(&self) -> IndexSet<Label> {
        self.edges.values().map(|edge| edge.label.clone()).collect()
    }

    // --- maintenance operations ---

    /// Deep clone with fresh identifiers drawn from `alloc`. Used when a
    /// process reference is resolved: each reference produces an
    /// independent copy, so later mutations never alias.
    pub fn clone_fresh(&self, alloc: &mut IdAllocator) -> Lts {
        let mut mapping: IndexMap<NodeId, NodeId> = IndexMap::with_capacity(self.nodes.len());
        let mut out = Lts::new();
        for node in self.nodes.values() {
            let id = alloc.fresh_node();
            mapping.insert(node.id, id);
            out.nodes.insert(
                id,
                Node {
                    id,
                    label: node.label.clone(),
                    meta: node.meta,
                },
            );
        }
        for edge in self.edges.values() {
            let id = alloc.fresh_edge();
            out.edges.insert(
                id,
                Edge {
                    id,
                    from: mapping[&edge.from],
                    to: mapping[&edge.to],
                    label: edge.label.clone(),
                },
            );
        }
        out.root = self.root.map(|root| mapping[&root]);
        out
    }

    /// Union of node and edge sets keyed by id; collisions are silently
    /// skipped. Keeps this graph's root, taking the other's only when this
    /// graph has none.
    pub fn combine(&mut self, other: Lts) {
        for (id, node) in other.nodes {
            self.nodes.entry(id).or_insert(node);
        }
        for (id, edge) in other.edges {
            self.edges.entry(id).or_insert(edge);
        }
        if self.root.is_none() {
            self.root = other.root;
        }
    }

    /// Merges the given nodes into `ids[0]`. In- and out-edges of the
    /// other nodes are retargeted onto the survivor, metadata bags are
    /// unioned (later entries overwrite on conflict), and the root follows
    /// if it was one of the merged nodes.
    pub fn merge_nodes(&mut self, ids: &[NodeId]) {
        let Some((&survivor, rest)) = ids.split_first() else {
            return;
        };
        for &id in rest {
            if id == survivor {
                continue;
            }
            let Some(node) = self.nodes.shift_remove(&id) else {
                continue;
            };
            if let Some(kept) = self.nodes.get_mut(&survivor) {
                kept.meta.merge(&node.meta);
                if kept.label.is_none() {
                    kept.label = node.label;
                }
            }
            for edge in self.edges.values_mut() {
                if edge.from == id {
                    edge.from = survivor;
                }
                if edge.to == id {
                    edge.to = survivor;
                }
            }
            if self.root == Some(id) {
                self.root = Some(survivor);
            }
        }
    }

    /// Collapses edges with identical (from, to, label), keeping the
    /// earliest-inserted one.
    pub fn remove_duplicate_edges(&mut self) {
        let mut seen: IndexSet<(NodeId, NodeId, Label)> = IndexSet::with_capacity(self.edges.len());
        self.edges
            .retain(|_, edge| seen.insert((edge.from, edge.to, edge.label.clone())));
    }

    /// Removes every node not reachable from the root. Without a root the
    /// whole graph is discarded.
    pub fn trim(&mut self) {
        let Some(root) = self.root else {
            self.nodes.clear();
            self.edges.clear();
            return;
        };
        let mut reachable: IndexSet<NodeId> = IndexSet::with_capacity(self.nodes.len());
        reachable.insert(root);
        let mut queue = vec![root];
        while let Some(id) = queue.pop() {
            for edge in self.edges.values() {
                if edge.from == id && reachable.insert(edge.to) {
                    queue.push(edge.to);
                }
            }
        }
        self.nodes.retain(|id, _| reachable.contains(id));
        self.edges
            .retain(|_, edge| reachable.contains(&edge.from) && reachable.contains(&edge.to));
    }

    /// Restores terminal tags after edge additions or removals: a `stop`
    /// tag is dropped from any node that has outgoing edges, and an
    /// untagged sink becomes `stop`. `error` tags are left alone.
    pub fn retag_terminals(&mut self) {
        let has_outgoing: IndexSet<NodeId> = self.edges.values().map(|edge| edge.from).collect();
        for node in self.nodes.values_mut() {
            if has_outgoing.contains(&node.id) {
                if node.meta.terminal == Some(Terminal::Stop) {
                    node.meta.terminal = None;
                }
            } else if node.meta.terminal.is_none() {
                node.meta.terminal = Some(Terminal::Stop);
            }
        }
    }
}
