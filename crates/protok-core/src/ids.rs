//! Graph identifiers and per-compile allocation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within the graphs of one compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Identifier of an edge, unique within the graphs of one compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Hands out fresh node and edge identifiers for the duration of one compile.
///
/// The driver creates one allocator per compile and threads it through the
/// interpreter and every operation that builds graph material, so
/// identifiers stay fresh across all graphs of that compile. Two compiles
/// never share an allocator.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_node: u32,
    next_edge: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    pub fn fresh_edge(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }

    /// Forgets every handed-out identifier. Only valid between compiles:
    /// graphs from before the reset must not be combined with graphs
    /// allocated after it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
