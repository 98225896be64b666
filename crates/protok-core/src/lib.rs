#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for protok labelled transition systems.
//!
//! An [`Lts`] is a rooted, directed, labelled multigraph. Edge labels are
//! the hidden action τ, the deadlock marker δ, or a visible action with an
//! optional broadcast/listen flag. Nodes carry a fixed set of typed
//! metadata: start tag, terminal role, parallel-root tag.
//!
//! The [`ops`] module hosts the algebraic operations over LTSs: action
//! hiding, weak abstraction (fair and unfair), strong-bisimulation
//! minimisation, and parallel composition. All of them are value-semantic
//! and draw fresh identifiers from the compile's [`IdAllocator`].

pub mod dump;
mod ids;
mod invariants;
mod label;
mod lts;
pub mod ops;

#[cfg(test)]
mod label_tests;

pub use ids::{EdgeId, IdAllocator, NodeId};
pub use label::{Action, ActionKind, DELTA, Label, TAU};
pub use lts::{Edge, Lts, Metadata, Node, Terminal};
