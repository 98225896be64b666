//! Algebraic operations over labelled transition systems.
//!
//! Every operation is value-semantic: it works on a clone of its input (or
//! builds a fresh graph) and never mutates what it was given. Operations
//! that create nodes or edges draw identifiers from the compile's
//! [`IdAllocator`](crate::IdAllocator).

mod abstraction;
mod bisim;
mod hide;
mod parallel;

#[cfg(test)]
mod hide_tests;

pub use abstraction::abstraction;
pub use bisim::{equivalent, simplify};
pub use hide::hide;
pub use parallel::parallel;
