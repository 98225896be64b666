//! Stable text rendering of an LTS for tests and debugging.

use std::fmt::Write;

use crate::lts::{Lts, Terminal};

/// Renders `lts` one line per node and per edge, in insertion order.
///
/// ```text
/// root n0
/// n0 [start]
/// n1 [stop]
/// n0 -a-> n1
/// ```
pub fn dump(lts: &Lts) -> String {
    let mut out = String::new();
    match lts.root() {
        Some(root) => writeln!(out, "root {root}"),
        None => writeln!(out, "root ∅"),
    }
    .expect("String write never fails");

    for node in lts.nodes() {
        write!(out, "{}", node.id).expect("String write never fails");
        if let Some(label) = &node.label {
            write!(out, " \"{label}\"").expect("String write never fails");
        }
        let mut tags = Vec::new();
        if node.meta.start_node {
            tags.push("start");
        }
        match node.meta.terminal {
            Some(Terminal::Stop) => tags.push("stop"),
            Some(Terminal::Error) => tags.push("error"),
            None => {}
        }
        if node.meta.parallel {
            tags.push("parallel");
        }
        if !tags.is_empty() {
            write!(out, " [{}]", tags.join(" ")).expect("String write never fails");
        }
        out.push('\n');
    }

    for edge in lts.edges() {
        writeln!(out, "{} -{}-> {}", edge.from, edge.label, edge.to)
            .expect("String write never fails");
    }

    out
}
