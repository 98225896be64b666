//! Compile driver: parser → interpreter → output assembly.

use serde::Serialize;

use protok_core::{IdAllocator, Lts, ops};

use crate::error::CompileError;
use crate::interpreter::Interpreter;
use crate::parser;
use crate::srcpos::{LineIndex, SourceSpan};

/// Options for one compile.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    /// The caller intends to render the result. Enables presentational
    /// post-processing (display labels filled in from node ids); the
    /// semantics of the returned LTSs are identical either way.
    pub live_building: bool,
    /// Selects the fair variant of weak abstraction for
    /// [`abstraction`].
    pub fair_abstraction: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            live_building: true,
            fair_abstraction: true,
        }
    }
}

/// A named automaton produced by a compile.
#[derive(Debug, Clone, Serialize)]
pub struct Automaton {
    pub name: String,
    pub lts: Lts,
}

/// The algebraic operations a compile performed and the source position
/// that produced each one, in matching order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationLog {
    pub operations: Vec<String>,
    pub positions: Vec<SourceSpan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompileOutput {
    pub automata: Vec<Automaton>,
    pub operations: OperationLog,
    /// The compile's identifier allocator, handed back so follow-up
    /// operations (abstraction, simplification, composition of the
    /// returned automata) keep drawing fresh ids.
    #[serde(skip)]
    pub alloc: IdAllocator,
}

/// Compiles `source` into one automaton per definition, in source order.
///
/// Every compile owns a fresh [`IdAllocator`], so node and edge ids are
/// fresh across all operations of that compile and independent compiles
/// never interfere.
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    let file = parser::parse(source)?;
    let line_index = LineIndex::new(source);
    let mut alloc = IdAllocator::new();
    let mut automata = Vec::new();
    let mut log = OperationLog::default();

    for model in &file.models {
        let outcome = Interpreter::new(&mut alloc, &line_index).run(model)?;
        for (name, mut lts) in outcome.automata {
            if options.live_building {
                fill_display_labels(&mut lts);
            }
            automata.push(Automaton { name, lts });
        }
        for record in outcome.operations {
            log.operations.push(record.description);
            log.positions.push(line_index.span(record.span));
        }
    }

    Ok(CompileOutput {
        automata,
        operations: log,
        alloc,
    })
}

/// Applies weak abstraction with the variant selected by `options`.
pub fn abstraction(lts: &Lts, options: &CompileOptions, alloc: &mut IdAllocator) -> Lts {
    ops::abstraction(lts, options.fair_abstraction, alloc)
}

fn fill_display_labels(lts: &mut Lts) {
    for node in lts.nodes_mut() {
        if node.label.is_none() {
            node.label = Some(node.id.to_string());
        }
    }
}
