//! Expands a model's definitions into labelled transition systems.
//!
//! Definitions are processed left to right; a reference to another
//! definition deep-clones the referenced LTS with fresh identifiers, so
//! every reference is an independent copy. Recursion (a definition
//! referring to itself, directly or through a forward reference) is not
//! supported and reported as an interpreter error.

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use protok_core::{Action, IdAllocator, Label, Lts, Node, Terminal, ops};

use crate::error::InterpreterError;
use crate::parser::ast::{Definition, Model, Process};
use crate::srcpos::LineIndex;

/// One algebraic operation performed while expanding a model, with the
/// source range of the construct that requested it.
#[derive(Debug, Clone)]
pub(crate) struct OperationRecord {
    pub description: String,
    pub span: TextRange,
}

/// Everything one model expands to.
#[derive(Debug)]
pub(crate) struct ModelOutcome {
    pub automata: IndexMap<String, Lts>,
    pub operations: Vec<OperationRecord>,
}

pub(crate) struct Interpreter<'a> {
    alloc: &'a mut IdAllocator,
    line_index: &'a LineIndex,
    definitions: IndexMap<String, Lts>,
    operations: Vec<OperationRecord>,
    /// Name of the definition currently being expanded, for recursion
    /// diagnostics.
    current: String,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(alloc: &'a mut IdAllocator, line_index: &'a LineIndex) -> Self {
        Self {
            alloc,
            line_index,
            definitions: IndexMap::new(),
            operations: Vec::new(),
            current: String::new(),
        }
    }

    /// Expands every definition of `model`, left to right.
    pub(crate) fn run(mut self, model: &Model) -> Result<ModelOutcome, InterpreterError> {
        for definition in &model.definitions {
            let lts = self.expand_definition(model, definition)?;
            self.definitions.insert(definition.name.clone(), lts);
        }
        Ok(ModelOutcome {
            automata: self.definitions,
            operations: self.operations,
        })
    }

    fn expand_definition(
        &mut self,
        model: &Model,
        definition: &Definition,
    ) -> Result<Lts, InterpreterError> {
        if self.definitions.contains_key(&definition.name) {
            return Err(self.error(
                definition.name_span,
                format!("duplicate definition of `{}`", definition.name),
            ));
        }
        self.current = definition.name.clone();

        let mut lts = self.expand(&definition.body)?;
        if let Some(root) = lts.root()
            && let Some(node) = lts.node_mut(root)
        {
            node.meta.start_node = true;
        }

        if let Some(hide) = &model.hide {
            let actions: IndexSet<String> = hide
                .actions
                .iter()
                .map(|action| Action::parse(&action.text).name)
                .collect();
            lts = ops::hide(&lts, &actions);
            let listed: Vec<&str> = actions.iter().map(String::as_str).collect();
            self.operations.push(OperationRecord {
                description: format!("hide {{{}}} in {}", listed.join(", "), definition.name),
                span: hide.span,
            });
        }

        Ok(lts)
    }

    fn expand(&mut self, process: &Process) -> Result<Lts, InterpreterError> {
        match process {
            Process::Stop(_) => {
                let mut lts = Lts::new();
                let id = self.alloc.fresh_node();
                lts.add_node(Node::new(id).with_terminal(Terminal::Stop));
                lts.set_root(Some(id));
                Ok(lts)
            }
            Process::Error(_) => {
                // The δ self-loop records the deadlock.
                let mut lts = Lts::new();
                let id = self.alloc.fresh_node();
                lts.add_node(Node::new(id).with_terminal(Terminal::Error));
                lts.add_edge(self.alloc.fresh_edge(), id, id, Label::Delta);
                lts.set_root(Some(id));
                Ok(lts)
            }
            Process::Sequence(sequence) => {
                let root = self.alloc.fresh_node();
                let rest = self.expand(&sequence.rest)?;
                let target = rest.root().expect("expanded process always has a root");
                let mut lts = Lts::new();
                lts.add_node(Node::new(root));
                lts.set_root(Some(root));
                lts.combine(rest);
                lts.add_edge(
                    self.alloc.fresh_edge(),
                    root,
                    target,
                    Label::visible(&sequence.action.text),
                );
                Ok(lts)
            }
            Process::Choice(choice) => {
                let mut left = self.expand(&choice.left)?;
                let right = self.expand(&choice.right)?;
                let left_root = left.root().expect("expanded process always has a root");
                let right_root = right.root().expect("expanded process always has a root");
                left.combine(right);
                left.merge_nodes(&[left_root, right_root]);
                left.retag_terminals();
                Ok(left)
            }
            Process::Parallel(parallel) => {
                let left = self.expand(&parallel.left)?;
                let right = self.expand(&parallel.right)?;
                let product = ops::parallel(&left, &right, self.alloc);
                self.operations.push(OperationRecord {
                    description: format!("parallel composition in {}", self.current),
                    span: parallel.span,
                });
                Ok(product)
            }
            Process::Name(name) => {
                if name.name == self.current {
                    return Err(self.error(
                        name.span,
                        format!("recursive definition of `{}` is not supported", name.name),
                    ));
                }
                match self.definitions.get(&name.name) {
                    Some(lts) => {
                        let mut copy = lts.clone_fresh(self.alloc);
                        // Embedded as a subprocess: the copy's root is no
                        // longer a start state of its own.
                        for node in copy.nodes_mut() {
                            node.meta.start_node = false;
                        }
                        Ok(copy)
                    }
                    None => Err(self.error(
                        name.span,
                        format!("unknown process `{}`", name.name),
                    )),
                }
            }
        }
    }

    fn error(&self, span: TextRange, message: String) -> InterpreterError {
        InterpreterError {
            message,
            location: self.line_index.span(span),
        }
    }
}
