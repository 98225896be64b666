//! Plain owned AST for process models.
//!
//! Every node carries the `TextRange` it was parsed from, so the
//! interpreter can attach source positions to the operations it performs
//! and to its own errors.

use rowan::TextRange;

/// A parsed source file: a sequence of models, each closed by `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub models: Vec<Model>,
}

/// One model: comma-separated definitions with an optional hide set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub definitions: Vec<Definition>,
    pub hide: Option<HideSet>,
    pub span: TextRange,
}

/// `Name = process`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub name_span: TextRange,
    pub body: Process,
    pub span: TextRange,
}

/// `\{a, b}` — actions the model makes hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideSet {
    pub actions: Vec<ActionRef>,
    pub span: TextRange,
}

/// An action occurrence in source; `text` keeps any `!`/`?` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    pub text: String,
    pub span: TextRange,
}

/// A process expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Process {
    Sequence(Sequence),
    Choice(Choice),
    Parallel(Parallel),
    Name(NameRef),
    Stop(TextRange),
    Error(TextRange),
}

/// `action -> rest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub action: ActionRef,
    pub rest: Box<Process>,
    pub span: TextRange,
}

/// `left | right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub left: Box<Process>,
    pub right: Box<Process>,
    pub span: TextRange,
}

/// `left || right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parallel {
    pub left: Box<Process>,
    pub right: Box<Process>,
    pub span: TextRange,
}

/// Reference to another definition by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRef {
    pub name: String,
    pub span: TextRange,
}

impl Process {
    pub fn span(&self) -> TextRange {
        match self {
            Process::Sequence(sequence) => sequence.span,
            Process::Choice(choice) => choice.span,
            Process::Parallel(parallel) => parallel.span,
            Process::Name(name) => name.span,
            Process::Stop(span) | Process::Error(span) => *span,
        }
    }
}
