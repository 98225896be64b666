//! Caller-visible error types and snippet rendering.
//!
//! Syntax and interpreter failures are distinct types wrapped by
//! [`CompileError`]; callers tell them apart by matching the variant, not
//! by inspecting message text.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::srcpos::SourceSpan;

/// Syntax error: the parser could not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}:{}", .location.start.line, .location.start.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceSpan,
}

/// Interpreter error: a model failed to expand — an unknown or duplicate
/// process name, or an unsupported recursive reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}:{}", .location.start.line, .location.start.column)]
pub struct InterpreterError {
    pub message: String,
    pub location: SourceSpan,
}

/// Any failure that terminates a compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("Syntax error {0}")]
    Syntax(#[from] ParseError),
    #[error("Error: {0}")]
    Interpreter(#[from] InterpreterError),
}

impl CompileError {
    pub fn location(&self) -> SourceSpan {
        match self {
            CompileError::Syntax(error) => error.location,
            CompileError::Interpreter(error) => error.location,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Syntax(error) => &error.message,
            CompileError::Interpreter(error) => &error.message,
        }
    }

    /// Renders the error as an annotated snippet against `source`.
    pub fn render(&self, source: &str) -> String {
        render(source, self.message(), self.location())
    }
}

/// Renders a located message as an annotated snippet.
pub fn render(source: &str, message: &str, location: SourceSpan) -> String {
    let range = annotation_range(location, source.len());
    let snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(range).label(message));
    let report: Vec<Group> = vec![Level::ERROR.primary_title(message).element(snippet)];
    Renderer::plain().render(&report).to_string()
}

/// Widens empty ranges so the caret has a character to sit under, and
/// clamps to the source length.
fn annotation_range(location: SourceSpan, limit: usize) -> std::ops::Range<usize> {
    let start = (location.start.offset as usize).min(limit);
    let end = (location.end.offset as usize).min(limit);
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
