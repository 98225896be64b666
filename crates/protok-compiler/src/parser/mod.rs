//! Recursive-descent parser producing a plain AST.
//!
//! The parser is fail-fast: the first token that cannot continue the
//! grammar aborts the compile with a [`ParseError`](crate::ParseError)
//! carrying line/column positions. `core.rs` owns the parser state and
//! token primitives; `grammar.rs` owns the productions.
//!
//! # Grammar (EBNF-ish)
//!
//! ```text
//! file       = model*
//! model      = definition ("," definition)* ("\" hide_set)? "."
//! definition = NAME "=" process
//! process    = choice ("||" process)?          right-associative
//! choice     = sequence ("|" choice)?          right-associative
//! sequence   = ACTION "->" (sequence | NAME)
//!            | "STOP" | "ERROR"
//!            | "(" process ")"
//!            | NAME
//! hide_set   = "{" ACTION ("," ACTION)* "}"
//! ```
//!
//! Names are uppercase-initial, actions lowercase-initial with an optional
//! `!`/`?` prefix; `STOP` and `ERROR` are reserved.

pub mod ast;
mod core;
mod grammar;


use crate::error::ParseError;
use self::core::Parser;

/// Parses a source file: a sequence of models each closed by `.`.
pub fn parse(source: &str) -> Result<ast::SourceFile, ParseError> {
    Parser::new(source).parse_file()
}
