#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiler for the protok process-algebra language.
//!
//! A source text is a sequence of models; each model defines named
//! processes built from action sequences (`a -> STOP`), choice (`|`),
//! parallel composition (`||`), references to earlier definitions, and an
//! optional hide set (`\{a}`). Compiling expands every definition into a
//! labelled transition system.
//!
//! # Example
//!
//! ```
//! use protok_compiler::{CompileOptions, compile};
//!
//! let output = compile("P = a -> STOP.", &CompileOptions::default()).expect("valid model");
//! assert_eq!(output.automata[0].name, "P");
//! assert_eq!(output.automata[0].lts.node_count(), 2);
//! ```

mod compile;
mod error;
pub mod eval;
mod interpreter;
mod lexer;
pub mod parser;
mod srcpos;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod interpreter_tests;

pub use compile::{
    Automaton, CompileOptions, CompileOutput, OperationLog, abstraction, compile,
};
pub use error::{CompileError, InterpreterError, ParseError, render};
pub use eval::EvalError;
pub use srcpos::{LineIndex, Position, SourceSpan};

pub use protok_core::{IdAllocator, Label, Lts};
