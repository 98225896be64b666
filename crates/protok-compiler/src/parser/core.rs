//! Parser state and token-level primitives.

use rowan::{TextRange, TextSize};

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind, lex, token_text};
use crate::srcpos::LineIndex;

/// Parenthesis nesting bound; exceeding it is a syntax error rather than a
/// stack overflow.
const MAX_DEPTH: u32 = 512;

/// Fail-fast recursive-descent parser over the lexed token list.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    line_index: LineIndex,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
            depth: 0,
            line_index: LineIndex::new(source),
        }
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Current token kind; `None` at end of input.
    pub(super) fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|token| token.kind)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |token| token.span)
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// Consumes and returns the current token. Must not be called at EOF.
    pub(super) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind` or fails with "expected {what}".
    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(format!("expected {what}, found {}", self.found())))
        }
    }

    pub(super) fn found(&self) -> &'static str {
        match self.current() {
            Some(kind) => kind.describe(),
            None => "end of input",
        }
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    /// Builds a syntax error at the current token.
    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.current_span(), message)
    }

    pub(super) fn error_at(&self, span: TextRange, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            location: self.line_index.span(span),
        }
    }

    pub(super) fn enter_recursion(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("recursion limit exceeded"));
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
