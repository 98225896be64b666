//! Lexer for the process-algebra language.
//!
//! Produces span-based tokens; text is sliced from the source on demand.
//! Whitespace and comments are skipped. Consecutive unlexable characters
//! coalesce into a single `Garbage` token instead of one error per
//! character, which keeps the token stream manageable for malformed input.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*(?:[^*]|\*[^/])*\*/")]
pub enum TokenKind {
    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,

    #[token("->")]
    Arrow,

    #[token("||")]
    PipePipe,

    #[token("|")]
    Pipe,

    #[token("\\")]
    Backslash,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("STOP")]
    KwStop,

    #[token("ERROR")]
    KwError,

    /// Process name: uppercase-initial identifier.
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    Name,

    /// Action: lowercase-initial identifier, optionally prefixed with `!`
    /// (broadcast) or `?` (listen).
    #[regex(r"[!?]?[a-z][A-Za-z0-9_]*")]
    Action,

    /// Coalesced run of unlexable characters.
    Garbage,
}

impl TokenKind {
    /// Human-readable form for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Equals => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Pipe => "`|`",
            TokenKind::Backslash => "`\\`",
            TokenKind::BraceOpen => "`{`",
            TokenKind::BraceClose => "`}`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::KwStop => "`STOP`",
            TokenKind::KwError => "`ERROR`",
            TokenKind::Name => "a process name",
            TokenKind::Action => "an action",
            TokenKind::Garbage => "unrecognised characters",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens, coalescing
/// consecutive lexer errors into single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, range_to_text_range(start..end)));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
