//! Grammar productions, implemented as an extension of `Parser`.

use rowan::TextRange;

use super::ast::{
    ActionRef, Choice, Definition, HideSet, Model, NameRef, Parallel, Process, Sequence,
    SourceFile,
};
use super::core::Parser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_file(mut self) -> Result<SourceFile, ParseError> {
        let mut models = Vec::new();
        while !self.eof() {
            models.push(self.parse_model()?);
        }
        Ok(SourceFile { models })
    }

    /// `Definition ("," Definition)* ("\" HideSet)? "."`
    fn parse_model(&mut self) -> Result<Model, ParseError> {
        let start = self.current_span();
        let mut definitions = vec![self.parse_definition()?];
        while self.eat(TokenKind::Comma) {
            definitions.push(self.parse_definition()?);
        }
        let hide = if self.eat(TokenKind::Backslash) {
            Some(self.parse_hide_set()?)
        } else {
            None
        };
        let dot = self.expect(TokenKind::Dot, "`.` to close the model")?;
        Ok(Model {
            definitions,
            hide,
            span: start.cover(dot.span),
        })
    }

    /// `Name "=" Process`
    fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        if self.at(TokenKind::KwStop) || self.at(TokenKind::KwError) {
            return Err(self.error(format!(
                "{} is reserved and cannot name a definition",
                self.found()
            )));
        }
        let name_token = self.expect(TokenKind::Name, "a definition name")?;
        let name = self.text(&name_token).to_string();
        self.expect(TokenKind::Equals, "`=` after the definition name")?;
        let body = self.parse_process()?;
        Ok(Definition {
            span: name_token.span.cover(body.span()),
            name,
            name_span: name_token.span,
            body,
        })
    }

    /// `Choice ("||" Process)?` — `||` binds weakest and associates right.
    fn parse_process(&mut self) -> Result<Process, ParseError> {
        self.enter_recursion()?;
        let left = self.parse_choice()?;
        let process = if self.eat(TokenKind::PipePipe) {
            let right = self.parse_process()?;
            Process::Parallel(Parallel {
                span: left.span().cover(right.span()),
                left: Box::new(left),
                right: Box::new(right),
            })
        } else {
            left
        };
        self.exit_recursion();
        Ok(process)
    }

    /// `Sequence ("|" Choice)?` — right-associative.
    fn parse_choice(&mut self) -> Result<Process, ParseError> {
        let left = self.parse_sequence()?;
        if self.eat(TokenKind::Pipe) {
            let right = self.parse_choice()?;
            return Ok(Process::Choice(Choice {
                span: left.span().cover(right.span()),
                left: Box::new(left),
                right: Box::new(right),
            }));
        }
        Ok(left)
    }

    /// `Action "->" (Sequence | Name) | "STOP" | "ERROR" | "(" Process ")"
    /// | Name`
    fn parse_sequence(&mut self) -> Result<Process, ParseError> {
        self.enter_recursion()?;
        let process = match self.current() {
            Some(TokenKind::Action) => {
                let action_token = self.bump();
                let action = ActionRef {
                    text: self.text(&action_token).to_string(),
                    span: action_token.span,
                };
                self.expect(TokenKind::Arrow, "`->` after the action")?;
                let rest = if self.at(TokenKind::Name) {
                    let name_token = self.bump();
                    Process::Name(NameRef {
                        name: self.text(&name_token).to_string(),
                        span: name_token.span,
                    })
                } else {
                    self.parse_sequence()?
                };
                Process::Sequence(Sequence {
                    span: action.span.cover(rest.span()),
                    action,
                    rest: Box::new(rest),
                })
            }
            Some(TokenKind::KwStop) => Process::Stop(self.bump().span),
            Some(TokenKind::KwError) => Process::Error(self.bump().span),
            Some(TokenKind::ParenOpen) => {
                self.bump();
                let inner = self.parse_process()?;
                self.expect(TokenKind::ParenClose, "`)` to close the group")?;
                inner
            }
            Some(TokenKind::Name) => {
                let name_token = self.bump();
                Process::Name(NameRef {
                    name: self.text(&name_token).to_string(),
                    span: name_token.span,
                })
            }
            _ => {
                return Err(self.error(format!(
                    "expected an action, `STOP`, `ERROR`, `(`, or a process name, found {}",
                    self.found()
                )));
            }
        };
        self.exit_recursion();
        Ok(process)
    }

    /// `"{" Action ("," Action)* "}"`
    fn parse_hide_set(&mut self) -> Result<HideSet, ParseError> {
        let open = self.expect(TokenKind::BraceOpen, "`{` to open the hide set")?;
        let mut actions = vec![self.parse_hidden_action()?];
        while self.eat(TokenKind::Comma) {
            actions.push(self.parse_hidden_action()?);
        }
        let close = self.expect(TokenKind::BraceClose, "`}` to close the hide set")?;
        let span: TextRange = open.span.cover(close.span);
        Ok(HideSet { actions, span })
    }

    fn parse_hidden_action(&mut self) -> Result<ActionRef, ParseError> {
        let token = self.expect(TokenKind::Action, "an action to hide")?;
        Ok(ActionRef {
            text: self.text(&token).to_string(),
            span: token.span,
        })
    }
}
