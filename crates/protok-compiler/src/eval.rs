//! Auxiliary integer expression evaluator for user variables.
//!
//! Operands are 32-bit signed integers with wrapping arithmetic and
//! JS-compatible shifts (the count is masked to five bits). Comparison and
//! logical operators produce 0 or 1; `&&` and `||` coerce any nonzero
//! operand to true and short-circuit. Division or modulo by zero and
//! unknown variables fail with descriptive errors.

use indexmap::IndexMap;
use logos::Logos;

/// Expression evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("invalid expression: {0}")]
    Syntax(String),
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum ExprToken<'src> {
    #[regex(r"[0-9]+")]
    Number(&'src str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'src str),

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,

    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("&")]
    Amp,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinOp {
    fn from_token(token: ExprToken<'_>) -> Option<BinOp> {
        Some(match token {
            ExprToken::Star => BinOp::Mul,
            ExprToken::Slash => BinOp::Div,
            ExprToken::Percent => BinOp::Rem,
            ExprToken::Plus => BinOp::Add,
            ExprToken::Minus => BinOp::Sub,
            ExprToken::Shl => BinOp::Shl,
            ExprToken::Shr => BinOp::Shr,
            ExprToken::Lt => BinOp::Lt,
            ExprToken::Le => BinOp::Le,
            ExprToken::Gt => BinOp::Gt,
            ExprToken::Ge => BinOp::Ge,
            ExprToken::EqEq => BinOp::Eq,
            ExprToken::Ne => BinOp::Ne,
            ExprToken::Amp => BinOp::BitAnd,
            ExprToken::Caret => BinOp::BitXor,
            ExprToken::Pipe => BinOp::BitOr,
            ExprToken::AndAnd => BinOp::And,
            ExprToken::OrOr => BinOp::Or,
            _ => return None,
        })
    }

    /// Binding strength, strongest first: `* / %`, `+ -`, `<< >>`,
    /// comparisons, `== !=`, `&`, `^`, `|`, `&&`, `||`.
    fn precedence(self) -> u8 {
        match self {
            BinOp::Mul | BinOp::Div | BinOp::Rem => 10,
            BinOp::Add | BinOp::Sub => 9,
            BinOp::Shl | BinOp::Shr => 8,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 7,
            BinOp::Eq | BinOp::Ne => 6,
            BinOp::BitAnd => 5,
            BinOp::BitXor => 4,
            BinOp::BitOr => 3,
            BinOp::And => 2,
            BinOp::Or => 1,
        }
    }
}

#[derive(Debug, Clone)]
enum Expr {
    Num(i32),
    Var(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

struct ExprParser<'src> {
    tokens: Vec<ExprToken<'src>>,
    pos: usize,
}

impl<'src> ExprParser<'src> {
    fn peek(&self) -> Option<ExprToken<'src>> {
        self.tokens.get(self.pos).copied()
    }

    /// Precedence climbing; all operators are left-associative.
    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_atom()?;
        while let Some(op) = self.peek().and_then(BinOp::from_token) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.parse_expr(precedence + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_atom(&mut self) -> Result<Expr, EvalError> {
        match self.peek() {
            Some(ExprToken::Number(text)) => {
                self.pos += 1;
                let value: i32 = text
                    .parse()
                    .map_err(|_| EvalError::Syntax(format!("integer literal `{text}` out of range")))?;
                Ok(Expr::Num(value))
            }
            Some(ExprToken::Ident(name)) => {
                self.pos += 1;
                Ok(Expr::Var(name.to_string()))
            }
            Some(ExprToken::ParenOpen) => {
                self.pos += 1;
                let inner = self.parse_expr(1)?;
                match self.peek() {
                    Some(ExprToken::ParenClose) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(EvalError::Syntax("expected `)`".into())),
                }
            }
            _ => Err(EvalError::Syntax("expected a number or variable".into())),
        }
    }
}

fn eval_expr(expr: &Expr, vars: &IndexMap<String, i32>) -> Result<i32, EvalError> {
    match expr {
        Expr::Num(value) => Ok(*value),
        Expr::Var(name) => vars
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnknownVariable(name.clone())),
        Expr::Binary {
            op: BinOp::And,
            lhs,
            rhs,
        } => {
            if eval_expr(lhs, vars)? == 0 {
                Ok(0)
            } else {
                Ok((eval_expr(rhs, vars)? != 0) as i32)
            }
        }
        Expr::Binary {
            op: BinOp::Or,
            lhs,
            rhs,
        } => {
            if eval_expr(lhs, vars)? != 0 {
                Ok(1)
            } else {
                Ok((eval_expr(rhs, vars)? != 0) as i32)
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval_expr(lhs, vars)?;
            let rhs = eval_expr(rhs, vars)?;
            apply(*op, lhs, rhs)
        }
    }
}

fn apply(op: BinOp, lhs: i32, rhs: i32) -> Result<i32, EvalError> {
    Ok(match op {
        BinOp::Mul => lhs.wrapping_mul(rhs),
        BinOp::Div => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs.wrapping_div(rhs)
        }
        BinOp::Rem => {
            if rhs == 0 {
                return Err(EvalError::ModuloByZero);
            }
            lhs.wrapping_rem(rhs)
        }
        BinOp::Add => lhs.wrapping_add(rhs),
        BinOp::Sub => lhs.wrapping_sub(rhs),
        BinOp::Shl => lhs.wrapping_shl(rhs as u32),
        BinOp::Shr => lhs.wrapping_shr(rhs as u32),
        BinOp::Lt => (lhs < rhs) as i32,
        BinOp::Le => (lhs <= rhs) as i32,
        BinOp::Gt => (lhs > rhs) as i32,
        BinOp::Ge => (lhs >= rhs) as i32,
        BinOp::Eq => (lhs == rhs) as i32,
        BinOp::Ne => (lhs != rhs) as i32,
        BinOp::BitAnd => lhs & rhs,
        BinOp::BitXor => lhs ^ rhs,
        BinOp::BitOr => lhs | rhs,
        BinOp::And => ((lhs != 0) && (rhs != 0)) as i32,
        BinOp::Or => ((lhs != 0) || (rhs != 0)) as i32,
    })
}

/// Evaluates `source` against the given variable bindings.
pub fn evaluate(source: &str, vars: &IndexMap<String, i32>) -> Result<i32, EvalError> {
    let mut tokens = Vec::new();
    for token in ExprToken::lexer(source) {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(EvalError::Syntax("unrecognised character".into())),
        }
    }
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.parse_expr(1)?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::Syntax("unexpected trailing input".into()));
    }
    eval_expr(&expr, vars)
}
