//! Formula tokenizing and parsing.
//!
//! One tokenize → parse step replaces the repeated find-and-rewrite passes a
//! string pipeline would need. The grammar covers numbers (with exponent
//! markers), cell references (A1 notation), ranges (`A1:B5`), built-in
//! function calls with `,`-separated arguments and an optional `;`-separated
//! trailing argument, unary sign, `+ - * /` arithmetic, and parenthesis
//! grouping. Anything else fails with a typed error.

use crate::builtins::Builtin;

use super::cell_ref::CellRef;
use super::error::FormulaError;

/// Parsed formula expression.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Ref(CellRef),
    /// Range endpoints as written; direction is normalized at evaluation.
    Range(CellRef, CellRef),
    Neg(Box<Expr>),
    Binary {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Builtin,
        args: Vec<Expr>,
        /// The `;`-separated trailing argument (e.g. ROUND's decimal count).
        tail: Option<Box<Expr>>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ref(CellRef),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Colon,
    Comma,
    Semicolon,
}

/// Append any `)` needed to close unbalanced `(`. Callers routinely drop the
/// final close paren of a function call; nothing else is repaired.
fn balance_parens(formula: &str) -> String {
    let opens = formula.chars().filter(|&c| c == '(').count();
    let closes = formula.chars().filter(|&c| c == ')').count();
    let mut out = formula.to_string();
    for _ in closes..opens {
        out.push(')');
    }
    out
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            ':' => {
                tokens.push(Token::Colon);
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            ';' => {
                tokens.push(Token::Semicolon);
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut text = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        text.push(ch);
                        chars.next();
                    } else if ch == 'e' || ch == 'E' {
                        // Exponent marker, optionally signed.
                        text.push(ch);
                        chars.next();
                        if let Some(&sign) = chars.peek() {
                            if sign == '+' || sign == '-' {
                                text.push(sign);
                                chars.next();
                            }
                        }
                    } else {
                        break;
                    }
                }
                let n = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidFormula)?;
                tokens.push(Token::Number(n));
            }
            'A'..='Z' | 'a'..='z' => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() {
                        word.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(classify_word(word)?);
            }
            _ => return Err(FormulaError::InvalidFormula),
        }
    }

    Ok(tokens)
}

/// An alphanumeric word is either a cell label (letters then digits) or a
/// function-name candidate (letters only).
fn classify_word(word: String) -> Result<Token, FormulaError> {
    match word.find(|ch: char| ch.is_ascii_digit()) {
        Some(split) if word[split..].bytes().all(|b| b.is_ascii_digit()) => {
            let cr = CellRef::parse(&word).ok_or(FormulaError::InvalidReference(word))?;
            Ok(Token::Ref(cr))
        }
        // Letters after digits ("A1B") fit neither a label nor a name.
        Some(_) => Err(FormulaError::InvalidFormula),
        None => Ok(Token::Ident(word)),
    }
}

/// Parse a formula body (leading `=` already stripped) into an AST,
/// auto-closing unbalanced parentheses first.
pub(crate) fn parse(formula: &str) -> Result<Expr, FormulaError> {
    let balanced = balance_parens(formula);
    let tokens = tokenize(&balanced)?;
    if tokens.is_empty() {
        return Err(FormulaError::InvalidFormula);
    }
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let expr = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(FormulaError::InvalidFormula);
    }
    Ok(expr)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// `expr := term (('+' | '-') term)*`
    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Op::Add,
                Some(Token::Minus) => Op::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `term := factor (('*' | '/') factor)*`
    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Op::Mul,
                Some(Token::Slash) => Op::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `factor := ('-' | '+') factor | primary`
    fn factor(&mut self) -> Result<Expr, FormulaError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.factor()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.factor()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        match self.peek().cloned() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(Expr::Number(n))
            }
            Some(Token::Ref(start)) => {
                self.pos += 1;
                if !matches!(self.peek(), Some(Token::Colon)) {
                    return Ok(Expr::Ref(start));
                }
                self.pos += 1;
                match self.peek().cloned() {
                    Some(Token::Ref(end)) => {
                        self.pos += 1;
                        Ok(Expr::Range(start, end))
                    }
                    _ => Err(FormulaError::InvalidRange(format!("{start}:"))),
                }
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                if !matches!(self.peek(), Some(Token::LParen)) {
                    return Err(FormulaError::InvalidFormula);
                }
                self.pos += 1;
                let func =
                    Builtin::from_name(&name).ok_or(FormulaError::InvalidFunction(name))?;
                let (args, tail) = self.call_args()?;
                Ok(Expr::Call { func, args, tail })
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.expr()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(FormulaError::InvalidFormula),
                }
            }
            _ => Err(FormulaError::InvalidFormula),
        }
    }

    /// Argument list of a call, after the opening paren:
    /// `args := [expr {',' expr}] [';' expr] ')'`
    fn call_args(&mut self) -> Result<(Vec<Expr>, Option<Box<Expr>>), FormulaError> {
        if matches!(self.peek(), Some(Token::RParen)) {
            self.pos += 1;
            return Ok((Vec::new(), None));
        }

        let mut args = vec![self.expr()?];
        loop {
            match self.peek() {
                Some(Token::Comma) => {
                    self.pos += 1;
                    args.push(self.expr()?);
                }
                Some(Token::Semicolon) => {
                    self.pos += 1;
                    let tail = Box::new(self.expr()?);
                    return match self.peek() {
                        Some(Token::RParen) => {
                            self.pos += 1;
                            Ok((args, Some(tail)))
                        }
                        _ => Err(FormulaError::InvalidFormula),
                    };
                }
                Some(Token::RParen) => {
                    self.pos += 1;
                    return Ok((args, None));
                }
                _ => return Err(FormulaError::InvalidFormula),
            }
        }
    }
}
