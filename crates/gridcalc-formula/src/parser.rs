//! Recursive-descent, precedence-climbing parser over [`Token`]s.
//!
//! Grammar (lowest to highest precedence):
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | primary
//! primary:= number | cellref | '(' expr ')'
//! ```

use crate::ast::{Ast, BinaryOp, Expr};
use crate::error::{ParseError, Result};
use crate::lexer::Lexer;
use crate::position::Position;
use crate::token::Token;

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    cell_order: Vec<Position>,
}

/// Parses formula expression text (the part after the leading `=`) into an [`Ast`].
pub fn parse(text: &str) -> Result<Ast> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let mut lexer = Lexer::new(text);
    let current = lexer.next_token();
    let mut parser = Parser {
        lexer,
        current,
        cell_order: Vec::new(),
    };
    let expr = parser.parse_expr()?;
    if parser.current != Token::Eof {
        return Err(ParseError::TrailingInput);
    }
    Ok(Ast::new(expr, parser.cell_order))
}

impl<'a> Parser<'a> {
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.current == Token::Minus {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current.clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::CellRef(pos) => {
                self.advance();
                self.cell_order.push(pos);
                Ok(Expr::CellRef(pos))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                if self.current != Token::RParen {
                    return Err(ParseError::MissingCloseParen);
                }
                self.advance();
                Ok(inner)
            }
            Token::Eof => Err(ParseError::UnexpectedEof("an expression")),
            Token::Illegal(ch) => Err(ParseError::UnexpectedChar(ch)),
            Token::RParen | Token::Plus | Token::Minus | Token::Star | Token::Slash => {
                Err(ParseError::UnexpectedEof("an expression"))
            }
        }
    }
}
