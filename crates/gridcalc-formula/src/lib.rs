//! Minimal arithmetic formula language: lexer, parser, AST and evaluator.
//!
//! This crate is the "external parser" boundary: the engine crate depends on
//! it only through [`parse`], [`Ast::execute`]/[`Ast::print`]/[`Ast::cells`]
//! and the [`Resolver`] trait. It knows nothing about sheets, cells, or
//! caching.

mod ast;
mod error;
mod lexer;
mod parser;
mod position;
mod token;

pub use ast::{Ast, BinaryOp, Expr, FormulaErrorKind, Resolver};
pub use error::{ParseError, Result};
pub use parser::parse;
pub use position::{col_to_letters, parse_a1, Position, MAX_COLS, MAX_ROWS};
