//! Errors raised while turning formula text into an [`crate::ast::Ast`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of formula, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("expected ')'")]
    MissingCloseParen,
    #[error("trailing input after a complete expression")]
    TrailingInput,
    #[error("empty formula")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ParseError>;
