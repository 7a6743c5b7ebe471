//! Error type for `Sheet` mutations.

use gridcalc_formula::ParseError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SheetError {
    #[error("position is outside the addressable grid")]
    InvalidPosition,
    #[error("formula could not be parsed: {0}")]
    Parse(#[from] ParseError),
    #[error("assignment would introduce a circular dependency")]
    CircularDependency,
}

pub type Result<T> = std::result::Result<T, SheetError>;
