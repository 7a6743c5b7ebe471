//! The value a cell produces when read.

use gridcalc_formula::FormulaErrorKind;

/// What a cell evaluates to. Three variants, matching the three kinds of
/// content a cell can hold plus the possibility that a formula failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    FormulaError(FormulaErrorKind),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::FormulaError(kind) => write!(f, "{kind}"),
        }
    }
}
