//! The parsed expression tree and its evaluation/printing/introspection surface.

use crate::position::Position;

/// The three ways a formula can fail to produce a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaErrorKind {
    /// A referenced position was out of the addressable grid.
    Ref,
    /// A referenced or intermediate value could not be treated as a number.
    Value,
    /// Division where the divisor was exactly zero.
    Div0,
}

impl std::fmt::Display for FormulaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            FormulaErrorKind::Ref => "#REF!",
            FormulaErrorKind::Value => "#VALUE!",
            FormulaErrorKind::Div0 => "#DIV/0!",
        };
        f.write_str(token)
    }
}

/// Something that can answer "what number does this position evaluate to".
///
/// Implemented by the embedder (a spreadsheet's sheet), never by this crate.
pub trait Resolver {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaErrorKind>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ch = match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        };
        f.write_char(ch)
    }
}

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    CellRef(Position),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Neg(Box<Expr>),
}

/// Precedence of a binary operator, used by both the parser and the printer.
fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add | BinaryOp::Sub => 1,
        BinaryOp::Mul | BinaryOp::Div => 2,
    }
}

/// A parsed formula expression.
///
/// Produced only by [`crate::parser::parse`]. Carries the list of cell
/// positions mentioned in the source text, in source order and with
/// duplicates, so that [`Ast::cells`] can report them and so that
/// [`Ast::cells`] callers can de-duplicate/sort as their contract demands.
#[derive(Debug, Clone)]
pub struct Ast {
    pub(crate) expr: Expr,
    pub(crate) cell_order: Vec<Position>,
}

impl Ast {
    pub(crate) fn new(expr: Expr, cell_order: Vec<Position>) -> Self {
        Ast { expr, cell_order }
    }

    /// Evaluates the expression through `resolver`, which answers what a
    /// referenced cell currently evaluates to as a number.
    pub fn execute(&self, resolver: &dyn Resolver) -> Result<f64, FormulaErrorKind> {
        eval(&self.expr, resolver)
    }

    /// Canonical rendering of the expression, parenthesized only where
    /// operator precedence requires it.
    pub fn print(&self) -> String {
        let mut out = String::new();
        print_expr(&self.expr, 0, &mut out);
        out
    }

    /// Every position mentioned in the source text, in source order,
    /// including duplicates and positions outside the addressable grid.
    pub fn cells(&self) -> Vec<Position> {
        self.cell_order.clone()
    }
}

fn eval(expr: &Expr, resolver: &dyn Resolver) -> Result<f64, FormulaErrorKind> {
    match expr {
        Expr::Number(n) => {
            if n.is_finite() {
                Ok(*n)
            } else {
                Err(FormulaErrorKind::Value)
            }
        }
        Expr::CellRef(pos) => resolver.resolve(*pos),
        Expr::Neg(inner) => {
            let v = eval(inner, resolver)?;
            let result = -v;
            if result.is_finite() {
                Ok(result)
            } else {
                Err(FormulaErrorKind::Value)
            }
        }
        Expr::Binary { op, left, right } => {
            let l = eval(left, resolver)?;
            let r = eval(right, resolver)?;
            let result = match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => {
                    if r == 0.0 {
                        return Err(FormulaErrorKind::Div0);
                    }
                    l / r
                }
            };
            if result.is_finite() {
                Ok(result)
            } else {
                Err(FormulaErrorKind::Value)
            }
        }
    }
}

fn print_expr(expr: &Expr, parent_precedence: u8, out: &mut String) {
    match expr {
        Expr::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Expr::CellRef(pos) => {
            let _ = write!(out, "{pos}");
        }
        Expr::Neg(inner) => {
            out.push('-');
            // Unary minus binds tighter than any binary op on its operand's right,
            // but the operand itself may still need parens (e.g. -(1+2)).
            print_expr(inner, u8::MAX, out);
        }
        Expr::Binary { op, left, right } => {
            let prec = precedence(*op);
            let needs_parens = prec < parent_precedence;
            if needs_parens {
                out.push('(');
            }
            print_expr(left, prec, out);
            let _ = write!(out, "{op}");
            // The right side of a subtraction/division needs parens at equal
            // precedence to preserve left-associativity when reprinted.
            print_expr(right, prec + 1, out);
            if needs_parens {
                out.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    struct MapResolver<'a>(&'a [(Position, f64)]);
    impl Resolver for MapResolver<'_> {
        fn resolve(&self, pos: Position) -> Result<f64, FormulaErrorKind> {
            self.0
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, v)| *v)
                .ok_or(FormulaErrorKind::Value)
        }
    }

    #[test]
    fn division_by_exact_zero_is_div0() {
        let ast = parse("1/0").unwrap();
        let resolver = MapResolver(&[]);
        assert_eq!(ast.execute(&resolver), Err(FormulaErrorKind::Div0));
    }

    #[test]
    fn overflow_is_value_not_div0() {
        // 17 factors of 1e20 overflow f64 (20*16 > 308) without ever dividing.
        let factor = "100000000000000000000";
        let expr = std::iter::repeat(factor).take(17).collect::<Vec<_>>().join("*");
        let ast = parse(&expr).unwrap();
        let resolver = MapResolver(&[]);
        assert_eq!(ast.execute(&resolver), Err(FormulaErrorKind::Value));
    }

    #[test]
    fn literal_that_overflows_at_parse_time_is_value() {
        // `f64::from_str` saturates to infinity rather than erroring, so a
        // single over-large numeric literal must still be caught at
        // evaluation time, not just the arithmetic that combines literals.
        let huge = format!("1{}", "0".repeat(400));
        let ast = parse(&huge).unwrap();
        let resolver = MapResolver(&[]);
        assert_eq!(ast.execute(&resolver), Err(FormulaErrorKind::Value));
    }

    #[test]
    fn print_minimizes_parens() {
        let ast = parse("1+2*3").unwrap();
        assert_eq!(ast.print(), "1+2*3");
    }

    #[test]
    fn print_preserves_left_associativity() {
        let ast = parse("1-2-3").unwrap();
        assert_eq!(ast.print(), "1-2-3");
        assert_eq!(
            ast.execute(&MapResolver(&[])),
            Ok(1.0 - 2.0 - 3.0)
        );
    }

    #[test]
    fn print_adds_parens_when_precedence_requires() {
        let ast = parse("(1+2)*3").unwrap();
        assert_eq!(ast.print(), "(1+2)*3");
    }

    #[test]
    fn cells_reports_source_order_with_duplicates() {
        let ast = parse("A1+A1+B2").unwrap();
        assert_eq!(
            ast.cells(),
            vec![
                Position::new(0, 0),
                Position::new(0, 0),
                Position::new(1, 1)
            ]
        );
    }
}
