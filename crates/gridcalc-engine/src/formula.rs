//! Adapts an opaque [`gridcalc_formula::Ast`] to a [`crate::cell::Cell`]'s
//! evaluation contract: supplies the position-to-number resolver, owns the
//! memoized cache, and turns resolver/AST failures into [`Value`]s instead of
//! letting them escape as exceptions.

use std::cell::RefCell;

use gridcalc_formula::{Ast, FormulaErrorKind, Position, Resolver};

use crate::sheet::Sheet;
use crate::value::Value;

#[derive(Debug)]
pub(crate) struct Formula {
    ast: Ast,
    cache: RefCell<Option<Result<f64, FormulaErrorKind>>>,
}

impl Formula {
    pub(crate) fn parse(text: &str) -> gridcalc_formula::Result<Formula> {
        let ast = gridcalc_formula::parse(text)?;
        Ok(Formula {
            ast,
            cache: RefCell::new(None),
        })
    }

    /// Canonical rendering of the underlying expression.
    pub(crate) fn print(&self) -> String {
        self.ast.print()
    }

    /// Valid positions this formula depends on, ascending and de-duplicated.
    pub(crate) fn referenced_cells(&self) -> Vec<Position> {
        let mut cells: Vec<Position> = self.ast.cells().into_iter().filter(Position::is_valid).collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Evaluates (memoizing) through `sheet`, which provides the values of
    /// any cell this formula references.
    pub(crate) fn evaluate(&self, sheet: &Sheet) -> Value {
        if self.cache.borrow().is_none() {
            let resolver = SheetResolver { sheet };
            let result = self.ast.execute(&resolver);
            *self.cache.borrow_mut() = Some(result);
        }
        match (*self.cache.borrow()).unwrap() {
            Ok(n) => Value::Number(n),
            Err(kind) => Value::FormulaError(kind),
        }
    }

    /// Clears the cache if it was populated. Returns whether it was.
    pub(crate) fn invalidate(&self) -> bool {
        let mut cache = self.cache.borrow_mut();
        let was_populated = cache.is_some();
        *cache = None;
        was_populated
    }
}

/// Bridges the formula crate's [`Resolver`] to a live [`Sheet`]: invalid
/// positions fail as `Ref`, absent cells read as `0.0`, text cells are
/// coerced to numbers or fail as `Value`, and formula-error cells propagate
/// as `Value`.
struct SheetResolver<'a> {
    sheet: &'a Sheet,
}

impl Resolver for SheetResolver<'_> {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaErrorKind> {
        if !pos.is_valid() {
            return Err(FormulaErrorKind::Ref);
        }
        match self.sheet.peek(pos) {
            None => Ok(0.0),
            Some(cell) => match cell.value(self.sheet) {
                Value::Number(n) => Ok(n),
                Value::Text(s) => s.trim().parse::<f64>().map_err(|_| FormulaErrorKind::Value),
                Value::FormulaError(_) => Err(FormulaErrorKind::Value),
            },
        }
    }
}
