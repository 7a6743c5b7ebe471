//! A single cell: one of three variants, owning both directions of its
//! dependency edges directly (as position sets, never cell handles).

use std::collections::HashSet;

use gridcalc_formula::Position;

use crate::error::{Result, SheetError};
use crate::formula::Formula;
use crate::sheet::Sheet;
use crate::value::Value;

/// Leading character that marks a literal as escaped: its *text* keeps the
/// mark, its *value* strips it.
pub const ESCAPE: char = '\'';
/// Leading character that marks a cell's text as a formula.
pub const FORMULA: char = '=';

#[derive(Debug)]
enum CellKind {
    Empty,
    Text(String),
    Formula(Formula),
}

/// One occupied (or materialized-but-empty) position in a [`Sheet`].
#[derive(Debug)]
pub struct Cell {
    kind: CellKind,
    pub(crate) out_refs: HashSet<Position>,
    pub(crate) in_refs: HashSet<Position>,
}

impl Cell {
    pub(crate) fn new_empty() -> Self {
        Cell {
            kind: CellKind::Empty,
            out_refs: HashSet::new(),
            in_refs: HashSet::new(),
        }
    }

    /// Builds the tentative variant `text` would produce, without touching
    /// any existing cell state. Does not require a live sheet — a parse
    /// failure here means `Sheet::set` never mutates anything.
    pub(crate) fn build_kind(text: &str) -> Result<CellKindBuilt> {
        if text.is_empty() {
            return Ok(CellKindBuilt {
                kind: CellKind::Empty,
                out_refs: HashSet::new(),
            });
        }
        let mut chars = text.chars();
        let first = chars.next().unwrap();
        if first == FORMULA && text.len() > 1 {
            let formula = Formula::parse(&text[1..]).map_err(SheetError::Parse)?;
            let out_refs = formula.referenced_cells().into_iter().collect();
            return Ok(CellKindBuilt {
                kind: CellKind::Formula(formula),
                out_refs,
            });
        }
        Ok(CellKindBuilt {
            kind: CellKind::Text(text.to_string()),
            out_refs: HashSet::new(),
        })
    }

    pub(crate) fn from_built(built: CellKindBuilt, in_refs: HashSet<Position>) -> Self {
        Cell {
            kind: built.kind,
            out_refs: built.out_refs,
            in_refs,
        }
    }

    /// Collapses this cell to Empty, dropping outgoing edges. The caller
    /// (`Sheet::clear`) is responsible for unlinking the old out_refs'
    /// reverse edges and for running invalidation.
    pub(crate) fn clear_kind(&mut self) -> HashSet<Position> {
        self.kind = CellKind::Empty;
        std::mem::take(&mut self.out_refs)
    }

    pub fn value(&self, sheet: &Sheet) -> Value {
        match &self.kind {
            CellKind::Empty => Value::Number(0.0),
            CellKind::Text(s) => Value::Text(strip_escape(s).to_string()),
            CellKind::Formula(formula) => formula.evaluate(sheet),
        }
    }

    pub fn text(&self) -> String {
        match &self.kind {
            CellKind::Empty => String::new(),
            CellKind::Text(s) => s.clone(),
            CellKind::Formula(formula) => format!("{FORMULA}{}", formula.print()),
        }
    }

    /// Ascending, de-duplicated positions this cell depends on. Empty for
    /// non-Formula cells.
    pub fn referenced_cells(&self) -> Vec<Position> {
        match &self.kind {
            CellKind::Formula(formula) => formula.referenced_cells(),
            _ => Vec::new(),
        }
    }

    /// `true` if this cell has nothing to invalidate (Formula with an empty
    /// cache counts as not populated; every other kind is always treated as
    /// populated so invalidation still forwards through it once).
    pub(crate) fn invalidate_cache(&self) -> bool {
        match &self.kind {
            CellKind::Formula(formula) => formula.invalidate(),
            _ => true,
        }
    }
}

fn strip_escape(s: &str) -> &str {
    if s.starts_with(ESCAPE) {
        &s[ESCAPE.len_utf8()..]
    } else {
        s
    }
}

/// A tentative cell variant plus the outgoing edges it would need, built
/// before any mutation to the live sheet.
pub(crate) struct CellKindBuilt {
    kind: CellKind,
    pub(crate) out_refs: HashSet<Position>,
}
