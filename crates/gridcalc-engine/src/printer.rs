//! Renders a sheet's printable region as tab-separated rows.

use std::fmt::{self, Write};

use gridcalc_formula::Position;

use crate::sheet::Sheet;

/// Writes every cell's evaluated [`crate::value::Value`] over the printable
/// region. Empty-text cells render as empty fields; the tab separators are
/// still emitted.
pub fn print_values<W: Write>(sheet: &Sheet, out: &mut W) -> fmt::Result {
    print(sheet, out, |cell, sheet| cell.value(sheet).to_string())
}

/// Writes every cell's [`crate::cell::Cell::text`] over the printable region.
pub fn print_texts<W: Write>(sheet: &Sheet, out: &mut W) -> fmt::Result {
    print(sheet, out, |cell, _sheet| cell.text())
}

fn print<W: Write>(sheet: &Sheet, out: &mut W, render: impl Fn(&crate::cell::Cell, &Sheet) -> String) -> fmt::Result {
    let size = sheet.printable_size();
    for row in 0..size.rows {
        for col in 0..size.cols {
            if col > 0 {
                out.write_char('\t')?;
            }
            if let Some(cell) = sheet.get(Position::new(row, col)).ok().flatten() {
                if !cell.text().is_empty() {
                    out.write_str(&render(cell, sheet))?;
                }
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_values_skips_empty_cells_but_keeps_separators() {
        let mut sheet = Sheet::new();
        sheet.set(Position::new(0, 0), "1").unwrap();
        sheet.set(Position::new(0, 2), "=1+1").unwrap();
        let mut out = String::new();
        print_values(&sheet, &mut out).unwrap();
        assert_eq!(out, "1\t\t2\n");
    }

    #[test]
    fn print_texts_renders_formula_source_not_value() {
        let mut sheet = Sheet::new();
        sheet.set(Position::new(0, 0), "=1+1").unwrap();
        let mut out = String::new();
        print_texts(&sheet, &mut out).unwrap();
        assert_eq!(out, "=1+1\n");
    }

    #[test]
    fn print_values_renders_error_tokens() {
        let mut sheet = Sheet::new();
        sheet.set(Position::new(0, 0), "=1/0").unwrap();
        let mut out = String::new();
        print_values(&sheet, &mut out).unwrap();
        assert_eq!(out, "#DIV/0!\n");
    }
}
