use gridcalc_formula::{parse, FormulaErrorKind, Position, Resolver};

struct Sheet(Vec<(Position, f64)>);

impl Resolver for Sheet {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaErrorKind> {
        if !pos.is_valid() {
            return Err(FormulaErrorKind::Ref);
        }
        Ok(self
            .0
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, v)| *v)
            .unwrap_or(0.0))
    }
}

#[test]
fn end_to_end_arithmetic_with_refs() {
    let sheet = Sheet(vec![
        (Position::new(0, 0), 2.0),
        (Position::new(1, 0), 3.0),
    ]);
    let ast = parse("A1+A2*2").unwrap();
    assert_eq!(ast.execute(&sheet), Ok(8.0));
}

#[test]
fn missing_cell_reads_as_zero() {
    let sheet = Sheet(vec![]);
    let ast = parse("A1+1").unwrap();
    assert_eq!(ast.execute(&sheet), Ok(1.0));
}

#[test]
fn division_by_zero_is_div0_not_value() {
    let sheet = Sheet(vec![]);
    let ast = parse("5/(2-2)").unwrap();
    assert_eq!(ast.execute(&sheet), Err(FormulaErrorKind::Div0));
}

#[test]
fn print_is_reparsable_and_stable() {
    let ast = parse("1+2*(3-4)").unwrap();
    let printed = ast.print();
    let reparsed = parse(&printed).unwrap();
    assert_eq!(reparsed.print(), printed);
}
