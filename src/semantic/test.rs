use super::ops::BinaryOp;
use super::r#type::PrimitiveType;
use super::symbol_table::{Storage, SymbolTable};
use super::value::{LValue, Number};
use super::SemanticErrorKind;

macro_rules! assert_apply {
    ( $( $lhs: expr, $op: ident, $rhs: expr => $expected: expr );+ $(;)? ) => {
        $(
            assert_eq!(BinaryOp::$op.apply($lhs, $rhs), Ok($expected));
        )+
    };
}

#[test]
fn test_int_arithmetic() {
    assert_apply!(
        Number::Int(3), Plus, Number::Int(4) => Number::Int(7);
        Number::Int(3), Minus, Number::Int(4) => Number::Int(-1);
        Number::Int(3), Mul, Number::Int(4) => Number::Int(12);
        Number::Int(7), Div, Number::Int(2) => Number::Int(3);
        Number::Int(-7), Div, Number::Int(2) => Number::Int(-3);
    );
}

#[test]
fn test_float_arithmetic() {
    assert_apply!(
        Number::Float(1.5), Plus, Number::Float(2.0) => Number::Float(3.5);
        Number::Float(1.5), Minus, Number::Float(2.0) => Number::Float(-0.5);
        Number::Float(1.5), Mul, Number::Float(2.0) => Number::Float(3.0);
        Number::Float(7.0), Div, Number::Float(2.0) => Number::Float(3.5);
    );
}

#[test]
fn test_comparisons_yield_int() {
    assert_apply!(
        Number::Int(1), Lesser, Number::Int(2) => Number::Int(1);
        Number::Int(2), LesserEq, Number::Int(2) => Number::Int(1);
        Number::Int(1), Greater, Number::Int(2) => Number::Int(0);
        Number::Int(2), GreaterEq, Number::Int(3) => Number::Int(0);
        Number::Int(2), Eq, Number::Int(2) => Number::Int(1);
        Number::Int(2), NotEq, Number::Int(2) => Number::Int(0);
        Number::Float(0.5), Lesser, Number::Float(1.5) => Number::Int(1);
        Number::Float(2.5), Eq, Number::Float(2.5) => Number::Int(1);
        Number::Float(2.5), NotEq, Number::Float(2.5) => Number::Int(0);
    );
}

#[test]
fn test_mixed_operands_never_coerce() {
    for op in [BinaryOp::Plus, BinaryOp::Div, BinaryOp::Lesser, BinaryOp::Eq] {
        let err = op.apply(Number::Int(1), Number::Float(1.0)).unwrap_err();
        assert_eq!(
            err,
            SemanticErrorKind::TypeMismatch {
                op: op.to_string(),
                lhs: PrimitiveType::Int,
                rhs: PrimitiveType::Float,
            }
        );
    }
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        BinaryOp::Div.apply(Number::Int(5), Number::Int(0)),
        Err(SemanticErrorKind::DivisionByZero)
    );
    assert_eq!(
        BinaryOp::Div.apply(Number::Float(5.0), Number::Float(0.0)),
        Err(SemanticErrorKind::DivisionByZero)
    );
    assert!(matches!(
        BinaryOp::Div.apply(Number::Float(5.0), Number::Int(0)),
        Err(SemanticErrorKind::TypeMismatch { .. })
    ));
}

#[test]
fn test_number_text() {
    assert_eq!(Number::Int(11).to_string(), "11");
    assert_eq!(Number::Float(11.0).to_string(), "11.0");
    assert_eq!(Number::Float(2.25).to_string(), "2.25");
    assert_eq!(Number::zero(PrimitiveType::Float).to_string(), "0.0");
    assert_eq!(Number::from_literal("42"), Some(Number::Int(42)));
    assert_eq!(Number::from_literal("4.5"), Some(Number::Float(4.5)));
    assert_eq!(Number::Float(-2.9).as_index(), -2);
}

#[test]
fn test_float_text_has_no_exponent() {
    assert_eq!(Number::Float(1e17).to_string(), "100000000000000000.0");
    assert_eq!(Number::Float(0.000001 * 0.1).to_string(), "0.0000001");
    assert_eq!(Number::Float(-0.5).to_string(), "-0.5");
    assert_eq!(Number::Float(-3.0).to_string(), "-3.0");
}

#[test]
fn test_float_overflow() {
    assert_eq!(
        BinaryOp::Mul.apply(Number::Float(1e308), Number::Float(10.0)),
        Err(SemanticErrorKind::FloatOverflow { op: "*".to_string() })
    );
    assert_eq!(
        BinaryOp::Plus.apply(Number::Float(f64::MAX), Number::Float(f64::MAX)),
        Err(SemanticErrorKind::FloatOverflow { op: "+".to_string() })
    );
}

#[test]
fn test_declare_once() {
    let mut table = SymbolTable::new();
    table.declare("x", PrimitiveType::Int, 1).unwrap();

    let err = table.declare("x", PrimitiveType::Float, 4).unwrap_err();
    assert_eq!(
        err,
        SemanticErrorKind::DuplicateDeclaration {
            name: "x".to_string(),
            prev_line: 1
        }
    );
    assert_eq!(table.iter().count(), 1);
    assert_eq!(table.get("x").unwrap().ty, PrimitiveType::Int);
}

#[test]
fn test_undeclared_lookup() {
    let table = SymbolTable::new();
    assert_eq!(
        table.get("y").unwrap_err(),
        SemanticErrorKind::UndeclaredVariable("y".to_string())
    );
}

#[test]
fn test_array_storage() {
    let mut table = SymbolTable::new();
    table
        .declare("a", PrimitiveType::Float, 2)
        .unwrap()
        .make_array(3);

    let a = table.get("a").unwrap();
    assert_eq!(a.storage, Storage::Array(vec![Number::Float(0.0); 3]));

    let place = a.element_place(1).unwrap();
    table.store(&place, Number::Float(2.5)).unwrap();
    assert_eq!(table.load(&place), Ok(Number::Float(2.5)));
    assert_eq!(
        table.load(&LValue::Element("a".to_string(), 0)),
        Ok(Number::Float(0.0))
    );

    let a = table.get("a").unwrap();
    assert!(matches!(
        a.element_place(3),
        Err(SemanticErrorKind::IndexOutOfBounds { index: 3, size: 3, .. })
    ));
    assert!(matches!(
        a.element_place(-1),
        Err(SemanticErrorKind::IndexOutOfBounds { index: -1, .. })
    ));
}

#[test]
fn test_scalar_is_not_an_array() {
    let mut table = SymbolTable::new();
    table.declare("x", PrimitiveType::Int, 7).unwrap();

    assert_eq!(
        table.get("x").unwrap().element_place(0),
        Err(SemanticErrorKind::NotAnArray {
            name: "x".to_string(),
            decl_line: 7
        })
    );
}

#[test]
fn test_store_checks_type() {
    let mut table = SymbolTable::new();
    table.declare("x", PrimitiveType::Int, 1).unwrap();

    let place = LValue::Scalar("x".to_string());
    assert!(matches!(
        table.store(&place, Number::Float(1.0)),
        Err(SemanticErrorKind::TypeMismatch { .. })
    ));
    table.store(&place, Number::Int(9)).unwrap();
    assert_eq!(table.load(&place), Ok(Number::Int(9)));
}

#[test]
fn test_iteration_follows_declaration_order() {
    let mut table = SymbolTable::new();
    for name in ["zeta", "alpha", "mid"] {
        table.declare(name, PrimitiveType::Int, 1).unwrap();
    }
    let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}
