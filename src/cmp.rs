//! Comparison builders: `> >= < <= == !=`.
//!
//! All six share one shape -- unify operands to a common type, fold if both
//! sides are the same immediate kind, otherwise build the node -- so
//! [`compare`] is the one routine behind every public name here.

use crate::error::IrError;
use crate::expr::{BinArgs, Expr, ExprKind};
use crate::fold::{bool_imm, BinaryImmediates};
use crate::types::Type;
use crate::unify::match_binary_types;

fn compare(
    a: Expr,
    b: Expr,
    ifold: fn(i64, i64) -> bool,
    ffold: fn(f64, f64) -> bool,
    build: fn(BinArgs) -> ExprKind,
) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let bool_ty = Type::bool_(a.ty().lanes);
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(bool_imm(ifold(x, y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(bool_imm(ffold(x, y)));
    }
    Ok(Expr::new(build(BinArgs { ty: bool_ty, lhs: a, rhs: b })))
}

/// `a > b`.
pub fn gt(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x > y, |x, y| x > y, ExprKind::GT)
}

/// `a >= b`.
pub fn ge(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x >= y, |x, y| x >= y, ExprKind::GE)
}

/// `a < b`.
pub fn lt(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x < y, |x, y| x < y, ExprKind::LT)
}

/// `a <= b`.
pub fn le(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x <= y, |x, y| x <= y, ExprKind::LE)
}

/// `a == b`.
pub fn eq(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x == y, |x, y| x == y, ExprKind::EQ)
}

/// `a != b`.
pub fn ne(a: Expr, b: Expr) -> Result<Expr, IrError> {
    compare(a, b, |x, y| x != y, |x, y| x != y, ExprKind::NE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::make_const_i64;
    use crate::types::Type;

    fn var(ty: Type, name: &str) -> Expr {
        Expr::new(ExprKind::Var { ty, name: name.into() })
    }

    #[test]
    fn gt_folds_int_constants() {
        let out = gt(make_const_i64(Type::int(32, 1), 5), make_const_i64(Type::int(32, 1), 3)).unwrap();
        assert_eq!(out.as_uint_imm(), Some((Type::bool_(1), 1)));
    }

    #[test]
    fn lt_folds_false_case() {
        let out = lt(make_const_i64(Type::int(32, 1), 5), make_const_i64(Type::int(32, 1), 3)).unwrap();
        assert_eq!(out.as_uint_imm(), Some((Type::bool_(1), 0)));
    }

    #[test]
    fn eq_ne_are_complementary_on_constants() {
        let a = make_const_i64(Type::int(32, 1), 4);
        let b = make_const_i64(Type::int(32, 1), 4);
        assert_eq!(eq(a.clone(), b.clone()).unwrap().as_uint_imm(), Some((Type::bool_(1), 1)));
        assert_eq!(ne(a, b).unwrap().as_uint_imm(), Some((Type::bool_(1), 0)));
    }

    #[test]
    fn comparison_on_non_const_builds_a_bool_typed_node() {
        let x = var(Type::int(32, 1), "x");
        let y = var(Type::int(32, 1), "y");
        let out = ge(x, y).unwrap();
        assert_eq!(out.ty(), Type::bool_(1));
        assert!(matches!(out.kind(), ExprKind::GE(_)));
    }

    #[test]
    fn comparison_result_broadcasts_lanes_with_operands() {
        let x = var(Type::int(32, 4), "x");
        let y = var(Type::int(32, 4), "y");
        let out = le(x, y).unwrap();
        assert_eq!(out.ty(), Type::bool_(4));
    }

    #[test]
    fn float_comparison_folds() {
        let a = crate::expr::make_const_f64(Type::float(32, 1), 1.5);
        let b = crate::expr::make_const_f64(Type::float(32, 1), 2.5);
        assert_eq!(lt(a, b).unwrap().as_uint_imm(), Some((Type::bool_(1), 1)));
    }
}
