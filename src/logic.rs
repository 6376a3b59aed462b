//! Boolean builders: `&& || !`.
//!
//! Operands must already be `bool`-typed -- there is no separate node
//! constructor downstream to defer validation to, so these builders reject
//! a non-bool operand themselves rather than building a node that would
//! only fail later.

use crate::error::IrError;
use crate::expr::{BinArgs, Expr, ExprKind};
use crate::fold::{as_bool_const, bool_imm, require_bool};

/// `a && b`. Short-circuits on a constant `false` left operand; otherwise
/// folds when both sides are constant, drops a constant `true` left
/// operand, and otherwise builds an `And` node.
pub fn and_(a: Expr, b: Expr) -> Result<Expr, IrError> {
    require_bool(&a, "and")?;
    require_bool(&b, "and")?;
    if let Some(false) = as_bool_const(&a) {
        return Ok(bool_imm(false));
    }
    if let (Some(x), Some(y)) = (as_bool_const(&a), as_bool_const(&b)) {
        return Ok(bool_imm(x && y));
    }
    if let Some(true) = as_bool_const(&a) {
        return Ok(b);
    }
    if let Some(true) = as_bool_const(&b) {
        return Ok(a);
    }
    let ty = a.ty();
    Ok(Expr::new(ExprKind::And(BinArgs { ty, lhs: a, rhs: b })))
}

/// `a || b`. Short-circuits on a constant `true` left operand; otherwise
/// folds when both sides are constant, drops a constant `false` left
/// operand, and otherwise builds an `Or` node.
pub fn or_(a: Expr, b: Expr) -> Result<Expr, IrError> {
    require_bool(&a, "or")?;
    require_bool(&b, "or")?;
    if let Some(true) = as_bool_const(&a) {
        return Ok(bool_imm(true));
    }
    if let (Some(x), Some(y)) = (as_bool_const(&a), as_bool_const(&b)) {
        return Ok(bool_imm(x || y));
    }
    if let Some(false) = as_bool_const(&a) {
        return Ok(b);
    }
    if let Some(false) = as_bool_const(&b) {
        return Ok(a);
    }
    let ty = a.ty();
    Ok(Expr::new(ExprKind::Or(BinArgs { ty, lhs: a, rhs: b })))
}

/// `!a`. Folds a constant operand; builds `Not` otherwise.
pub fn not_(a: Expr) -> Result<Expr, IrError> {
    require_bool(&a, "not")?;
    if let Some(x) = as_bool_const(&a) {
        return Ok(bool_imm(!x));
    }
    let ty = a.ty();
    Ok(Expr::new(ExprKind::Not { ty, value: a }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn var_bool(name: &str) -> Expr {
        Expr::new(ExprKind::Var { ty: Type::bool_(1), name: name.into() })
    }

    #[test]
    fn and_short_circuits_false_left() {
        let x = var_bool("x");
        let out = and_(bool_imm(false), x).unwrap();
        assert_eq!(as_bool_const(&out), Some(false));
    }

    #[test]
    fn and_drops_true_left_identity() {
        let x = var_bool("x");
        let out = and_(bool_imm(true), x.clone()).unwrap();
        assert_eq!(out, x);
    }

    #[test]
    fn and_folds_two_constants() {
        let out = and_(bool_imm(true), bool_imm(false)).unwrap();
        assert_eq!(as_bool_const(&out), Some(false));
    }

    #[test]
    fn or_short_circuits_true_left() {
        let x = var_bool("x");
        let out = or_(bool_imm(true), x).unwrap();
        assert_eq!(as_bool_const(&out), Some(true));
    }

    #[test]
    fn or_drops_false_left_identity() {
        let x = var_bool("x");
        let out = or_(bool_imm(false), x.clone()).unwrap();
        assert_eq!(out, x);
    }

    #[test]
    fn not_folds_constant() {
        assert_eq!(as_bool_const(&not_(bool_imm(true)).unwrap()), Some(false));
    }

    #[test]
    fn not_builds_node_for_non_const() {
        let x = var_bool("x");
        let out = not_(x).unwrap();
        assert!(matches!(out.kind(), ExprKind::Not { .. }));
    }

    #[test]
    fn non_bool_operand_is_fatal() {
        let i = crate::expr::make_const_i64(Type::int(32, 1), 1);
        let err = and_(i, bool_imm(true)).unwrap_err();
        assert!(matches!(err, IrError::InvalidOperand { op: "and", .. }));
    }
}
