//! Reduction domains and commutative reducers.
//!
//! `sum`/`prod`/`min`/`max` each assemble a [`CommReducer`] -- a binary
//! combiner function paired with its identity element -- and wrap it in a
//! `Reduce` node over the given domain. The reduction axis is always index 0
//! and `value_index` is always 0: this layer only ever builds single-value
//! reductions, never the multi-value form used for e.g. argmax.

use crate::arith;
use crate::error::IrError;
use crate::expr::{make_one, make_zero, Expr, ExprKind};
use crate::fold::bool_imm;
use crate::types::{ConstBits, Type};

/// A named, typed variable -- used only as the two bound arguments of a
/// [`CommReducer`] in this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: String,
    pub ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Var { name: name.into(), ty }
    }

    pub fn to_expr(&self) -> Expr {
        Expr::new(ExprKind::Var { ty: self.ty, name: self.name.clone() })
    }
}

/// A half-open iteration range `[min, min + extent)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub min: Expr,
    pub extent: Expr,
}

/// One axis of a reduction domain: a bound variable ranging over `dom`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterVar {
    pub var: Var,
    pub dom: Range,
}

/// A commutative-associative binary operation paired with its identity
/// element, used to build `Reduce` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct CommReducer {
    pub lhs: Var,
    pub rhs: Var,
    pub result: Expr,
    pub identity_element: Expr,
}

/// The node `sum`/`prod`/`min`/`max` construct: a reduction of `source` over
/// `axis`, accumulated via `combiner`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceNode {
    pub ty: Type,
    pub combiner: CommReducer,
    pub source: Expr,
    pub axis: Vec<IterVar>,
    pub condition: Expr,
    pub value_index: u32,
}

fn typed_extremal(ty: Type, bits: ConstBits) -> Expr {
    match bits {
        ConstBits::Int(v) => crate::expr::make_const_i64(ty, v),
        ConstBits::UInt(v) => crate::expr::make_const_u64(ty, v),
        ConstBits::Float(v) => crate::expr::make_const_f64(ty, v),
    }
}

fn make_reducer(
    ty: Type,
    identity: Expr,
    combine: impl FnOnce(Expr, Expr) -> Result<Expr, IrError>,
) -> Result<CommReducer, IrError> {
    let lhs = Var::new("x", ty);
    let rhs = Var::new("y", ty);
    let result = combine(lhs.to_expr(), rhs.to_expr())?;
    Ok(CommReducer { lhs, rhs, result, identity_element: identity })
}

fn build(src: Expr, axis: Vec<IterVar>, combiner: CommReducer) -> Expr {
    let ty = src.ty();
    Expr::new(ExprKind::Reduce(ReduceNode {
        ty,
        combiner,
        source: src,
        axis,
        condition: bool_imm(true),
        value_index: 0,
    }))
}

/// `sum(src, rdom)`: identity is the zero of `src`'s type, body is `x + y`.
pub fn sum(src: Expr, rdom: Vec<IterVar>) -> Result<Expr, IrError> {
    let ty = src.ty();
    let identity = make_zero(ty);
    let combiner = make_reducer(ty, identity, |x, y| arith::add(x, y))?;
    Ok(build(src, rdom, combiner))
}

/// `prod(src, rdom)`: identity is the one of `src`'s type, body is `x * y`.
pub fn prod(src: Expr, rdom: Vec<IterVar>) -> Result<Expr, IrError> {
    let ty = src.ty();
    let identity = make_one(ty);
    let combiner = make_reducer(ty, identity, |x, y| arith::mul(x, y))?;
    Ok(build(src, rdom, combiner))
}

/// `max(src, rdom)`: identity is `T.min()` (the smallest value of `T`), body
/// is `max(x, y)`.
pub fn max(src: Expr, rdom: Vec<IterVar>) -> Result<Expr, IrError> {
    let ty = src.ty();
    let identity = typed_extremal(ty, ty.min_value());
    let combiner = make_reducer(ty, identity, |x, y| arith::max(x, y))?;
    Ok(build(src, rdom, combiner))
}

/// `min(src, rdom)`: identity is `T.max()` (the largest value of `T`), body
/// is `min(x, y)`.
pub fn min(src: Expr, rdom: Vec<IterVar>) -> Result<Expr, IrError> {
    let ty = src.ty();
    let identity = typed_extremal(ty, ty.max_value());
    let combiner = make_reducer(ty, identity, |x, y| arith::min(x, y))?;
    Ok(build(src, rdom, combiner))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_domain() -> Vec<IterVar> {
        Vec::new()
    }

    #[test]
    fn sum_identity_is_zero_of_source_type() {
        let src = Var::new("v", Type::float(32, 1)).to_expr();
        let reduced = sum(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(
                    r.combiner.identity_element.as_float_imm(),
                    Some((Type::float(32, 1), 0.0))
                );
                assert!(r.axis.is_empty());
                assert_eq!(r.value_index, 0);
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }

    #[test]
    fn prod_identity_is_one_of_source_type() {
        let src = Var::new("v", Type::int(32, 1)).to_expr();
        let reduced = prod(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(r.combiner.identity_element.as_int_imm(), Some((Type::int(32, 1), 1)));
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }

    #[test]
    fn max_identity_is_type_min() {
        let src = Var::new("v", Type::int(32, 1)).to_expr();
        let reduced = max(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(
                    r.combiner.identity_element.as_int_imm(),
                    Some((Type::int(32, 1), i32::MIN as i64))
                );
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }

    #[test]
    fn min_identity_is_type_max() {
        let src = Var::new("v", Type::int(32, 1)).to_expr();
        let reduced = min(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(
                    r.combiner.identity_element.as_int_imm(),
                    Some((Type::int(32, 1), i32::MAX as i64))
                );
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }

    #[test]
    fn reducer_body_uses_two_fresh_bound_variables() {
        let src = Var::new("v", Type::int(32, 1)).to_expr();
        let reduced = sum(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(r.combiner.lhs.name, "x");
                assert_eq!(r.combiner.rhs.name, "y");
                assert!(matches!(r.combiner.result.kind(), ExprKind::Add(_)));
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }

    #[test]
    fn reduction_predicate_is_literal_true() {
        let src = Var::new("v", Type::int(32, 1)).to_expr();
        let reduced = sum(src, empty_domain()).unwrap();
        match reduced.kind() {
            ExprKind::Reduce(r) => {
                assert_eq!(r.condition.as_uint_imm(), Some((Type::bool_(1), 1)));
            }
            other => panic!("expected Reduce, got {other:?}"),
        }
    }
}
