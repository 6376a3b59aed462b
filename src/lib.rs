//! An expression-construction layer for a tensor compiler's IR: smart
//! constructors that unify operand types, fold constants and identities at
//! build time, and emit either a dedicated node or a pure intrinsic call.
//!
//! This layer is pure, synchronous, and holds no state between calls --
//! every builder is a plain function from operands to a `Result<Expr,
//! IrError>`. There is no scheduler, no lowering pass, and no code
//! generation here; those are downstream concerns.

pub mod arith;
pub mod bitwise;
pub mod cmp;
pub mod error;
pub mod expr;
mod fold;
pub mod intrinsics;
pub mod logic;
pub mod reduce;
pub mod types;
pub mod unify;

pub use arith::{add, div, max, min, mod_, mul, neg, sub};
pub use bitwise::{bit_and, bit_not, bit_or, bit_xor, shl, shr};
pub use cmp::{eq, ge, gt, le, lt, ne};
pub use error::IrError;
pub use expr::{make_const_f64, make_const_i64, make_const_u64, make_one, make_zero, BinArgs, Call, CallKind, Expr, ExprKind};
pub use intrinsics::{abs, ceil, floor, fmod, if_then_else, likely, pow, round, trunc};
pub use logic::{and_, not_, or_};
pub use reduce::{prod, sum, CommReducer, IterVar, Range, ReduceNode, Var};
pub use types::{ConstBits, Type, TypeCode};
pub use unify::{cast, match_binary_types, reinterpret};

// `reduce::min`/`reduce::max` are intentionally not re-exported flat: they'd
// collide with `arith::min`/`arith::max`. Reach them via `reduce::min`/
// `reduce::max` directly.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_small_expression_builds_end_to_end() {
        let x = Expr::new(ExprKind::Var { ty: Type::int(32, 1), name: "x".into() });
        let y = Expr::new(ExprKind::Var { ty: Type::int(32, 1), name: "y".into() });
        let sum = add(x, y).unwrap();
        let doubled = mul(sum, make_const_i64(Type::int(32, 1), 2)).unwrap();
        assert_eq!(doubled.ty(), Type::int(32, 1));
    }

    #[test]
    fn reduce_min_and_max_stay_reachable_only_through_their_module_path() {
        let src = Expr::new(ExprKind::Var { ty: Type::int(32, 1), name: "v".into() });
        let reduced = reduce::sum(src.clone(), Vec::new()).unwrap();
        assert!(matches!(reduced.kind(), ExprKind::Reduce(_)));
        let reduced_min = reduce::min(src, Vec::new()).unwrap();
        assert!(matches!(reduced_min.kind(), ExprKind::Reduce(_)));
    }
}
