//! Shared plumbing for the builder modules.
//!
//! Every binary builder in `arith`/`cmp` starts with the same preamble:
//! unify operand types, then look at whether both sides are the same kind of
//! immediate. [`BinaryImmediates`] is that preamble's shared inline routine
//! (see the source's macro-driven rule sharing, reworked here as a plain
//! struct instead of a textual macro), and the handful of small free
//! functions below are the other bits every builder needs at least once.

use smallvec::SmallVec;

use crate::error::IrError;
use crate::expr::{Call, CallKind, Expr, ExprKind};
use crate::types::Type;
use crate::unify::cast;

/// Both operands' immediate views, extracted once per builder call.
pub(crate) struct BinaryImmediates {
    pub both_int: Option<(i64, i64)>,
    pub both_float: Option<(f64, f64)>,
}

impl BinaryImmediates {
    pub fn extract(a: &Expr, b: &Expr) -> Self {
        let both_int = match (a.as_int_imm(), b.as_int_imm()) {
            (Some((_, x)), Some((_, y))) => Some((x, y)),
            _ => None,
        };
        let both_float = match (a.as_float_imm(), b.as_float_imm()) {
            (Some((_, x)), Some((_, y))) => Some((x, y)),
            _ => None,
        };
        BinaryImmediates { both_int, both_float }
    }
}

/// `true` for a literal `IntImm(0)` or `FloatImm(0.0)` -- the identity-rule
/// zero test. Deliberately does not match `UIntImm(0)`; spec'd identity rules
/// only ever name `IntImm`/`FloatImm` zeros.
pub(crate) fn is_zero_imm(e: &Expr) -> bool {
    match e.kind() {
        ExprKind::IntImm { value, .. } => *value == 0,
        ExprKind::FloatImm { value, .. } => *value == 0.0,
        _ => false,
    }
}

/// `true` for a literal `IntImm(1)` or `FloatImm(1.0)`.
pub(crate) fn is_one_imm(e: &Expr) -> bool {
    match e.kind() {
        ExprKind::IntImm { value, .. } => *value == 1,
        ExprKind::FloatImm { value, .. } => *value == 1.0,
        _ => false,
    }
}

/// Fatal if `b` is a literal zero of any immediate kind -- `/` and `%` both
/// check this before attempting to fold.
pub(crate) fn check_literal_zero_divisor(b: &Expr, op: &'static str) -> Result<(), IrError> {
    let is_zero = match b.kind() {
        ExprKind::IntImm { value, .. } => *value == 0,
        ExprKind::UIntImm { value, .. } => *value == 0,
        ExprKind::FloatImm { value, .. } => *value == 0.0,
        _ => false,
    };
    if is_zero {
        Err(IrError::DivisionByZero { op })
    } else {
        Ok(())
    }
}

/// An identity-rule result must end up at `rtype`; this is a no-op when it
/// already does (the common case, since unification already brought both
/// operands to `rtype` before the identity check ran).
pub(crate) fn simple_cast(rtype: Type, e: Expr) -> Result<Expr, IrError> {
    if e.ty() == rtype {
        Ok(e)
    } else {
        cast(rtype, e)
    }
}

/// Wraps a scalar expression in a `Broadcast` of the given lane count.
pub(crate) fn broadcast(lanes: u32, value: Expr) -> Expr {
    let ty = value.ty().with_lanes(lanes);
    Expr::new(ExprKind::Broadcast { ty, value, lanes })
}

/// The wider of two integer types' bit widths, keeping the lane count of `a`
/// -- used by the bitwise/shift index-type fast path's promotion rule.
pub(crate) fn wider_int_type(a: Type, b: Type) -> Type {
    Type::int(a.bits.max(b.bits), a.lanes)
}

/// Normalizes a folded `i64` value down to `bits`-wide two's complement --
/// a folded shift can otherwise carry a value outside its stated type's
/// range (e.g. `1i32 << 31` computed in `i64` arithmetic).
pub(crate) fn narrow_int(bits: u8, value: i64) -> i64 {
    if bits >= 64 {
        return value;
    }
    let bits = bits as u32;
    let mask = (1i64 << bits) - 1;
    let v = value & mask;
    let sign_bit = 1i64 << (bits - 1);
    if v & sign_bit != 0 {
        v - (1i64 << bits)
    } else {
        v
    }
}

pub(crate) fn pure_call(ty: Type, name: &'static str, args: SmallVec<[Expr; 4]>) -> Expr {
    Expr::new(ExprKind::Call(Call {
        ty,
        name: name.to_string(),
        args,
        kind: CallKind::PureIntrinsic,
    }))
}

pub(crate) fn bool_imm(value: bool) -> Expr {
    Expr::new(ExprKind::UIntImm { ty: Type::bool_(1), value: value as u64 })
}

pub(crate) fn as_bool_const(e: &Expr) -> Option<bool> {
    match e.kind() {
        ExprKind::UIntImm { ty, value } if ty.is_bool() => Some(*value != 0),
        _ => None,
    }
}

pub(crate) fn require_bool(e: &Expr, op: &'static str) -> Result<(), IrError> {
    if e.ty().is_bool() {
        Ok(())
    } else {
        Err(IrError::InvalidOperand { op, ty: e.ty() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::make_const_i64;

    #[test]
    fn binary_immediates_extracts_both_int() {
        let a = make_const_i64(Type::int(32, 1), 2);
        let b = make_const_i64(Type::int(32, 1), 3);
        let views = BinaryImmediates::extract(&a, &b);
        assert_eq!(views.both_int, Some((2, 3)));
        assert_eq!(views.both_float, None);
    }

    #[test]
    fn binary_immediates_none_when_one_side_is_not_const() {
        let a = make_const_i64(Type::int(32, 1), 2);
        let b = Expr::new(ExprKind::Var { ty: Type::int(32, 1), name: "x".into() });
        let views = BinaryImmediates::extract(&a, &b);
        assert_eq!(views.both_int, None);
    }

    #[test]
    fn zero_and_one_checks_ignore_uint() {
        let zero_uint = crate::expr::make_const_u64(Type::uint(32, 1), 0);
        assert!(!is_zero_imm(&zero_uint));
        let zero_int = make_const_i64(Type::int(32, 1), 0);
        assert!(is_zero_imm(&zero_int));
    }

    #[test]
    fn zero_divisor_check_covers_all_three_immediate_kinds() {
        assert!(check_literal_zero_divisor(&make_const_i64(Type::int(32, 1), 0), "div").is_err());
        assert!(
            check_literal_zero_divisor(&crate::expr::make_const_u64(Type::uint(32, 1), 0), "div")
                .is_err()
        );
        assert!(check_literal_zero_divisor(
            &crate::expr::make_const_f64(Type::float(32, 1), 0.0),
            "div"
        )
        .is_err());
        assert!(check_literal_zero_divisor(&make_const_i64(Type::int(32, 1), 1), "div").is_ok());
    }

    #[test]
    fn narrow_int_wraps_to_the_stated_width() {
        assert_eq!(narrow_int(32, 1i64 << 31), -(1i64 << 31));
        assert_eq!(narrow_int(32, 16), 16);
        assert_eq!(narrow_int(64, i64::MAX), i64::MAX);
    }

    #[test]
    fn bool_const_roundtrip() {
        let t = bool_imm(true);
        assert_eq!(as_bool_const(&t), Some(true));
        let non_bool = make_const_i64(Type::int(32, 1), 1);
        assert_eq!(as_bool_const(&non_bool), None);
    }
}
