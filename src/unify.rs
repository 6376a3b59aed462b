//! Type unification, cast, and reinterpret.
//!
//! `match_binary_types` is the one routine every binary builder runs first:
//! bring two operands to a common type via lane broadcast then element-type
//! promotion. `cast` and `reinterpret` are its building blocks but are also
//! exposed directly, since they're named builders in their own right.

use smallvec::smallvec;

use crate::error::IrError;
use crate::expr::{Expr, ExprKind};
use crate::fold::{broadcast, pure_call};
use crate::types::Type;

/// Brings two operand expressions to a single common type: lane broadcast
/// first, then element-type promotion. Fails if lane counts disagree with
/// neither side scalar, or if no valid element-type promotion exists.
pub fn match_binary_types(a: Expr, b: Expr) -> Result<(Expr, Expr), IrError> {
    if a.ty() == b.ty() {
        return Ok((a, b));
    }
    let (a, b) = broadcast_lanes(a, b)?;
    promote_element_type(a, b)
}

fn broadcast_lanes(a: Expr, b: Expr) -> Result<(Expr, Expr), IrError> {
    let (la, lb) = (a.ty().lanes, b.ty().lanes);
    if la == lb {
        return Ok((a, b));
    }
    if la == 1 {
        let lanes = lb;
        Ok((broadcast(lanes, a), b))
    } else if lb == 1 {
        let lanes = la;
        Ok((a, broadcast(lanes, b)))
    } else {
        Err(IrError::TypeMismatch { lhs: a.ty(), rhs: b.ty() })
    }
}

fn promote_element_type(a: Expr, b: Expr) -> Result<(Expr, Expr), IrError> {
    let (ta, tb) = (a.ty(), b.ty());
    if ta == tb {
        return Ok((a, b));
    }
    if ta.is_float() && !tb.is_float() {
        return Ok((a, cast(ta, b)?));
    }
    if tb.is_float() && !ta.is_float() {
        return Ok((cast(tb, a)?, b));
    }
    if (ta.is_int() && tb.is_int()) || (ta.is_uint() && tb.is_uint()) {
        let t = if ta.bits >= tb.bits { ta } else { tb };
        return Ok((cast(t, a)?, cast(t, b)?));
    }
    if (ta.is_int() && tb.is_uint()) || (ta.is_uint() && tb.is_int()) {
        let t = Type::int(ta.bits.max(tb.bits), ta.lanes);
        return Ok((cast(t, a)?, cast(t, b)?));
    }
    Err(IrError::TypeMismatch { lhs: ta, rhs: tb })
}

/// Casts `value` to type `t`. Scalar targets fold immediates directly;
/// vector targets with a scalar input cast the scalar then broadcast; vector
/// targets with a mismatched vector input are a fatal lane-count error.
pub fn cast(t: Type, value: Expr) -> Result<Expr, IrError> {
    if value.ty() == t {
        return Ok(value);
    }
    if t.lanes == 1 {
        return Ok(cast_scalar(t, value));
    }
    if value.ty().lanes == 1 {
        let scalar = cast_scalar(t.element_of(), value);
        return Ok(broadcast(t.lanes, scalar));
    }
    if value.ty().lanes != t.lanes {
        return Err(IrError::TypeMismatch { lhs: value.ty(), rhs: t });
    }
    Ok(Expr::new(ExprKind::Cast { ty: t, value }))
}

fn cast_scalar(t: Type, value: Expr) -> Expr {
    if let Some((_, v)) = value.as_int_imm() {
        return crate::expr::make_const_i64(t, v);
    }
    if let Some((_, v)) = value.as_uint_imm() {
        return crate::expr::make_const_u64(t, v);
    }
    if let Some((_, v)) = value.as_float_imm() {
        return crate::expr::make_const_f64(t, v);
    }
    Expr::new(ExprKind::Cast { ty: t, value })
}

/// A bit reinterpretation rather than a value-preserving conversion: a no-op
/// when types already match, otherwise a pure `reinterpret` intrinsic call.
/// Never folds -- an immediate's bit representation is not reconstructed
/// here.
pub fn reinterpret(t: Type, value: Expr) -> Expr {
    if value.ty() == t {
        return value;
    }
    pure_call(t, "reinterpret", smallvec![value])
}
