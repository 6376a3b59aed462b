//! Bitwise and shift builders: `& | ^ ~ << >>`.
//!
//! None of these have a dedicated IR node -- every one bottoms out in a
//! pure intrinsic [`Call`](crate::expr::Call). The only folding they ever do
//! is the index-type fast path: both operands are scalar 32/64-bit signed
//! ints (any mix of widths), where this layer widens to the wider width,
//! folds immediates and a handful of identities, and otherwise falls back
//! to the call. Outside that fast path, operands are unified (no folding)
//! and handed to the call typed as the unified operand type.

use crate::error::IrError;
use crate::expr::Expr;
use crate::fold::{is_zero_imm, narrow_int, pure_call, wider_int_type};
use crate::types::Type;
use crate::unify::{cast, match_binary_types};

fn bitwise_binary(
    a: Expr,
    b: Expr,
    name: &'static str,
    ifold: fn(i64, i64) -> i64,
) -> Result<Expr, IrError> {
    if a.ty().is_index_type() && b.ty().is_index_type() {
        let ty = wider_int_type(a.ty(), b.ty());
        let a = cast(ty, a)?;
        let b = cast(ty, b)?;
        if let (Some((_, x)), Some((_, y))) = (a.as_int_imm(), b.as_int_imm()) {
            return Ok(crate::expr::make_const_i64(ty, ifold(x, y)));
        }
        return Ok(pure_call(ty, name, smallvec::smallvec![a, b]));
    }
    let (a, b) = match_binary_types(a, b)?;
    let ty = a.ty();
    Ok(pure_call(ty, name, smallvec::smallvec![a, b]))
}

/// `a & b`.
pub fn bit_and(a: Expr, b: Expr) -> Result<Expr, IrError> {
    bitwise_binary(a, b, "bitwise_and", |x, y| x & y)
}

/// `a | b`.
pub fn bit_or(a: Expr, b: Expr) -> Result<Expr, IrError> {
    bitwise_binary(a, b, "bitwise_or", |x, y| x | y)
}

/// `a ^ b`.
pub fn bit_xor(a: Expr, b: Expr) -> Result<Expr, IrError> {
    bitwise_binary(a, b, "bitwise_xor", |x, y| x ^ y)
}

/// `~a`. Folds an index-typed immediate directly; otherwise a pure
/// `bitwise_not` call. Fatal on a non-integral operand.
pub fn bit_not(a: Expr) -> Result<Expr, IrError> {
    if !(a.ty().is_int() || a.ty().is_uint()) {
        return Err(IrError::InvalidOperand { op: "bitwise_not", ty: a.ty() });
    }
    if a.ty().is_index_type() {
        if let Some((ty, x)) = a.as_int_imm() {
            return Ok(crate::expr::make_const_i64(ty, !x));
        }
    }
    let ty = a.ty();
    Ok(pure_call(ty, "bitwise_not", smallvec::smallvec![a]))
}

fn shift_op(
    a: Expr,
    b: Expr,
    name: &'static str,
    ifold: fn(i64, i64) -> i64,
) -> Result<Expr, IrError> {
    if a.ty().is_index_type() && b.ty().is_index_type() {
        let ty = wider_int_type(a.ty(), b.ty());
        let a = cast(ty, a)?;
        let b = cast(ty, b)?;
        if is_zero_imm(&b) {
            return Ok(a);
        }
        if let (Some((_, x)), Some((_, y))) = (a.as_int_imm(), b.as_int_imm()) {
            if y >= 0 {
                return Ok(crate::expr::make_const_i64(ty, narrow_int(ty.bits, ifold(x, y))));
            }
        }
        return Ok(pure_call(ty, name, smallvec::smallvec![a, b]));
    }
    let (a, b) = match_binary_types(a, b)?;
    let ty = a.ty();
    Ok(pure_call(ty, name, smallvec::smallvec![a, b]))
}

/// `a << b`.
pub fn shl(a: Expr, b: Expr) -> Result<Expr, IrError> {
    shift_op(a, b, "shift_left", |x, y| x.wrapping_shl(y as u32))
}

/// `a >> b`. A single arithmetic right shift -- this layer names one `>>`
/// operator, not the logical/arithmetic pair a lowering pass might later
/// distinguish.
pub fn shr(a: Expr, b: Expr) -> Result<Expr, IrError> {
    shift_op(a, b, "shift_right", |x, y| x.wrapping_shr(y as u32))
}
