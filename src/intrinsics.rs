//! Pure numeric intrinsics with no dedicated IR node: `pow`, `fmod`, the
//! rounding family, `abs`, `tvm_if_then_else`, and `likely`.

use crate::error::IrError;
use crate::expr::{Expr, ExprKind};
use crate::fold::pure_call;
use crate::types::Type;
use crate::unify::match_binary_types;

fn require_float(e: &Expr, op: &'static str) -> Result<(), IrError> {
    if e.ty().is_float() {
        Ok(())
    } else {
        Err(IrError::InvalidOperand { op, ty: e.ty() })
    }
}

/// `pow(a, b)`. Unifies operand types first, then requires the unified type
/// be float; never folds (matching exponentiation's platform-dependent
/// rounding, this layer always defers it to runtime).
pub fn pow(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    require_float(&a, "pow")?;
    let ty = a.ty();
    Ok(pure_call(ty, "pow", smallvec::smallvec![a, b]))
}

/// `fmod(a, b)`. Unifies operand types first, then requires the unified
/// type be float; never folds.
pub fn fmod(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    require_float(&a, "fmod")?;
    let ty = a.ty();
    Ok(pure_call(ty, "fmod", smallvec::smallvec![a, b]))
}

fn float_unary(a: Expr, name: &'static str, ffold: fn(f64) -> f64) -> Result<Expr, IrError> {
    require_float(&a, name)?;
    if let Some((ty, v)) = a.as_float_imm() {
        return Ok(crate::expr::make_const_f64(ty, ffold(v)));
    }
    let ty = a.ty();
    Ok(pure_call(ty, name, smallvec::smallvec![a]))
}

/// `floor(a)`.
pub fn floor(a: Expr) -> Result<Expr, IrError> {
    float_unary(a, "floor", f64::floor)
}

/// `ceil(a)`.
pub fn ceil(a: Expr) -> Result<Expr, IrError> {
    float_unary(a, "ceil", f64::ceil)
}

/// `round(a)`. Rounds half to even, not half away from zero.
pub fn round(a: Expr) -> Result<Expr, IrError> {
    float_unary(a, "round", f64::round_ties_even)
}

/// `trunc(a)`. Rounds toward zero.
pub fn trunc(a: Expr) -> Result<Expr, IrError> {
    float_unary(a, "trunc", |v| if v < 0.0 { v.ceil() } else { v.floor() })
}

/// `abs(a)`. `uint` operands pass through unchanged (already non-negative);
/// `int`/`float` fold on an immediate or build the appropriate form;
/// anything else is a fatal invalid-operand error.
pub fn abs(a: Expr) -> Result<Expr, IrError> {
    if a.ty().is_uint() {
        return Ok(a);
    }
    if a.ty().is_int() {
        if let Some((ty, v)) = a.as_int_imm() {
            return Ok(crate::expr::make_const_i64(ty, v.wrapping_abs()));
        }
        let ty = a.ty();
        let zero = crate::expr::make_zero(ty);
        let cond = crate::cmp::ge(a.clone(), zero)?;
        let negated = crate::arith::neg(a.clone())?;
        return Ok(Expr::new(ExprKind::Select { ty, cond, t: a, f: negated }));
    }
    if a.ty().is_float() {
        if let Some((ty, v)) = a.as_float_imm() {
            return Ok(crate::expr::make_const_f64(ty, v.abs()));
        }
        let ty = a.ty();
        return Ok(pure_call(ty, "fabs", smallvec::smallvec![a]));
    }
    Err(IrError::InvalidOperand { op: "abs", ty: a.ty() })
}

/// `tvm_if_then_else(cond, t, f)`. `cond` must be a scalar bool; folds when
/// it is a literal, otherwise builds the named pure call (kept as a
/// literal-named intrinsic rather than a dedicated node, matching its
/// external functional contract).
pub fn if_then_else(cond: Expr, t: Expr, f: Expr) -> Result<Expr, IrError> {
    if !(cond.ty().is_bool() && cond.ty().lanes == 1) {
        return Err(IrError::ConditionNotBool1 { ty: cond.ty() });
    }
    let (t, f) = match_binary_types(t, f)?;
    let ty = t.ty();
    if let Some((_, v)) = cond.as_uint_imm() {
        return Ok(if v != 0 { t } else { f });
    }
    Ok(pure_call(ty, "tvm_if_then_else", smallvec::smallvec![cond, t, f]))
}

/// `likely(a)`. A scheduling hint; passes a constant straight through,
/// otherwise wraps it in the named pure call.
pub fn likely(a: Expr) -> Result<Expr, IrError> {
    if a.is_const() {
        return Ok(a);
    }
    let ty = a.ty();
    Ok(pure_call(ty, "likely", smallvec::smallvec![a]))
}
