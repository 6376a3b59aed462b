//! Arithmetic builders: `+ - * / %`, unary `-`, `min`, `max`.
//!
//! Every binary builder here runs the same skeleton: unify operand types,
//! extract immediate views, try the fold rules in order (first match wins),
//! and fall back to building the node. `%` is the deliberate exception --
//! see [`mod_`].

use crate::error::IrError;
use crate::expr::{make_zero, Expr, ExprKind};
use crate::fold::{
    check_literal_zero_divisor, is_one_imm, is_zero_imm, simple_cast, BinaryImmediates,
};
use crate::types::Type;
use crate::unify::match_binary_types;

/// `a + b`. Folds `IntImm`/`FloatImm` constants; `0 + b -> b` and `a + 0 ->
/// a` for both kinds.
pub fn add(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(crate::expr::make_const_i64(rtype, x.wrapping_add(y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(crate::expr::make_const_f64(rtype, x + y));
    }
    if is_zero_imm(&a) {
        return simple_cast(rtype, b);
    }
    if is_zero_imm(&b) {
        return simple_cast(rtype, a);
    }
    Ok(Expr::new(ExprKind::Add(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `-a`. Folds directly on an immediate; otherwise falls back to `0 - a`
/// (see [`sub`] for why this asymmetry with a `0 - b -> -b` rewrite in `sub`
/// is intentional: it prevents the two rules fighting each other forever).
pub fn neg(a: Expr) -> Result<Expr, IrError> {
    if let Some((ty, v)) = a.as_int_imm() {
        return Ok(crate::expr::make_const_i64(ty, v.wrapping_neg()));
    }
    if let Some((ty, v)) = a.as_float_imm() {
        return Ok(crate::expr::make_const_f64(ty, -v));
    }
    let ty = a.ty();
    sub(make_zero(ty), a)
}

/// `a - b`. Folds constants; `a - 0 -> a` only (deliberately no `0 - b ->
/// -b`, see [`neg`]).
pub fn sub(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(crate::expr::make_const_i64(rtype, x.wrapping_sub(y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(crate::expr::make_const_f64(rtype, x - y));
    }
    if is_zero_imm(&b) {
        return simple_cast(rtype, a);
    }
    Ok(Expr::new(ExprKind::Sub(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `a * b`. Folds constants; `1*b -> b`, `a*1 -> a`, `0*b -> 0`, `a*0 -> 0`.
pub fn mul(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(crate::expr::make_const_i64(rtype, x.wrapping_mul(y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(crate::expr::make_const_f64(rtype, x * y));
    }
    if is_one_imm(&a) {
        return simple_cast(rtype, b);
    }
    if is_one_imm(&b) {
        return simple_cast(rtype, a);
    }
    if is_zero_imm(&a) || is_zero_imm(&b) {
        return Ok(make_zero(rtype));
    }
    Ok(Expr::new(ExprKind::Mul(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `a / b`. Int folds only in the positive/positive quadrant (two's
/// complement rounding differs across targets; signed corner cases are
/// deferred to runtime lowering). Float folds whenever the divisor is
/// nonzero. `0/b -> 0`, `a/1 -> a`. A literal zero divisor is always fatal,
/// checked before any fold is attempted.
pub fn div(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    check_literal_zero_divisor(&b, "div")?;
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        if x >= 0 && y > 0 {
            return Ok(crate::expr::make_const_i64(rtype, x / y));
        }
    }
    if let Some((x, y)) = imms.both_float {
        if y != 0.0 {
            return Ok(crate::expr::make_const_f64(rtype, x / y));
        }
    }
    if is_zero_imm(&a) {
        return Ok(make_zero(rtype));
    }
    if is_one_imm(&b) {
        return simple_cast(rtype, a);
    }
    Ok(Expr::new(ExprKind::Div(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `a % b`. Deliberately does **not** go through full arithmetic
/// unification: the fold/identity path only ever fires when both operands
/// already share an index type (32/64-bit scalar signed int); anything else
/// falls through to ordinary unification and an unfolded `Mod` node. This
/// asymmetry with `/` is intentional (spec'd, not an oversight).
pub fn mod_(a: Expr, b: Expr) -> Result<Expr, IrError> {
    if a.ty().is_index_type() && b.ty() == a.ty() {
        let ty = a.ty();
        check_literal_zero_divisor(&b, "mod")?;
        if let (Some((_, x)), Some((_, y))) = (a.as_int_imm(), b.as_int_imm()) {
            if x >= 0 && y > 0 {
                return Ok(crate::expr::make_const_i64(ty, x % y));
            }
        }
        if is_one_imm(&b) {
            return Ok(make_zero(ty));
        }
        return Ok(Expr::new(ExprKind::Mod(crate::expr::BinArgs { ty, lhs: a, rhs: b })));
    }
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    check_literal_zero_divisor(&b, "mod")?;
    Ok(Expr::new(ExprKind::Mod(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `min(a, b)`. Elementwise constant fold for int and float; otherwise `Min`.
pub fn min(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(crate::expr::make_const_i64(rtype, x.min(y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(crate::expr::make_const_f64(rtype, x.min(y)));
    }
    Ok(Expr::new(ExprKind::Min(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}

/// `max(a, b)`. Elementwise constant fold for int and float; otherwise `Max`.
pub fn max(a: Expr, b: Expr) -> Result<Expr, IrError> {
    let (a, b) = match_binary_types(a, b)?;
    let rtype = a.ty();
    let imms = BinaryImmediates::extract(&a, &b);
    if let Some((x, y)) = imms.both_int {
        return Ok(crate::expr::make_const_i64(rtype, x.max(y)));
    }
    if let Some((x, y)) = imms.both_float {
        return Ok(crate::expr::make_const_f64(rtype, x.max(y)));
    }
    Ok(Expr::new(ExprKind::Max(crate::expr::BinArgs { ty: rtype, lhs: a, rhs: b })))
}
