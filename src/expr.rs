//! Expression nodes and the cheap-to-clone [`Expr`] handle over them.
//!
//! `Expr` wraps `Arc<ExprKind>` rather than taking unique ownership: operand
//! expressions are immutable and commonly shared between sibling nodes
//! (common subexpressions naturally alias), so cloning a handle is just an
//! atomic refcount bump, and `Expr` is `Send + Sync` for free.
//!
//! `ExprKind` is a closed enum dispatched by variant, not an open class
//! hierarchy -- downcast probes like `as_int_imm` are exhaustive pattern
//! matches, not a `dyn Any` cast.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::reduce::ReduceNode;
use crate::types::{Type, TypeCode};

/// Whether a [`Call`] node is a side-effect-free intrinsic or an external
/// symbol. This layer only ever constructs `PureIntrinsic` calls; `Extern` is
/// part of the closed vocabulary for completeness but has no builder here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    PureIntrinsic,
    Extern,
}

/// A call to a named operation with no dedicated IR variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub ty: Type,
    pub name: String,
    pub args: SmallVec<[Expr; 4]>,
    pub kind: CallKind,
}

/// The common shape of every binary node: both operands already share `ty`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinArgs {
    pub ty: Type,
    pub lhs: Expr,
    pub rhs: Expr,
}

/// Every expression node variant this layer can construct.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntImm { ty: Type, value: i64 },
    UIntImm { ty: Type, value: u64 },
    FloatImm { ty: Type, value: f64 },
    Var { ty: Type, name: String },
    Cast { ty: Type, value: Expr },
    Broadcast { ty: Type, value: Expr, lanes: u32 },
    Add(BinArgs),
    Sub(BinArgs),
    Mul(BinArgs),
    Div(BinArgs),
    Mod(BinArgs),
    Min(BinArgs),
    Max(BinArgs),
    GT(BinArgs),
    GE(BinArgs),
    LT(BinArgs),
    LE(BinArgs),
    EQ(BinArgs),
    NE(BinArgs),
    And(BinArgs),
    Or(BinArgs),
    Not { ty: Type, value: Expr },
    Select { ty: Type, cond: Expr, t: Expr, f: Expr },
    Call(Call),
    Reduce(ReduceNode),
}

/// An immutable, cheaply-cloneable handle to an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(Arc<ExprKind>);

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr(Arc::new(kind))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// The result type of this expression.
    pub fn ty(&self) -> Type {
        match self.kind() {
            ExprKind::IntImm { ty, .. }
            | ExprKind::UIntImm { ty, .. }
            | ExprKind::FloatImm { ty, .. }
            | ExprKind::Var { ty, .. }
            | ExprKind::Cast { ty, .. }
            | ExprKind::Broadcast { ty, .. }
            | ExprKind::Not { ty, .. }
            | ExprKind::Select { ty, .. } => *ty,
            ExprKind::Add(b)
            | ExprKind::Sub(b)
            | ExprKind::Mul(b)
            | ExprKind::Div(b)
            | ExprKind::Mod(b)
            | ExprKind::Min(b)
            | ExprKind::Max(b)
            | ExprKind::GT(b)
            | ExprKind::GE(b)
            | ExprKind::LT(b)
            | ExprKind::LE(b)
            | ExprKind::EQ(b)
            | ExprKind::NE(b)
            | ExprKind::And(b)
            | ExprKind::Or(b) => b.ty,
            ExprKind::Call(c) => c.ty,
            ExprKind::Reduce(r) => r.ty,
        }
    }

    /// `true` for `IntImm`/`UIntImm`/`FloatImm` leaves.
    pub fn is_const(&self) -> bool {
        matches!(
            self.kind(),
            ExprKind::IntImm { .. } | ExprKind::UIntImm { .. } | ExprKind::FloatImm { .. }
        )
    }

    pub fn as_int_imm(&self) -> Option<(Type, i64)> {
        match self.kind() {
            ExprKind::IntImm { ty, value } => Some((*ty, *value)),
            _ => None,
        }
    }

    pub fn as_uint_imm(&self) -> Option<(Type, u64)> {
        match self.kind() {
            ExprKind::UIntImm { ty, value } => Some((*ty, *value)),
            _ => None,
        }
    }

    pub fn as_float_imm(&self) -> Option<(Type, f64)> {
        match self.kind() {
            ExprKind::FloatImm { ty, value } => Some((*ty, *value)),
            _ => None,
        }
    }
}

/// Builds a typed immediate, dispatching on `t`'s kind -- mirrors the IR
/// factory's `make_const(Type, int64_t)` overload. Vector targets broadcast a
/// freshly built scalar immediate.
pub fn make_const_i64(t: Type, value: i64) -> Expr {
    build_scalar(t, |elem| match elem.code {
        TypeCode::Int | TypeCode::Handle => ExprKind::IntImm { ty: elem, value },
        TypeCode::UInt => ExprKind::UIntImm { ty: elem, value: value as u64 },
        TypeCode::Float => ExprKind::FloatImm { ty: elem, value: value as f64 },
        TypeCode::Bool => ExprKind::UIntImm { ty: elem, value: (value != 0) as u64 },
    })
}

/// `make_const(Type, uint64_t)` overload.
pub fn make_const_u64(t: Type, value: u64) -> Expr {
    build_scalar(t, |elem| match elem.code {
        TypeCode::Int | TypeCode::Handle => ExprKind::IntImm { ty: elem, value: value as i64 },
        TypeCode::UInt => ExprKind::UIntImm { ty: elem, value },
        TypeCode::Float => ExprKind::FloatImm { ty: elem, value: value as f64 },
        TypeCode::Bool => ExprKind::UIntImm { ty: elem, value: (value != 0) as u64 },
    })
}

/// `make_const(Type, double)` overload.
pub fn make_const_f64(t: Type, value: f64) -> Expr {
    build_scalar(t, |elem| match elem.code {
        TypeCode::Int | TypeCode::Handle => ExprKind::IntImm { ty: elem, value: value as i64 },
        TypeCode::UInt => ExprKind::UIntImm { ty: elem, value: value as u64 },
        TypeCode::Float => ExprKind::FloatImm { ty: elem, value },
        TypeCode::Bool => ExprKind::UIntImm { ty: elem, value: (value != 0.0) as u64 },
    })
}

fn build_scalar(t: Type, node_for_elem: impl FnOnce(Type) -> ExprKind) -> Expr {
    let elem = t.element_of();
    let scalar = Expr::new(node_for_elem(elem));
    if t.lanes == 1 {
        scalar
    } else {
        crate::fold::broadcast(t.lanes, scalar)
    }
}

/// The additive identity of `t`.
pub fn make_zero(t: Type) -> Expr {
    match t.code {
        TypeCode::Float => make_const_f64(t, 0.0),
        TypeCode::UInt | TypeCode::Bool => make_const_u64(t, 0),
        TypeCode::Int | TypeCode::Handle => make_const_i64(t, 0),
    }
}

/// The multiplicative identity of `t`.
pub fn make_one(t: Type) -> Expr {
    match t.code {
        TypeCode::Float => make_const_f64(t, 1.0),
        TypeCode::UInt | TypeCode::Bool => make_const_u64(t, 1),
        TypeCode::Int | TypeCode::Handle => make_const_i64(t, 1),
    }
}
