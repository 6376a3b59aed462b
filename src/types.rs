//! The tensor IR's scalar type lattice.
//!
//! A [`Type`] pairs a [`TypeCode`] with a bit width and a lane count. Vector
//! types (`lanes > 1`) are uniform-width lanes of the same scalar element;
//! `lanes == 1` is an ordinary scalar. There is no struct/array/pointer
//! nesting here -- this layer only ever promotes and broadcasts between flat
//! scalar/vector element types.

use std::fmt;

/// The broad kind of value a [`Type`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Int,
    UInt,
    Float,
    Bool,
    Handle,
}

/// A type descriptor: element kind, bit width, and lane count.
///
/// `lanes == 1` means scalar; `lanes > 1` means a vector of that many
/// identically-typed elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type {
    pub code: TypeCode,
    pub bits: u8,
    pub lanes: u32,
}

/// A typed constant value extracted from [`Type::min_value`]/[`Type::max_value`],
/// not yet wrapped in an [`crate::expr::Expr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstBits {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Type {
    pub fn new(code: TypeCode, bits: u8, lanes: u32) -> Self {
        Type { code, bits, lanes }
    }

    pub fn int(bits: u8, lanes: u32) -> Self {
        Type::new(TypeCode::Int, bits, lanes)
    }

    pub fn uint(bits: u8, lanes: u32) -> Self {
        Type::new(TypeCode::UInt, bits, lanes)
    }

    pub fn float(bits: u8, lanes: u32) -> Self {
        Type::new(TypeCode::Float, bits, lanes)
    }

    pub fn bool_(lanes: u32) -> Self {
        Type::new(TypeCode::Bool, 1, lanes)
    }

    pub fn handle(lanes: u32) -> Self {
        Type::new(TypeCode::Handle, 64, lanes)
    }

    pub fn is_int(&self) -> bool {
        self.code == TypeCode::Int
    }

    pub fn is_uint(&self) -> bool {
        self.code == TypeCode::UInt
    }

    pub fn is_float(&self) -> bool {
        self.code == TypeCode::Float
    }

    pub fn is_bool(&self) -> bool {
        self.code == TypeCode::Bool
    }

    pub fn is_handle(&self) -> bool {
        self.code == TypeCode::Handle
    }

    pub fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    /// A 32- or 64-bit signed scalar integer -- the canonical type for shape
    /// and loop-bound arithmetic, which receives aggressive constant folding
    /// for the integer-only operators (shift, bitwise, modulo).
    pub fn is_index_type(&self) -> bool {
        self.is_int() && self.lanes == 1 && (self.bits == 32 || self.bits == 64)
    }

    /// Strips lanes to 1, keeping code and bit width.
    pub fn element_of(&self) -> Type {
        Type {
            lanes: 1,
            ..*self
        }
    }

    /// Returns this type with a different lane count.
    pub fn with_lanes(&self, lanes: u32) -> Type {
        Type { lanes, ..*self }
    }

    /// The smallest value representable by this type. For float types this is
    /// negative infinity, which is the correct algebraic identity for a `max`
    /// reduction over reals.
    pub fn min_value(&self) -> ConstBits {
        match self.code {
            TypeCode::Int => ConstBits::Int(int_min(self.bits)),
            TypeCode::UInt => ConstBits::UInt(0),
            TypeCode::Float => ConstBits::Float(f64::NEG_INFINITY),
            TypeCode::Bool => ConstBits::UInt(0),
            TypeCode::Handle => ConstBits::Int(0),
        }
    }

    /// The largest value representable by this type. For float types this is
    /// positive infinity, the identity for a `min` reduction over reals.
    pub fn max_value(&self) -> ConstBits {
        match self.code {
            TypeCode::Int => ConstBits::Int(int_max(self.bits)),
            TypeCode::UInt => ConstBits::UInt(uint_max(self.bits)),
            TypeCode::Float => ConstBits::Float(f64::INFINITY),
            TypeCode::Bool => ConstBits::UInt(1),
            TypeCode::Handle => ConstBits::Int(i64::MAX),
        }
    }
}

fn int_min(bits: u8) -> i64 {
    if bits >= 64 {
        i64::MIN
    } else {
        -(1i64 << (bits - 1))
    }
}

fn int_max(bits: u8) -> i64 {
    if bits >= 64 {
        i64::MAX
    } else {
        (1i64 << (bits - 1)) - 1
    }
}

fn uint_max(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.code {
            TypeCode::Int => "int",
            TypeCode::UInt => "uint",
            TypeCode::Float => "float",
            TypeCode::Bool => "bool",
            TypeCode::Handle => "handle",
        };
        if self.lanes == 1 {
            write!(f, "{code}{}", self.bits)
        } else {
            write!(f, "{code}{}x{}", self.bits, self.lanes)
        }
    }
}
