//! Errors produced by this crate's expression builders.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! three failure kinds a builder can surface: unreconcilable operand types,
//! an operand kind a given builder doesn't accept, and a literal zero
//! divisor. All three are checked at construction time and are not
//! recoverable at this layer -- there is no partial-result or retry policy.

use thiserror::Error;

use crate::types::Type;

/// Errors produced while constructing an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IrError {
    /// Unification could not reconcile two operand types: incompatible vector
    /// lane counts, or no valid element-type promotion between them.
    #[error("type mismatch: cannot unify {lhs} and {rhs}")]
    TypeMismatch { lhs: Type, rhs: Type },

    /// An operand's type is not one the named builder accepts, e.g. `~` on a
    /// float, `pow`/`fmod` on an int, `abs` on a handle.
    #[error("invalid operand for `{op}`: {ty}")]
    InvalidOperand { op: &'static str, ty: Type },

    /// `if_then_else`'s condition must be exactly `Bool(1)`.
    #[error("condition of if_then_else must be bool1, got {ty}")]
    ConditionNotBool1 { ty: Type },

    /// The right-hand side of a `/` or `%` is a literal zero immediate.
    #[error("division by zero in `{op}`")]
    DivisionByZero { op: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn type_mismatch_message_names_both_types() {
        let e = IrError::TypeMismatch {
            lhs: Type::int(32, 1),
            rhs: Type::float(32, 1),
        };
        assert_eq!(e.to_string(), "type mismatch: cannot unify int32 and float32");
    }

    #[test]
    fn division_by_zero_names_the_op() {
        let e = IrError::DivisionByZero { op: "mod" };
        assert_eq!(e.to_string(), "division by zero in `mod`");
    }

    #[test]
    fn invalid_operand_names_op_and_type() {
        let e = IrError::InvalidOperand {
            op: "~",
            ty: Type::float(32, 1),
        };
        assert_eq!(e.to_string(), "invalid operand for `~`: float32");
    }
}
