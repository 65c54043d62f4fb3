//! Error types for value operations.
//!
//! Coercion itself never fails: any string has a numeric view. The only
//! value-level failures are arithmetic ones.

use crate::operators::BinaryOp;
use crate::value::Value;

/// Result of an operator evaluation.
pub type ValueResult = Result<Value, ValueError>;

/// Value-level error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// `/`, `\` or `#` with a zero right operand.
    #[error("division by zero in `{}`", .op.as_symbol())]
    DivisionByZero { op: BinaryOp },
}
