//! Operator implementations on coerced values.
//!
//! Provides direct enum-based dispatch for binary and unary operators. The
//! operator set is fixed, so pattern matching is preferred over trait
//! objects.
//!
//! Arithmetic and relational operators act on numeric views. Equality acts
//! on string views, so `"007" = 7` is false while `"007" > 6` is true.
//! Boolean results are the integers `1` and `0`.

use crate::errors::{ValueError, ValueResult};
use crate::number::Number;
use crate::value::Value;

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `\`
    IntDiv,
    /// `**`
    Pow,
    /// `#`
    Mod,
    /// `>`
    Gt,
    /// `'<`
    Ge,
    /// `<`
    Lt,
    /// `'>`
    Le,
    /// `=`
    Eq,
    /// `'=`
    Ne,
    /// `_`
    Concat,
    /// `[`
    Contains,
    /// `]`
    Follows,
    /// `&`
    And,
    /// `!`
    Or,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::IntDiv => "\\",
            BinaryOp::Pow => "**",
            BinaryOp::Mod => "#",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => "'<",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "'>",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "'=",
            BinaryOp::Concat => "_",
            BinaryOp::Contains => "[",
            BinaryOp::Follows => "]",
            BinaryOp::And => "&",
            BinaryOp::Or => "!",
        }
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`: re-derive the numeric view.
    Plus,
    /// `-`: negated numeric view.
    Neg,
    /// `'`: logical not.
    Not,
}

/// Evaluate a binary operator.
///
/// Only division-like operators can fail, and only on a zero divisor.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> ValueResult {
    match op {
        BinaryOp::Add => Ok(arith(left, right, Number::add)),
        BinaryOp::Sub => Ok(arith(left, right, Number::sub)),
        BinaryOp::Mul => Ok(arith(left, right, Number::mul)),
        BinaryOp::Pow => Ok(arith(left, right, Number::pow)),
        BinaryOp::Div => checked_arith(left, right, op, Number::div),
        BinaryOp::IntDiv => checked_arith(left, right, op, Number::int_div),
        BinaryOp::Mod => checked_arith(left, right, op, Number::modulo),
        BinaryOp::Gt => Ok(Value::truth(left.to_number() > right.to_number())),
        BinaryOp::Ge => Ok(Value::truth(left.to_number() >= right.to_number())),
        BinaryOp::Lt => Ok(Value::truth(left.to_number() < right.to_number())),
        BinaryOp::Le => Ok(Value::truth(left.to_number() <= right.to_number())),
        BinaryOp::Eq => Ok(Value::truth(left.as_text() == right.as_text())),
        BinaryOp::Ne => Ok(Value::truth(left.as_text() != right.as_text())),
        BinaryOp::Concat => {
            let mut text = left.as_text().into_owned();
            text.push_str(&right.as_text());
            Ok(Value::Str(text))
        }
        BinaryOp::Contains => Ok(Value::truth(left.as_text().contains(&*right.as_text()))),
        BinaryOp::Follows => Ok(Value::truth(left.as_text() > right.as_text())),
        BinaryOp::And => Ok(Value::truth(left.is_true() && right.is_true())),
        BinaryOp::Or => Ok(Value::truth(left.is_true() || right.is_true())),
    }
}

/// Evaluate a unary operator.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Plus => Value::number(value.to_number()),
        UnaryOp::Neg => Value::number(value.to_number().neg()),
        UnaryOp::Not => Value::truth(!value.is_true()),
    }
}

#[inline]
fn arith(left: &Value, right: &Value, op: fn(Number, Number) -> Number) -> Value {
    Value::number(op(left.to_number(), right.to_number()))
}

#[inline]
fn checked_arith(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    apply: fn(Number, Number) -> Option<Number>,
) -> ValueResult {
    apply(left.to_number(), right.to_number())
        .map(Value::number)
        .ok_or(ValueError::DivisionByZero { op })
}

#[cfg(test)]
mod tests;
