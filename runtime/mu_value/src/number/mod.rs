//! Numeric view of a value.
//!
//! A `Number` is either an exact 64-bit integer or a float. Integer
//! arithmetic is checked and promotes to float on overflow instead of
//! wrapping, so callers never observe a wrapped result.
//!
//! Comparison between the two representations is exact: `Int(2)` equals
//! `Float(2.0)`, and large integers are never rounded through `f64` before
//! comparing. NaN (which the string coercion cannot produce) sorts after
//! every other number so the order stays total.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `2^63` as a float: the first value above `i64::MAX`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Numeric view of a MUMPS value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Number {
    /// Integer view (no decimal point was scanned).
    Int(i64),
    /// Floating-point view.
    Float(f64),
}

impl Number {
    /// The integer zero.
    pub const ZERO: Self = Number::Int(0);

    /// The integer one.
    pub const ONE: Self = Number::Int(1);

    /// Build a float view, folding negative zero into zero.
    #[inline]
    pub fn float(value: f64) -> Self {
        if value == 0.0 {
            Number::Float(0.0)
        } else {
            Number::Float(value)
        }
    }

    /// Build an integer view from a float when it has no fractional part
    /// and fits `i64`; otherwise keep it as a float.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range and fraction are checked before the cast"
    )]
    pub fn integral(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&value) {
            Number::Int(value as i64)
        } else {
            Number::float(value)
        }
    }

    /// Collapse a float with zero fractional part into an integer.
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Number::Int(_) => self,
            Number::Float(f) => Number::integral(f),
        }
    }

    /// Returns `true` for the float representation.
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` for the integer representation.
    #[inline]
    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Returns `true` if the number is zero in either representation.
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// Lossy conversion to `f64`.
    #[inline]
    #[allow(clippy::cast_precision_loss, reason = "float arithmetic is lossy by definition")]
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Negation; `i64::MIN` promotes to float.
    #[must_use]
    pub fn neg(self) -> Self {
        match self {
            Number::Int(i) => i
                .checked_neg()
                .map_or_else(|| Number::float(-self.to_f64()), Number::Int),
            Number::Float(f) => Number::float(-f),
        }
    }

    /// Addition, exact for integers that do not overflow.
    #[must_use]
    pub fn add(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_add, |a, b| a + b)
    }

    /// Subtraction, exact for integers that do not overflow.
    #[must_use]
    pub fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_sub, |a, b| a - b)
    }

    /// Multiplication, exact for integers that do not overflow.
    #[must_use]
    pub fn mul(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_mul, |a, b| a * b)
    }

    /// Division. Returns `None` for a zero divisor.
    ///
    /// Integer operands that divide evenly stay integers.
    pub fn div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if let (Number::Int(a), Number::Int(b)) = (self, rhs) {
            if a.checked_rem(b) == Some(0) {
                if let Some(q) = a.checked_div(b) {
                    return Some(Number::Int(q));
                }
            }
        }
        Some(Number::float(self.to_f64() / rhs.to_f64()))
    }

    /// Integer division, truncating toward zero. Returns `None` for a zero
    /// divisor.
    pub fn int_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if let (Number::Int(a), Number::Int(b)) = (self, rhs) {
            if let Some(q) = a.checked_div(b) {
                return Some(Number::Int(q));
            }
        }
        Some(Number::integral((self.to_f64() / rhs.to_f64()).trunc()))
    }

    /// Modulo with the sign of the divisor (floored). Returns `None` for a
    /// zero divisor.
    pub fn modulo(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if let (Number::Int(a), Number::Int(b)) = (self, rhs) {
            if let Some(r) = a.checked_rem(b) {
                let floored = if r != 0 && (r < 0) != (b < 0) { r + b } else { r };
                return Some(Number::Int(floored));
            }
        }
        let (a, b) = (self.to_f64(), rhs.to_f64());
        Some(Number::float(a - b * (a / b).floor()))
    }

    /// Exponentiation. `0 ** 0` is `0`.
    #[must_use]
    pub fn pow(self, rhs: Self) -> Self {
        if self.is_zero() && rhs.is_zero() {
            return Number::ZERO;
        }
        if let (Number::Int(base), Number::Int(exp)) = (self, rhs) {
            if let Ok(exp) = u32::try_from(exp) {
                if let Some(result) = base.checked_pow(exp) {
                    return Number::Int(result);
                }
            }
        }
        Number::float(self.to_f64().powf(rhs.to_f64()))
    }

    fn combine(
        self,
        rhs: Self,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Self {
        if let (Number::Int(a), Number::Int(b)) = (self, rhs) {
            if let Some(result) = int_op(a, b) {
                return Number::Int(result);
            }
        }
        Number::float(float_op(self.to_f64(), rhs.to_f64()))
    }
}

/// Exact comparison of an integer with a float.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the float is range-checked before the cast"
)]
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }
    if float >= TWO_POW_63 {
        return Ordering::Less;
    }
    if float < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = float - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

fn cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
            (Number::Float(a), Number::Float(b)) => cmp_float(a, b),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) if x == 0.0 => write!(f, "0"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::float(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Number::Int(i64::from(value))
    }
}
