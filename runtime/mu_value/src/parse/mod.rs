//! String to number coercion.
//!
//! The numeric view of a string is derived from its longest numeric prefix:
//!
//! 1. At most one leading `+` or `-` is honoured.
//! 2. The first `E`/`e` followed by an integer (one optional sign, then
//!    digits) splits off an exponent that scales the mantissa by a power of
//!    ten. The mantissa is the text before that marker.
//! 3. The mantissa accepts digits and at most one decimal point; scanning stops
//!    at the first character that does not fit and the rest is discarded.
//! 4. No digits at all means integer zero. A decimal point in the mantissa
//!    yields a float; otherwise the result is an integer whenever the scaled
//!    value is whole and fits `i64`.

use crate::number::Number;

/// Exponents beyond this magnitude saturate; `f64` cannot represent them anyway.
const MAX_EXPONENT: i32 = 400;

/// The accepted numeric prefix of a mantissa.
struct Mantissa<'a> {
    /// Digits before the decimal point.
    whole: &'a str,
    /// Digits after the decimal point.
    fraction: &'a str,
    /// Whether a decimal point was accepted.
    has_point: bool,
}

impl Mantissa<'_> {
    fn has_digits(&self) -> bool {
        !self.whole.is_empty() || !self.fraction.is_empty()
    }
}

/// Derive the numeric view of `text`.
///
/// Never fails: anything without a numeric prefix is integer zero.
pub fn parse_number(text: &str) -> Number {
    let (negative, rest) = split_sign(text);
    let (head, exponent) = split_exponent(rest);
    let mantissa = scan_mantissa(head);
    if !mantissa.has_digits() {
        return Number::ZERO;
    }
    let magnitude = if mantissa.has_point {
        float_value(&mantissa, exponent)
    } else {
        integer_value(mantissa.whole, exponent)
    };
    if negative {
        magnitude.neg()
    } else {
        magnitude
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn scan_mantissa(text: &str) -> Mantissa<'_> {
    let bytes = text.as_bytes();
    let mut point = None;
    let mut end = 0;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => {}
            b'.' if point.is_none() => point = Some(end),
            _ => break,
        }
        end += 1;
    }
    match point {
        Some(at) => Mantissa {
            whole: &text[..at],
            fraction: &text[at + 1..end],
            has_point: true,
        },
        None => Mantissa {
            whole: &text[..end],
            fraction: "",
            has_point: false,
        },
    }
}

/// Split `text` at the first `E`/`e` that introduces an integer exponent.
///
/// Without such a marker the whole text is mantissa and the exponent is zero.
fn split_exponent(text: &str) -> (&str, i32) {
    text.match_indices(['E', 'e'])
        .find_map(|(at, marker)| {
            scan_exponent(&text[at + marker.len()..]).map(|exponent| (&text[..at], exponent))
        })
        .unwrap_or((text, 0))
}

/// Scan an optionally signed integer at the start of `text`.
fn scan_exponent(text: &str) -> Option<i32> {
    let (negative, digits) = split_sign(text);
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len]
        .parse::<i32>()
        .map_or(MAX_EXPONENT, |value| value.min(MAX_EXPONENT));
    Some(if negative { -magnitude } else { magnitude })
}

fn float_value(mantissa: &Mantissa<'_>, exponent: i32) -> Number {
    let whole = if mantissa.whole.is_empty() { "0" } else { mantissa.whole };
    let fraction = if mantissa.fraction.is_empty() { "0" } else { mantissa.fraction };
    let value = format!("{whole}.{fraction}e{exponent}")
        .parse::<f64>()
        .unwrap_or(0.0);
    Number::float(value)
}

fn integer_value(digits: &str, exponent: i32) -> Number {
    if exponent >= 0 {
        let exact = u32::try_from(exponent)
            .ok()
            .and_then(|exp| 10_i64.checked_pow(exp))
            .and_then(|scale| digits.parse::<i64>().ok()?.checked_mul(scale));
        if let Some(value) = exact {
            return Number::Int(value);
        }
    }
    let value = format!("{digits}e{exponent}").parse::<f64>().unwrap_or(0.0);
    Number::integral(value)
}

#[cfg(test)]
mod tests;
