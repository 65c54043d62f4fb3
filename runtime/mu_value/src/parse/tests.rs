use super::*;
use pretty_assertions::assert_eq;

fn assert_int(text: &str, expected: i64) {
    let number = parse_number(text);
    assert!(number.is_int(), "{text:?} should parse as an integer, got {number:?}");
    assert_eq!(number, Number::Int(expected), "parsing {text:?}");
}

fn assert_float(text: &str, expected: f64) {
    let number = parse_number(text);
    assert!(number.is_float(), "{text:?} should parse as a float, got {number:?}");
    assert_eq!(number, Number::Float(expected), "parsing {text:?}");
}

#[test]
fn leading_zeros_with_decimal_point_are_float() {
    assert_float("0000123.000", 123.0);
}

#[test]
fn exponent_with_whole_result_is_integer() {
    assert_int("1E3", 1000);
    assert_int("1e3", 1000);
    assert_int("25E+2", 2500);
    assert_int("100E-2", 1);
}

#[test]
fn negative_exponent_with_fraction_is_float() {
    assert_float("1E-3", 0.001);
    assert_float("-5E-1", -0.5);
}

#[test]
fn empty_input_is_zero() {
    assert_int("", 0);
    assert_int("-", 0);
    assert_int(".", 0);
}

#[test]
fn trailing_garbage_is_discarded() {
    assert_int("12 monkeys", 12);
    assert_int("3abc", 3);
    assert_float("2.5.6", 2.5);
    assert_int("7Eleven", 7);
}

#[test]
fn exponent_after_discarded_text_still_applies() {
    assert_int("3abcE2", 300);
    assert_float("2.5.6E1", 25.0);
    assert_int("-4xE1", -40);
    assert_int("7Eleven", 7);
    assert_int("1E2E3", 100);
}

#[test]
fn only_one_leading_sign_is_honoured() {
    assert_int("-+-++-7", 0);
    assert_int("--5", 0);
    assert_int("+5", 5);
    assert_int("-5", -5);
}

#[test]
fn decimal_point_without_fraction_digits_is_float() {
    assert_float("5.", 5.0);
    assert_float(".5", 0.5);
    assert_float("-.25", -0.25);
}

#[test]
fn non_numeric_text_is_zero() {
    assert_int("abc", 0);
    assert_int(" 12", 0);
    assert_int("E5", 0);
}

#[test]
fn overflowing_integers_become_floats() {
    let number = parse_number("99999999999999999999");
    assert!(number.is_float());
    assert_eq!(number, Number::Float(1e20));
    assert!(parse_number("1E30").is_float());
}

#[test]
fn huge_exponents_saturate() {
    assert_eq!(parse_number("1E99999"), Number::Float(f64::INFINITY));
    assert_int("0E99999", 0);
}

#[test]
fn negative_zero_is_zero() {
    assert_eq!(parse_number("-0.0").to_string(), "0");
    assert_int("-0", 0);
}
