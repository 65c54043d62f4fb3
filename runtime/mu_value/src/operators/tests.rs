use super::*;

fn binary(left: impl Into<Value>, right: impl Into<Value>, op: BinaryOp) -> Value {
    match evaluate_binary(&left.into(), &right.into(), op) {
        Ok(value) => value,
        Err(err) => panic!("unexpected error: {err}"),
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn acts_on_numeric_views() {
        assert_eq!(binary("12 monkeys", 3, BinaryOp::Add), Value::Int(15));
        assert_eq!(binary("10", "4", BinaryOp::Sub), Value::Int(6));
        assert_eq!(binary(2.5, 2, BinaryOp::Mul), Value::Float(5.0));
        assert_eq!(binary(7, 2, BinaryOp::Div), Value::Float(3.5));
        assert_eq!(binary(8, 2, BinaryOp::Div), Value::Int(4));
        assert_eq!(binary(-7, 2, BinaryOp::IntDiv), Value::Int(-3));
        assert_eq!(binary(-7, 3, BinaryOp::Mod), Value::Int(2));
        assert_eq!(binary(2, 3, BinaryOp::Pow), Value::Int(8));
    }

    #[test]
    fn zero_power_zero_is_zero() {
        assert_eq!(binary(0, 0, BinaryOp::Pow), Value::Int(0));
        assert_eq!(binary("", "", BinaryOp::Pow), Value::Int(0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        for op in [BinaryOp::Div, BinaryOp::IntDiv, BinaryOp::Mod] {
            let result = evaluate_binary(&Value::Int(1), &Value::string("abc"), op);
            assert_eq!(result, Err(ValueError::DivisionByZero { op }));
        }
    }

    #[test]
    fn error_message_names_operator() {
        let err = ValueError::DivisionByZero { op: BinaryOp::IntDiv };
        assert_eq!(err.to_string(), "division by zero in `\\`");
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relational_is_numeric() {
        assert_eq!(binary("10", "9", BinaryOp::Gt), Value::Int(1));
        assert_eq!(binary("007", 6, BinaryOp::Gt), Value::Int(1));
        assert_eq!(binary(2, 2.0, BinaryOp::Ge), Value::Int(1));
        assert_eq!(binary("abc", 1, BinaryOp::Lt), Value::Int(1));
        assert_eq!(binary(3, 3, BinaryOp::Le), Value::Int(1));
    }

    #[test]
    fn equality_is_textual() {
        assert_eq!(binary("007", 7, BinaryOp::Eq), Value::Int(0));
        assert_eq!(binary("7", 7, BinaryOp::Eq), Value::Int(1));
        assert_eq!(binary(7.0, 7, BinaryOp::Eq), Value::Int(1));
        assert_eq!(binary("007", 7, BinaryOp::Ne), Value::Int(1));
    }

    #[test]
    fn follows_is_code_point_order() {
        assert_eq!(binary("b", "a", BinaryOp::Follows), Value::Int(1));
        assert_eq!(binary("B", "a", BinaryOp::Follows), Value::Int(0));
        assert_eq!(binary("10", "9", BinaryOp::Follows), Value::Int(0));
    }
}

mod strings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concat_uses_string_views() {
        assert_eq!(binary("x", 1.5, BinaryOp::Concat), Value::string("x1.5"));
        assert_eq!(binary(1, 2, BinaryOp::Concat), Value::string("12"));
    }

    #[test]
    fn contains() {
        assert_eq!(binary("hello", "ell", BinaryOp::Contains), Value::Int(1));
        assert_eq!(binary("hello", "", BinaryOp::Contains), Value::Int(1));
        assert_eq!(binary(123, 4, BinaryOp::Contains), Value::Int(0));
    }
}

mod logic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_or_use_truth_values() {
        assert_eq!(binary("1x", 2, BinaryOp::And), Value::Int(1));
        assert_eq!(binary("x", 2, BinaryOp::And), Value::Int(0));
        assert_eq!(binary("x", 0.5, BinaryOp::Or), Value::Int(1));
    }
}

mod unary {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plus_rederives_numeric_view() {
        assert_eq!(evaluate_unary(&Value::string("0000123.000"), UnaryOp::Plus), Value::Float(123.0));
        assert_eq!(evaluate_unary(&Value::string("1E3"), UnaryOp::Plus), Value::Int(1000));
    }

    #[test]
    fn neg_negates_numeric_view() {
        assert_eq!(evaluate_unary(&Value::string("-7abc"), UnaryOp::Neg), Value::Int(7));
        assert_eq!(evaluate_unary(&Value::Float(0.5), UnaryOp::Neg), Value::Float(-0.5));
    }

    #[test]
    fn not_maps_zero_to_one() {
        assert_eq!(evaluate_unary(&Value::Int(0), UnaryOp::Not), Value::Int(1));
        assert_eq!(evaluate_unary(&Value::string("abc"), UnaryOp::Not), Value::Int(1));
        assert_eq!(evaluate_unary(&Value::Float(-2.5), UnaryOp::Not), Value::Int(0));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn numeric_text() -> impl Strategy<Value = String> {
        "[-+]?[0-9]{0,6}(\\.[0-9]{0,4})?([eE][-+]?[0-9]{1,2})?[a-z .]{0,3}"
    }

    fn number_strategy() -> impl Strategy<Value = Number> {
        prop_oneof![
            any::<i64>().prop_map(Number::Int),
            (-1e20_f64..1e20).prop_map(Number::float),
            (-100_i32..100).prop_map(|i| Number::float(f64::from(i))),
        ]
    }

    proptest! {
        #[test]
        fn unary_plus_is_idempotent(text in numeric_text()) {
            let once = evaluate_unary(&Value::string(text), UnaryOp::Plus);
            prop_assert_eq!(evaluate_unary(&once, UnaryOp::Plus), once);
        }

        #[test]
        fn double_negation_restores_numeric_view(text in numeric_text()) {
            let value = Value::string(text);
            let twice = evaluate_unary(&evaluate_unary(&value, UnaryOp::Neg), UnaryOp::Neg);
            prop_assert_eq!(twice.to_number(), value.to_number());
        }

        #[test]
        fn number_order_is_total(a in number_strategy(), b in number_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a == b, a.cmp(&b).is_eq());
        }

        #[test]
        fn relational_operators_agree(a in numeric_text(), b in numeric_text()) {
            let (a, b) = (Value::string(a), Value::string(b));
            let lt = binary(a.clone(), b.clone(), BinaryOp::Lt);
            let ge = binary(a, b, BinaryOp::Ge);
            prop_assert_ne!(lt, ge);
        }
    }
}
