use super::*;
use pretty_assertions::assert_eq;

fn key(subscripts: &[Subscript]) -> SubscriptKey {
    SubscriptKey::new(subscripts.iter())
}

fn s(text: &str) -> Subscript {
    Subscript::from(text)
}

fn n(value: i64) -> Subscript {
    Subscript::from(value)
}

#[test]
fn numbers_sort_before_strings_at_any_arity() {
    assert!(key(&[s("A"), n(1)]) < key(&[s("A"), s("A")]));
    assert!(key(&[n(99)]) < key(&[s("0")]));
}

#[test]
fn shorter_prefix_precedes_longer() {
    let short = key(&[s("A"), s("B"), s("C")]);
    let long = key(&[s("A"), s("B"), s("C"), s("D")]);
    assert!(short < long);
    assert!(short.is_before(&long));
    assert!(long.is_after(&short));
}

#[test]
fn first_differing_component_decides() {
    assert!(key(&[n(1), s("Z")]) < key(&[n(2), s("A")]));
    assert!(key(&[s("B")]) > key(&[s("A"), s("Z"), s("Z")]));
}

#[test]
fn equality_is_collation_equality() {
    assert_eq!(key(&[n(2)]), SubscriptKey::new([2.0]));
    assert_ne!(key(&[n(2)]), key(&[s("2")]));
}

#[test]
fn append_with_nothing_appends_probe() {
    let base = key(&[s("A")]);
    let probe = base.append(std::iter::empty::<Subscript>());
    assert_eq!(probe.len(), 2);
    assert!(probe.is_probe());
    assert_eq!(probe, base.probe());
    // The probe sits after the key itself and before every child.
    assert!(base < probe);
    assert!(probe < key(&[s("A"), n(i64::MIN)]));
    assert!(probe < key(&[s("A"), s("")]));
}

#[test]
fn append_then_splice_restores_key() {
    let base = key(&[n(1), s("x")]);
    let appended = base.append([s("y"), s("z")]);
    assert_eq!(appended.len(), 4);
    assert_eq!(appended.splice(base.len()), base);
}

#[test]
fn splice_past_end_is_identity() {
    let base = key(&[n(1)]);
    assert_eq!(base.splice(10), base);
    assert!(base.splice(0).is_empty());
}

#[test]
fn parent_and_prefix_relations() {
    let child = key(&[s("A"), n(1)]);
    assert_eq!(child.parent(), Some(key(&[s("A")])));
    assert_eq!(SubscriptKey::root().parent(), None);
    assert!(child.starts_with(&SubscriptKey::root()));
    assert!(child.is_descendant_of(&key(&[s("A")])));
    assert!(!child.is_descendant_of(&child));
    assert!(!key(&[s("B"), n(1)]).is_descendant_of(&key(&[s("A")])));
}

#[test]
fn display_renders_subscript_list() {
    assert_eq!(key(&[n(1), s("a\"b"), Subscript::from(2.5)]).to_string(), "(1,\"a\"\"b\",2.5)");
    assert_eq!(SubscriptKey::root().to_string(), "");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn subscript_strategy() -> impl Strategy<Value = Subscript> {
        prop_oneof![
            (-50_i64..50).prop_map(Subscript::from),
            (-50.0_f64..50.0).prop_map(Subscript::from),
            "[0-9A-Za-z]{0,3}".prop_map(Subscript::from),
        ]
    }

    fn key_strategy() -> impl Strategy<Value = SubscriptKey> {
        proptest::collection::vec(subscript_strategy(), 0..4).prop_map(SubscriptKey::new)
    }

    proptest! {
        #[test]
        fn comparison_is_antisymmetric(a in key_strategy(), b in key_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
        }

        #[test]
        fn comparison_is_transitive(
            a in key_strategy(),
            b in key_strategy(),
            c in key_strategy(),
        ) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
            if a >= b && b >= c {
                prop_assert!(a >= c);
            }
        }

        #[test]
        fn append_splice_round_trip(k in key_strategy(), x in subscript_strategy()) {
            prop_assert_eq!(k.append([x]).splice(k.len()), k.clone());
            prop_assert_eq!(k.probe().splice(k.len()), k);
        }

        #[test]
        fn descendants_follow_their_ancestor(
            k in key_strategy(),
            tail in proptest::collection::vec(subscript_strategy(), 1..3),
        ) {
            let child = k.append(tail);
            prop_assert!(k < child);
            prop_assert!(child.is_descendant_of(&k));
        }
    }
}
