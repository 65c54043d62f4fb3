use super::*;
use mu_value::Value;
use pretty_assertions::assert_eq;

#[test]
fn root_lookup_creates_and_reuses_binding() {
    let mut scopes = ScopeStack::new();
    assert!(!scopes.is_bound_here("X"));
    let x = scopes.lookup("X");
    x.set(1).unwrap();
    assert!(scopes.is_bound_here("X"));
    assert_eq!(scopes.lookup("X").get(), Some(Value::Int(1)));
}

#[test]
fn root_is_never_popped() {
    let mut scopes = ScopeStack::new();
    assert_eq!(scopes.depth(), 1);
    assert!(!scopes.pop());
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn new_shadows_then_pop_restores() {
    let mut scopes = ScopeStack::new();
    scopes.lookup("X").set("outer").unwrap();

    scopes.push(["X"], false);
    assert_eq!(scopes.lookup("X").get(), None);
    scopes.lookup("X").set("inner").unwrap();
    assert_eq!(scopes.lookup("X").get(), Some(Value::from("inner")));

    assert!(scopes.pop());
    assert_eq!(scopes.lookup("X").get(), Some(Value::from("outer")));
}

#[test]
fn non_exclusive_frame_delegates_other_names() {
    let mut scopes = ScopeStack::new();
    scopes.lookup("Y").set(5).unwrap();
    scopes.push(["X"], false);
    scopes.lookup("Y").set(6).unwrap();
    assert!(!scopes.is_bound_here("Y"));
    scopes.pop();
    assert_eq!(scopes.lookup("Y").get(), Some(Value::Int(6)));
}

#[test]
fn eager_binding_hides_later_parent_writes() {
    let mut scopes = ScopeStack::new();
    let outer = scopes.lookup("X");
    scopes.push(["X"], false);
    outer.set("written through an outer view").unwrap();
    assert_eq!(scopes.lookup("X").get(), None);
}

#[test]
fn exclusive_frame_binds_every_new_name() {
    let mut scopes = ScopeStack::new();
    scopes.lookup("A").set(1).unwrap();
    scopes.push(std::iter::empty::<&str>(), true);
    assert_eq!(scopes.lookup("A").get(), None);
    scopes.lookup("A").set(2).unwrap();
    assert!(scopes.is_bound_here("A"));
    scopes.pop();
    assert_eq!(scopes.lookup("A").get(), Some(Value::Int(1)));
}

#[test]
fn exclusive_except_passes_exempt_names_through() {
    let mut scopes = ScopeStack::new();
    scopes.lookup("KEEP").set("shared").unwrap();
    scopes.lookup("HIDE").set("hidden").unwrap();
    scopes.push_exclusive_except(["KEEP"]);

    assert_eq!(scopes.lookup("KEEP").get(), Some(Value::from("shared")));
    assert_eq!(scopes.lookup("HIDE").get(), None);
    scopes.lookup("KEEP").set("changed").unwrap();
    scopes.pop();
    assert_eq!(scopes.lookup("KEEP").get(), Some(Value::from("changed")));
    assert_eq!(scopes.lookup("HIDE").get(), Some(Value::from("hidden")));
}

#[test]
fn nested_frames_resolve_through_chain() {
    let mut scopes = ScopeStack::new();
    scopes.push(["A"], false);
    scopes.lookup("A").set("level one").unwrap();
    scopes.push(["B"], false);
    scopes.push(["C"], false);
    assert_eq!(scopes.depth(), 4);
    assert_eq!(scopes.lookup("A").get(), Some(Value::from("level one")));

    // Unbound names fall through to ROOT.
    scopes.lookup("Z").set(1).unwrap();
    while scopes.pop() {}
    assert_eq!(scopes.lookup("Z").get(), Some(Value::Int(1)));
    assert_eq!(scopes.lookup("A").get(), None);
}

#[test]
fn locals_are_subscriptable() {
    let mut scopes = ScopeStack::new();
    let x = scopes.lookup("X");
    x.child([1, 2]).set("deep").unwrap();
    assert_eq!(scopes.lookup("X").child([1, 2]).get(), Some(Value::from("deep")));
    assert_eq!(x.reference(), "X");
}
