use super::*;
use crate::RuntimeError;
use mu_store::StoreError;
use mu_value::Value;
use pretty_assertions::assert_eq;

#[test]
fn processes_get_distinct_ids() {
    let runtime = Runtime::in_memory();
    let first = runtime.process();
    let second = runtime.process();
    assert_ne!(first.id(), second.id());
}

#[test]
fn globals_are_shared_between_processes() {
    let runtime = Runtime::in_memory();
    let writer = runtime.process();
    let reader = runtime.process();
    writer.global("G").unwrap().child([1]).set("hello").unwrap();
    assert_eq!(
        reader.global("G").unwrap().child([1]).get(),
        Some(Value::from("hello"))
    );
    assert_eq!(runtime.global("G").unwrap().reference(), "^G");
}

#[test]
fn locals_are_private_to_each_process() {
    let runtime = Runtime::in_memory();
    let mut first = runtime.process();
    let mut second = runtime.process();
    first.local("X").unwrap().set(1).unwrap();
    assert_eq!(second.local("X").unwrap().get(), None);
}

#[test]
fn locals_and_globals_with_one_name_are_separate() {
    let runtime = Runtime::in_memory();
    let mut process = runtime.process();
    process.local("X").unwrap().set("local").unwrap();
    process.global("X").unwrap().set("global").unwrap();
    assert_eq!(process.local("X").unwrap().get(), Some(Value::from("local")));
}

#[test]
fn invalid_names_are_rejected() {
    let runtime = Runtime::in_memory();
    let mut process = runtime.process();
    assert!(matches!(
        process.global("1BAD"),
        Err(RuntimeError::Store(StoreError::InvalidName { .. }))
    ));
    assert!(process.local("").is_err());
    assert!(process.new_frame(["OK", "NOT OK"]).is_err());
    assert_eq!(process.scopes().depth(), 1);
}

#[test]
fn new_variants_drive_the_scope_stack() {
    let runtime = Runtime::in_memory();
    let mut process = runtime.process();
    process.local("A").unwrap().set("a").unwrap();
    process.local("B").unwrap().set("b").unwrap();

    process.new_all_except(["A"]).unwrap();
    assert_eq!(process.local("A").unwrap().get(), Some(Value::from("a")));
    assert_eq!(process.local("B").unwrap().get(), None);

    process.new_all();
    assert_eq!(process.local("A").unwrap().get(), None);

    process.new_frame(["B"]).unwrap();
    assert_eq!(process.scopes().depth(), 4);

    while process.pop_frame() {}
    assert_eq!(process.local("B").unwrap().get(), Some(Value::from("b")));
}

#[test]
fn shutdown_closes_global_stores() {
    let runtime = Runtime::in_memory();
    let node = runtime.global("G").unwrap();
    node.set(1).unwrap();
    runtime.shutdown().unwrap();
    assert_eq!(node.get(), None);
    assert!(node.set(2).is_err());
    assert!(runtime.catalog().is_empty());
}
