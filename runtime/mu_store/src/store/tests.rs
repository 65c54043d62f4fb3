//! Ordering contract, checked against every store kind.

use super::*;
use mu_key::Subscript;
use pretty_assertions::assert_eq;

fn key<S: Into<Subscript>>(subscripts: impl IntoIterator<Item = S>) -> SubscriptKey {
    SubscriptKey::new(subscripts)
}

fn with_each_store(check: impl Fn(&mut dyn Store)) {
    let mut memory = MemoryStore::new("M");
    check(&mut memory);

    let dir = tempfile::tempdir().unwrap();
    let mut durable = DurableStore::open(dir.path(), "D", CommitPolicy::EveryWrite).unwrap();
    check(&mut durable);
}

/// ^X(1)=a ^X(1,"b")=b ^X(2)=c ^X("s")=d
fn populate(store: &mut dyn Store) {
    store.put(key([1]), Value::from("a")).unwrap();
    store.put(key::<Subscript>([1.into(), "b".into()]), Value::from("b")).unwrap();
    store.put(key([2]), Value::from("c")).unwrap();
    store.put(key(["s"]), Value::from("d")).unwrap();
}

#[test]
fn put_get_and_replace() {
    with_each_store(|store| {
        assert_eq!(store.get(&key([1])), None);
        store.put(key([1]), Value::from(5)).unwrap();
        store.put(key([1]), Value::from(6)).unwrap();
        assert_eq!(store.get(&key([1])), Some(Value::Int(6)));
        assert_eq!(store.len(), 1);
    });
}

#[test]
fn numeric_and_string_keys_are_distinct_entries() {
    with_each_store(|store| {
        store.put(key([2]), Value::from("num")).unwrap();
        store.put(key(["2"]), Value::from("str")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key([2.0])), Some(Value::from("num")));
    });
}

#[test]
fn neighbor_queries_follow_collation() {
    with_each_store(|store| {
        populate(store);
        let one_b = key::<Subscript>([1.into(), "b".into()]);
        assert_eq!(store.higher(&key([1])), Some(one_b.clone()));
        assert_eq!(store.higher(&one_b), Some(key([2])));
        assert_eq!(store.ceiling(&key([2])), Some(key([2])));
        assert_eq!(store.ceiling(&key([1.5])), Some(key([2])));
        assert_eq!(store.lower(&key([2])), Some(one_b));
        assert_eq!(store.floor(&key(["a"])), Some(key([2])));
        assert_eq!(store.higher(&key(["s"])), None);
        assert_eq!(store.lower(&key([1])), None);
    });
}

#[test]
fn last_under_and_subtree() {
    with_each_store(|store| {
        populate(store);
        assert_eq!(
            store.last_under(&key([1])),
            Some(key::<Subscript>([1.into(), "b".into()]))
        );
        assert_eq!(store.last_under(&key([2])), None);
        assert_eq!(store.last_under(&SubscriptKey::root()), Some(key(["s"])));

        let below_one: Vec<_> = store.subtree(&key([1])).into_iter().map(|(k, _)| k).collect();
        assert_eq!(below_one.len(), 2);
        assert_eq!(store.subtree(&SubscriptKey::root()).len(), 4);
    });
}

#[test]
fn remove_subtree_removes_prefix_and_descendants_only() {
    with_each_store(|store| {
        populate(store);
        assert_eq!(store.remove_subtree(&key([1])).unwrap(), 2);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&key([2])));
        assert_eq!(store.remove_subtree(&key([9])).unwrap(), 0);
    });
}

#[test]
fn remove_returns_previous_value() {
    with_each_store(|store| {
        populate(store);
        assert_eq!(store.remove(&key([2])).unwrap(), Some(Value::from("c")));
        assert_eq!(store.remove(&key([2])).unwrap(), None);
    });
}

#[test]
fn closed_store_rejects_writes_and_reads_empty() {
    with_each_store(|store| {
        populate(store);
        store.close().unwrap();
        assert!(store.is_closed());
        assert!(store.is_empty());
        assert_eq!(store.get(&key([1])), None);
        assert!(matches!(
            store.put(key([3]), Value::from(1)),
            Err(crate::StoreError::Closed { .. })
        ));
    });
}

#[test]
fn handles_share_one_store() {
    let handle = StoreHandle::memory("X");
    let other = handle.clone();
    handle.write().put(key([1]), Value::from(1)).unwrap();
    assert_eq!(other.read().get(&key([1])), Some(Value::Int(1)));
    assert!(handle.ptr_eq(&other));
    assert!(!handle.ptr_eq(&StoreHandle::memory("X")));
}
