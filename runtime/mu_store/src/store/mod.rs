//! Backing stores.
//!
//! A store is an ordered map from `SubscriptKey` to `Value` for a single
//! variable name. The contract is object-safe so that a catalog can hold
//! memory and durable stores side by side behind `Box<dyn Store>`.
//!
//! # Ordering contract
//!
//! Keys are kept in collation order. Neighbor queries never skip a key that
//! lies strictly between the argument and the result, and every result is
//! a key that is actually present.

mod durable;
mod memory;
mod ordered;

use std::fmt;
use std::sync::Arc;

use mu_key::SubscriptKey;
use mu_value::Value;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::StoreResult;

pub use durable::{CommitPolicy, DurableStore};
pub use memory::MemoryStore;
pub(crate) use ordered::OrderedMap;

/// Ordered map contract shared by every backing store.
pub trait Store: Send + Sync + fmt::Debug {
    /// The variable name this store backs.
    fn name(&self) -> &str;

    /// Value stored at exactly `key`.
    fn get(&self, key: &SubscriptKey) -> Option<Value>;

    /// Returns `true` if `key` holds a value.
    fn contains(&self, key: &SubscriptKey) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace the value at `key`.
    fn put(&mut self, key: SubscriptKey, value: Value) -> StoreResult<()>;

    /// Remove the value at exactly `key`, returning it.
    fn remove(&mut self, key: &SubscriptKey) -> StoreResult<Option<Value>>;

    /// Remove `prefix` and every key below it. Returns the number removed.
    fn remove_subtree(&mut self, prefix: &SubscriptKey) -> StoreResult<usize>;

    /// Least key `>= key`.
    fn ceiling(&self, key: &SubscriptKey) -> Option<SubscriptKey>;

    /// Greatest key `<= key`.
    fn floor(&self, key: &SubscriptKey) -> Option<SubscriptKey>;

    /// Least key `> key`.
    fn higher(&self, key: &SubscriptKey) -> Option<SubscriptKey>;

    /// Greatest key `< key`.
    fn lower(&self, key: &SubscriptKey) -> Option<SubscriptKey>;

    /// Greatest key strictly below `prefix`.
    fn last_under(&self, prefix: &SubscriptKey) -> Option<SubscriptKey>;

    /// `prefix` and everything below it, in order.
    fn subtree(&self, prefix: &SubscriptKey) -> Vec<(SubscriptKey, Value)>;

    /// Number of stored keys.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make all writes so far durable. A no-op for ephemeral stores.
    fn commit(&mut self) -> StoreResult<()> {
        Ok(())
    }

    /// Rewrite persistent state to its minimal form. A no-op by default.
    fn compact(&mut self) -> StoreResult<()> {
        Ok(())
    }

    /// Release resources. Subsequent writes fail and reads see nothing.
    fn close(&mut self) -> StoreResult<()>;

    /// Returns `true` once `close` has run.
    fn is_closed(&self) -> bool;
}

/// Shared, lockable handle to a boxed store.
///
/// Every `VariableNode` for one name holds a clone of the same handle.
/// Reads take the shared lock, writes the exclusive one, so concurrent
/// readers and writers never observe a torn entry.
#[derive(Clone)]
pub struct StoreHandle(Arc<RwLock<Box<dyn Store>>>);

impl StoreHandle {
    /// Wrap a concrete store.
    pub fn new(store: impl Store + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    /// Wrap an already boxed store.
    pub fn from_boxed(store: Box<dyn Store>) -> Self {
        StoreHandle(Arc::new(RwLock::new(store)))
    }

    /// An empty in-memory store named `name`.
    pub fn memory(name: &str) -> Self {
        Self::new(MemoryStore::new(name))
    }

    /// Acquire a read lock.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Box<dyn Store>> {
        self.0.read()
    }

    /// Acquire a write lock.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Box<dyn Store>> {
        self.0.write()
    }

    /// Returns `true` if both handles share one store.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.read();
        f.debug_struct("StoreHandle")
            .field("name", &store.name())
            .field("len", &store.len())
            .field("closed", &store.is_closed())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests;
