//! Ephemeral store for process-local variables.

use mu_key::SubscriptKey;
use mu_value::Value;

use super::{OrderedMap, Store};
use crate::errors::{StoreError, StoreResult};

/// Ordered map held entirely in memory. Contents vanish with the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    map: OrderedMap,
    closed: bool,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryStore {
            name: name.into(),
            map: OrderedMap::new(),
            closed: false,
        }
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Closed {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &SubscriptKey) -> Option<Value> {
        self.map.get(key).cloned()
    }

    fn contains(&self, key: &SubscriptKey) -> bool {
        self.map.contains(key)
    }

    fn put(&mut self, key: SubscriptKey, value: Value) -> StoreResult<()> {
        self.check_open()?;
        self.map.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &SubscriptKey) -> StoreResult<Option<Value>> {
        self.check_open()?;
        Ok(self.map.remove(key))
    }

    fn remove_subtree(&mut self, prefix: &SubscriptKey) -> StoreResult<usize> {
        self.check_open()?;
        Ok(self.map.remove_subtree(prefix))
    }

    fn ceiling(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.map.ceiling(key)
    }

    fn floor(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.map.floor(key)
    }

    fn higher(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.map.higher(key)
    }

    fn lower(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.map.lower(key)
    }

    fn last_under(&self, prefix: &SubscriptKey) -> Option<SubscriptKey> {
        self.map.last_under(prefix)
    }

    fn subtree(&self, prefix: &SubscriptKey) -> Vec<(SubscriptKey, Value)> {
        self.map.subtree(prefix)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn close(&mut self) -> StoreResult<()> {
        self.map.clear();
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
