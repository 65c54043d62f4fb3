//! Name to store mapping.
//!
//! Every variable name owns exactly one backing map. The catalog opens a
//! store the first time a name is seen and hands out the same handle from
//! then on, so every view of `^X` in every thread shares one map.

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::errors::{StoreError, StoreResult};
use crate::store::{CommitPolicy, DurableStore, MemoryStore, Store, StoreHandle};

/// Creates the backing store for a variable name.
pub trait StoreFactory: Send + Sync + fmt::Debug {
    fn open(&self, name: &str) -> StoreResult<Box<dyn Store>>;
}

/// Opens ephemeral `MemoryStore`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryFactory;

impl StoreFactory for MemoryFactory {
    fn open(&self, name: &str) -> StoreResult<Box<dyn Store>> {
        Ok(Box::new(MemoryStore::new(name)))
    }
}

/// Opens `DurableStore`s with one journal per name under `dir`.
#[derive(Clone, Debug)]
pub struct DurableFactory {
    dir: PathBuf,
    policy: CommitPolicy,
}

impl DurableFactory {
    pub fn new(dir: impl Into<PathBuf>, policy: CommitPolicy) -> Self {
        DurableFactory {
            dir: dir.into(),
            policy,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StoreFactory for DurableFactory {
    fn open(&self, name: &str) -> StoreResult<Box<dyn Store>> {
        Ok(Box::new(DurableStore::open(&self.dir, name, self.policy)?))
    }
}

/// Registry of open stores, keyed by variable name.
pub struct StoreCatalog {
    factory: Box<dyn StoreFactory>,
    stores: Mutex<FxHashMap<String, StoreHandle>>,
}

impl StoreCatalog {
    pub fn new(factory: impl StoreFactory + 'static) -> Self {
        StoreCatalog {
            factory: Box::new(factory),
            stores: Mutex::new(FxHashMap::default()),
        }
    }

    /// A catalog whose stores live only in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryFactory)
    }

    /// Handle for `name`, opening its store on first use.
    ///
    /// The catalog lock is held across the open so two threads racing on a
    /// new name end up with the same handle.
    pub fn open(&self, name: &str) -> StoreResult<StoreHandle> {
        validate_name(name)?;
        let mut stores = self.stores.lock();
        if let Some(handle) = stores.get(name) {
            return Ok(handle.clone());
        }
        let handle = StoreHandle::from_boxed(self.factory.open(name)?);
        tracing::debug!(name, "opened store");
        stores.insert(name.to_owned(), handle.clone());
        Ok(handle)
    }

    /// Handle for `name` if it is already open.
    pub fn get(&self, name: &str) -> Option<StoreHandle> {
        self.stores.lock().get(name).cloned()
    }

    /// Names of open stores, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.stores.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.lock().is_empty()
    }

    /// Commit every open store.
    pub fn commit_all(&self) -> StoreResult<()> {
        for handle in self.handles() {
            handle.write().commit()?;
        }
        Ok(())
    }

    /// Compact every open store.
    pub fn compact_all(&self) -> StoreResult<()> {
        for handle in self.handles() {
            handle.write().compact()?;
        }
        Ok(())
    }

    /// Close and forget every store. Every store is attempted; the first
    /// failure is returned.
    pub fn close_all(&self) -> StoreResult<()> {
        let drained: Vec<(String, StoreHandle)> = self.stores.lock().drain().collect();
        let mut first_err = None;
        for (name, handle) in drained {
            if let Err(err) = handle.write().close() {
                tracing::warn!(name = %name, error = %err, "failed to close store");
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Snapshot of the handles, so no store lock is taken under the
    /// catalog lock.
    fn handles(&self) -> Vec<StoreHandle> {
        self.stores.lock().values().cloned().collect()
    }
}

impl fmt::Debug for StoreCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCatalog")
            .field("factory", &self.factory)
            .field("stores", &self.names())
            .finish()
    }
}

/// Check that `name` can address a backing map: a letter or `%`, then
/// letters and digits.
pub fn validate_name(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first == '%' || first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName {
            name: name.to_owned(),
        })
    }
}
