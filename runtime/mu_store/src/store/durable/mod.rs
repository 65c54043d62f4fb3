//! Journal-backed store for global variables.
//!
//! The live map sits in memory; every mutation is appended to the journal
//! before it touches the map, so a crash can only lose writes that were
//! not yet synced. Opening a store replays its journal. After a failed
//! journal write the store refuses further mutations.

mod journal;

use std::path::{Path, PathBuf};

use mu_key::SubscriptKey;
use mu_value::Value;

use self::journal::{Journal, Record};
use super::{OrderedMap, Store};
use crate::errors::{StoreError, StoreResult};

/// When journal appends are forced to disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Sync after every mutation.
    #[default]
    EveryWrite,
    /// Sync once `max_pending` mutations have accumulated.
    Batched { max_pending: usize },
    /// Sync only on explicit `commit`.
    Manual,
}

impl CommitPolicy {
    fn should_sync(self, pending: usize) -> bool {
        match self {
            CommitPolicy::EveryWrite => true,
            CommitPolicy::Batched { max_pending } => pending >= max_pending,
            CommitPolicy::Manual => false,
        }
    }
}

/// Ordered map persisted through a write-ahead journal.
#[derive(Debug)]
pub struct DurableStore {
    name: String,
    path: PathBuf,
    map: OrderedMap,
    /// `None` once closed.
    journal: Option<Journal>,
}

impl DurableStore {
    /// Open the store for `name` under `dir`, replaying its journal.
    #[tracing::instrument(level = "debug", skip(dir, policy))]
    pub fn open(dir: &Path, name: &str, policy: CommitPolicy) -> StoreResult<Self> {
        std::fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))?;
        let path = dir.join(format!("{name}.journal"));
        let (journal, records) = Journal::open(&path, policy)?;
        let replayed = records.len();
        let mut map = OrderedMap::new();
        for record in records {
            apply(&mut map, record);
        }
        tracing::debug!(replayed, entries = map.len(), "opened durable store");
        Ok(DurableStore {
            name: name.to_owned(),
            path,
            map,
            journal: Some(journal),
        })
    }

    /// Location of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutations appended but not yet synced.
    pub fn pending(&self) -> usize {
        self.journal.as_ref().map_or(0, Journal::pending)
    }

    /// Whether a journal write has failed. A poisoned store still serves
    /// reads but rejects every mutation.
    pub fn is_poisoned(&self) -> bool {
        self.journal.as_ref().is_some_and(Journal::is_poisoned)
    }

    fn journal(&mut self) -> StoreResult<&mut Journal> {
        self.journal.as_mut().ok_or_else(|| StoreError::Closed {
            name: self.name.clone(),
        })
    }

    /// Journal first, then apply. A failed append leaves the map untouched.
    fn log_and_apply(&mut self, record: Record) -> StoreResult<()> {
        self.journal()?.append(&record)?;
        apply(&mut self.map, record);
        Ok(())
    }
}

fn apply(map: &mut OrderedMap, record: Record) {
    match record {
        Record::Put { key, value } => map.insert(key, value),
        Record::Remove { key } => {
            map.remove(&key);
        }
        Record::RemoveSubtree { prefix } => {
            map.remove_subtree(&prefix);
        }
    }
}

impl Store for DurableStore {
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
        self.log_and_apply(Record::Put { key, value })
    }

    fn remove(&mut self, key: &SubscriptKey) -> StoreResult<Option<Value>> {
        self.journal()?;
        let Some(old) = self.map.get(key).cloned() else {
            return Ok(None);
        };
        self.log_and_apply(Record::Remove { key: key.clone() })?;
        Ok(Some(old))
    }

    fn remove_subtree(&mut self, prefix: &SubscriptKey) -> StoreResult<usize> {
        self.journal()?;
        let doomed = self.map.subtree(prefix).len();
        if doomed > 0 {
            self.log_and_apply(Record::RemoveSubtree {
                prefix: prefix.clone(),
            })?;
        }
        Ok(doomed)
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

    fn commit(&mut self) -> StoreResult<()> {
        self.journal()?.sync()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %self.name))]
    fn compact(&mut self) -> StoreResult<()> {
        let journal = self.journal.as_mut().ok_or_else(|| StoreError::Closed {
            name: self.name.clone(),
        })?;
        let written = journal.rewrite(self.map.iter())?;
        tracing::debug!(written, "compacted journal");
        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        if let Some(mut journal) = self.journal.take() {
            journal.sync()?;
            tracing::debug!(name = %self.name, "closed durable store");
        }
        self.map.clear();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.journal.is_none()
    }
}

impl Drop for DurableStore {
    fn drop(&mut self) {
        if let Some(journal) = self.journal.as_mut().filter(|journal| !journal.is_poisoned()) {
            if let Err(err) = journal.sync() {
                tracing::warn!(name = %self.name, error = %err, "failed to sync journal on drop");
            }
        }
    }
}
