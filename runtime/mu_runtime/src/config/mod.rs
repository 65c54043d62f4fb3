//! Runtime configuration.

use std::path::PathBuf;

use mu_store::CommitPolicy;

use crate::errors::{RuntimeError, RuntimeResult};

/// Directory holding one journal per global. Setting it selects durable
/// storage.
pub const DATA_DIR_VAR: &str = "MU_DATA_DIR";

/// Batch size for journal syncs. Unset means sync every write, `0` means
/// sync only on explicit commit.
pub const COMMIT_BATCH_VAR: &str = "MU_COMMIT_BATCH";

/// Where globals live.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// Globals vanish with the runtime.
    #[default]
    Memory,
    /// Globals are journaled under `data_dir`.
    Durable { data_dir: PathBuf },
}

/// Configuration for a `Runtime`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Backing for globals.
    pub storage: StorageKind,
    /// When durable journals sync.
    pub commit_policy: CommitPolicy,
    /// Rewrite journals to their minimal form during shutdown.
    pub compact_on_shutdown: bool,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Shorthand for durable storage under `data_dir`.
    #[must_use]
    pub fn durable(self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage(StorageKind::Durable {
            data_dir: data_dir.into(),
        })
    }

    #[must_use]
    pub fn commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    #[must_use]
    pub fn compact_on_shutdown(mut self, enabled: bool) -> Self {
        self.compact_on_shutdown = enabled;
        self
    }

    /// Read `MU_DATA_DIR` and `MU_COMMIT_BATCH` from the environment.
    pub fn from_env() -> RuntimeResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RuntimeResult<Self> {
        let mut config = RuntimeConfig::default();
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            if dir.trim().is_empty() {
                return Err(RuntimeError::config(format!("{DATA_DIR_VAR} is empty")));
            }
            config = config.durable(dir);
        }
        if let Some(batch) = lookup(COMMIT_BATCH_VAR) {
            let max_pending: usize = batch.trim().parse().map_err(|_| {
                RuntimeError::config(format!(
                    "{COMMIT_BATCH_VAR} must be a non-negative integer, got `{batch}`"
                ))
            })?;
            config.commit_policy = match max_pending {
                0 => CommitPolicy::Manual,
                1 => CommitPolicy::EveryWrite,
                n => CommitPolicy::Batched { max_pending: n },
            };
        }
        Ok(config)
    }
}
