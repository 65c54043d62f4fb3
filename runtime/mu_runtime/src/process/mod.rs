//! Runtime and processes.
//!
//! The `Runtime` is the explicit owner of the global store catalog: build
//! one at startup, hand out `Process`es to worker threads, and call
//! `shutdown` once they are done. There is no process-wide singleton.
//!
//! Concurrent processes writing the same global race; the last write wins.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use mu_store::{
    validate_name, DurableFactory, MemoryFactory, StoreCatalog, VariableKind, VariableNode,
};

use crate::config::{RuntimeConfig, StorageKind};
use crate::errors::RuntimeResult;
use crate::scope::ScopeStack;

/// Owns the global catalog shared by every process.
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    catalog: Arc<StoreCatalog>,
    next_pid: AtomicU32,
}

impl Runtime {
    #[tracing::instrument(level = "debug", skip_all, fields(storage = ?config.storage))]
    pub fn new(config: RuntimeConfig) -> Self {
        let catalog = match &config.storage {
            StorageKind::Memory => StoreCatalog::new(MemoryFactory),
            StorageKind::Durable { data_dir } => {
                StoreCatalog::new(DurableFactory::new(data_dir.clone(), config.commit_policy))
            }
        };
        tracing::debug!("runtime started");
        Runtime {
            config,
            catalog: Arc::new(catalog),
            next_pid: AtomicU32::new(1),
        }
    }

    /// A runtime whose globals live only in memory.
    pub fn in_memory() -> Self {
        Self::new(RuntimeConfig::default())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<StoreCatalog> {
        &self.catalog
    }

    /// Start a process with an empty scope stack.
    pub fn process(&self) -> Process {
        let id = self.next_pid.fetch_add(1, Ordering::Relaxed);
        Process {
            id,
            catalog: Arc::clone(&self.catalog),
            scopes: ScopeStack::new(),
        }
    }

    /// Root node of global `^name`.
    pub fn global(&self, name: &str) -> RuntimeResult<VariableNode> {
        global(&self.catalog, name)
    }

    /// Make every global write so far durable.
    pub fn commit(&self) -> RuntimeResult<()> {
        self.catalog.commit_all()?;
        Ok(())
    }

    /// Commit, optionally compact, then close every global store.
    ///
    /// Nodes of closed stores must not be used afterwards: reads see
    /// nothing and writes fail.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn shutdown(&self) -> RuntimeResult<()> {
        self.catalog.commit_all()?;
        if self.config.compact_on_shutdown {
            self.catalog.compact_all()?;
        }
        self.catalog.close_all()?;
        tracing::debug!("runtime shut down");
        Ok(())
    }
}

/// One single-threaded unit of execution.
///
/// Globals are shared with every other process of the same runtime; locals
/// are private to this process and scoped by its frame stack.
#[derive(Debug)]
pub struct Process {
    id: u32,
    catalog: Arc<StoreCatalog>,
    scopes: ScopeStack,
}

impl Process {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Root node of global `^name`.
    pub fn global(&self, name: &str) -> RuntimeResult<VariableNode> {
        global(&self.catalog, name)
    }

    /// Root node of local `name` as seen from the current frame.
    pub fn local(&mut self, name: &str) -> RuntimeResult<VariableNode> {
        validate_name(name)?;
        Ok(self.scopes.lookup(name))
    }

    /// `NEW A,B`: shadow `names` until the frame is popped.
    pub fn new_frame<I, S>(&mut self, names: I) -> RuntimeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = checked_names(names)?;
        self.scopes.push(names, false);
        Ok(())
    }

    /// `NEW`: shadow every local until the frame is popped.
    pub fn new_all(&mut self) {
        self.scopes.push(std::iter::empty::<&str>(), true);
    }

    /// `NEW (A,B)`: shadow every local except `names`.
    pub fn new_all_except<I, S>(&mut self, names: I) -> RuntimeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = checked_names(names)?;
        self.scopes.push_exclusive_except(names);
        Ok(())
    }

    /// Leave the current frame. Returns `false` at the outermost frame.
    pub fn pop_frame(&mut self) -> bool {
        self.scopes.pop()
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }
}

fn global(catalog: &StoreCatalog, name: &str) -> RuntimeResult<VariableNode> {
    let store = catalog.open(name)?;
    Ok(VariableNode::new(name, VariableKind::Global, store))
}

fn checked_names<I, S>(names: I) -> RuntimeResult<Vec<S>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| -> RuntimeResult<S> {
            validate_name(name.as_ref())?;
            Ok(name)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests;
