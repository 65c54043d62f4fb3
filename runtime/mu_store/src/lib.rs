//! Mu Store - backing stores and variable nodes for the mu runtime.
//!
//! # Architecture
//!
//! - `Store`: the ordered-map contract every backing store satisfies
//! - `MemoryStore`: ephemeral store backing process-local variables
//! - `DurableStore`: journal-backed store backing globals across restarts
//! - `StoreCatalog`: name to store map; one backing map per variable name
//! - `VariableNode`: cheap (name, path, store) view; the public data API
//!
//! Both store kinds compose the same in-memory `OrderedMap`; the durable
//! store adds a write-ahead journal in front of it.

mod catalog;
mod errors;
mod node;
mod store;

pub use catalog::{validate_name, DurableFactory, MemoryFactory, StoreCatalog, StoreFactory};
pub use errors::{NodeError, NodeResult, StoreError, StoreResult};
pub use node::{Children, DataState, VariableKind, VariableNode};
pub use store::{CommitPolicy, DurableStore, MemoryStore, Store, StoreHandle};
