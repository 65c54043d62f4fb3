//! Variable nodes.
//!
//! A `VariableNode` is a lightweight view `(name, path, store)` addressing
//! one position in a variable's tree. Nodes are cheap to clone and create;
//! all state lives in the store, so two nodes with equal name and path
//! observe each other's writes.
//!
//! # Traversal
//!
//! Siblings are found by neighbor queries on the flat ordered map. Since a
//! key's descendants sort contiguously right after it, the next sibling of
//! `path` is the first key past the last descendant of `path`, cut back to
//! `path`'s length. Results that leave the parent's subtree are discarded.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use mu_key::{Subscript, SubscriptKey};
use mu_value::Value;

use crate::errors::{NodeError, NodeResult};
use crate::store::{Store, StoreHandle};

/// Whether a variable outlives its process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// `^NAME`: shared and durable.
    Global,
    /// `NAME`: process-local and ephemeral.
    Local,
}

/// The four states reported by `$DATA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataState {
    Undefined,
    ValueOnly,
    ChildrenOnly,
    ValueAndChildren,
}

impl DataState {
    pub fn new(defined: bool, has_descendants: bool) -> Self {
        match (defined, has_descendants) {
            (false, false) => DataState::Undefined,
            (true, false) => DataState::ValueOnly,
            (false, true) => DataState::ChildrenOnly,
            (true, true) => DataState::ValueAndChildren,
        }
    }

    /// The conventional numeric code: 0, 1, 10 or 11.
    pub fn code(self) -> i64 {
        match self {
            DataState::Undefined => 0,
            DataState::ValueOnly => 1,
            DataState::ChildrenOnly => 10,
            DataState::ValueAndChildren => 11,
        }
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        matches!(self, DataState::ValueOnly | DataState::ValueAndChildren)
    }

    #[inline]
    pub fn has_descendants(self) -> bool {
        matches!(self, DataState::ChildrenOnly | DataState::ValueAndChildren)
    }
}

/// A view onto one position of a variable.
#[derive(Clone)]
pub struct VariableNode {
    name: Arc<str>,
    kind: VariableKind,
    path: SubscriptKey,
    store: StoreHandle,
}

impl VariableNode {
    /// The root of variable `name` backed by `store`.
    pub fn new(name: impl Into<Arc<str>>, kind: VariableKind, store: StoreHandle) -> Self {
        VariableNode {
            name: name.into(),
            kind,
            path: SubscriptKey::root(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn path(&self) -> &SubscriptKey {
        &self.path
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Same variable, different position.
    #[must_use]
    pub fn at(&self, path: SubscriptKey) -> Self {
        VariableNode {
            name: Arc::clone(&self.name),
            kind: self.kind,
            path,
            store: self.store.clone(),
        }
    }

    /// The node `subscripts` below this one. No subscripts yields this node.
    #[must_use]
    pub fn child<I, S>(&self, subscripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Subscript>,
    {
        let path = self
            .path
            .iter()
            .cloned()
            .chain(subscripts.into_iter().map(Into::into))
            .collect();
        self.at(path)
    }

    /// One level up, `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.path.parent().map(|path| self.at(path))
    }

    /// The probe below this node, for starting a child traversal.
    #[must_use]
    pub fn probe(&self) -> Self {
        self.at(self.path.probe())
    }

    /// The direct value, if any.
    pub fn get(&self) -> Option<Value> {
        self.store.read().get(&self.path)
    }

    /// The direct value, failing if there is none.
    pub fn value(&self) -> NodeResult<Value> {
        self.get().ok_or_else(|| NodeError::Undefined {
            reference: self.reference(),
        })
    }

    /// Store `value` at this node, returning it.
    pub fn set(&self, value: impl Into<Value>) -> NodeResult<Value> {
        if self.path.iter().any(Subscript::is_null) {
            return Err(NodeError::ProbeWrite {
                reference: self.reference(),
            });
        }
        let value = value.into();
        tracing::trace!(node = %self, value = %value, "set");
        self.store.write().put(self.path.clone(), value.clone())?;
        Ok(value)
    }

    /// Remove this node's own value; descendants stay.
    pub fn unset(&self) -> NodeResult<()> {
        self.store.write().remove(&self.path)?;
        Ok(())
    }

    /// Remove this node and its whole subtree. Returns the entries removed.
    pub fn kill(&self) -> NodeResult<usize> {
        let removed = self.store.write().remove_subtree(&self.path)?;
        tracing::trace!(node = %self, removed, "kill");
        Ok(removed)
    }

    pub fn is_defined(&self) -> bool {
        self.store.read().contains(&self.path)
    }

    pub fn has_descendants(&self) -> bool {
        has_descendants(&**self.store.read(), &self.path)
    }

    pub fn data(&self) -> DataState {
        let store = self.store.read();
        DataState::new(store.contains(&self.path), has_descendants(&**store, &self.path))
    }

    /// The next sibling with data, as a full path.
    ///
    /// A probe path yields the first child of its parent. The root has no
    /// siblings.
    pub fn next_key(&self) -> Option<SubscriptKey> {
        next_sibling(&**self.store.read(), &self.path)
    }

    /// The previous sibling with data, as a full path.
    ///
    /// A probe path yields the last child of its parent.
    pub fn prev_key(&self) -> Option<SubscriptKey> {
        prev_sibling(&**self.store.read(), &self.path)
    }

    /// Lazily iterate the children of this node, in collation order.
    ///
    /// Each step is a fresh neighbor query, so concurrent writes are seen
    /// as they land.
    pub fn children(&self) -> Children {
        Children {
            store: self.store.clone(),
            cursor: Some(self.path.probe()),
        }
    }

    /// The next node in depth-first order that holds a value, anywhere in
    /// the variable.
    pub fn query(&self) -> Option<VariableNode> {
        let next = self.store.read().higher(&self.path);
        next.map(|path| self.at(path))
    }

    /// Copy every value at or below `source` to the same relative position
    /// below this node. Existing values at the target are overwritten, the
    /// rest of the target is left alone. Returns the entries copied.
    pub fn merge_from(&self, source: &VariableNode) -> NodeResult<usize> {
        if self.store.ptr_eq(&source.store) {
            if self.path == source.path {
                return Ok(0);
            }
            if self.path.starts_with(&source.path) || source.path.starts_with(&self.path) {
                return Err(NodeError::MergeOverlap {
                    from: source.reference(),
                    into: self.reference(),
                });
            }
        }
        let entries = source.store.read().subtree(&source.path);
        let depth = source.path.len();
        let mut store = self.store.write();
        for (key, value) in &entries {
            let target = self.path.iter().chain(key.iter().skip(depth)).collect();
            store.put(target, value.clone())?;
        }
        tracing::trace!(from = %source, into = %self, copied = entries.len(), "merge");
        Ok(entries.len())
    }

    /// Source-style reference: `^X(1,"a")` or `Y`.
    pub fn reference(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VariableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == VariableKind::Global {
            f.write_str("^")?;
        }
        write!(f, "{}{}", self.name, self.path)
    }
}

impl fmt::Debug for VariableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VariableNode").field(&self.to_string()).finish()
    }
}

/// Lazy iterator over a node's children. Yields full child paths.
#[derive(Debug)]
pub struct Children {
    store: StoreHandle,
    cursor: Option<SubscriptKey>,
}

impl Iterator for Children {
    type Item = SubscriptKey;

    fn next(&mut self) -> Option<SubscriptKey> {
        let cursor = self.cursor.take()?;
        let found = next_sibling(&**self.store.read(), &cursor)?;
        self.cursor = Some(found.clone());
        Some(found)
    }
}

impl FusedIterator for Children {}

fn has_descendants(store: &dyn Store, path: &SubscriptKey) -> bool {
    store
        .higher(path)
        .is_some_and(|next| next.is_descendant_of(path))
}

fn next_sibling(store: &dyn Store, path: &SubscriptKey) -> Option<SubscriptKey> {
    let parent = path.parent()?;
    let start = store.last_under(path).unwrap_or_else(|| path.clone());
    let found = store.higher(&start)?;
    at_level(found, &parent, path.len())
}

fn prev_sibling(store: &dyn Store, path: &SubscriptKey) -> Option<SubscriptKey> {
    let parent = path.parent()?;
    let found = if path.is_probe() {
        store.last_under(&parent)?
    } else {
        store.lower(path)?
    };
    at_level(found, &parent, path.len())
}

/// Cut `found` back to `len` components if it still lies under `parent`.
fn at_level(found: SubscriptKey, parent: &SubscriptKey, len: usize) -> Option<SubscriptKey> {
    (found.len() >= len && found.starts_with(parent)).then(|| found.splice(len))
}
