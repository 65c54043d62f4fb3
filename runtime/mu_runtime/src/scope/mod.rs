//! Dynamic scoping for local variables.
//!
//! Frames live in an arena (`Vec<Frame>`) linked by parent index, with the
//! ROOT frame permanently at index 0. ROOT is exclusive, so every lookup
//! terminates there at the latest.
//!
//! A `NEW A,B` frame binds `A` and `B` to fresh empty nodes up front and
//! defers everything else to its parent. A `NEW` (exclusive) frame creates
//! a fresh binding for any name it has not seen, except the names it was
//! told to leave to the parent (`NEW (A,B)`).

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use mu_store::{StoreHandle, VariableKind, VariableNode};

type FrameId = usize;

const ROOT: FrameId = 0;

#[derive(Debug)]
struct Frame {
    bindings: FxHashMap<Arc<str>, VariableNode>,
    exclusive: bool,
    /// Names an exclusive frame still resolves through its parent.
    exempt: FxHashSet<Arc<str>>,
    parent: Option<FrameId>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            bindings: FxHashMap::default(),
            exclusive: true,
            exempt: FxHashSet::default(),
            parent: None,
        }
    }

    /// Whether a miss on `name` binds here rather than asking the parent.
    fn binds_on_miss(&self, name: &str) -> bool {
        self.parent.is_none() || (self.exclusive && !self.exempt.contains(name))
    }
}

/// Per-process chain of local-variable frames.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Frame::root()],
        }
    }

    /// Number of frames, counting ROOT.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn current(&self) -> FrameId {
        self.frames.len() - 1
    }

    /// Push a frame binding each of `names` to a fresh empty local.
    pub fn push<I, S>(&mut self, names: I, exclusive: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frame = Frame {
            bindings: FxHashMap::default(),
            exclusive,
            exempt: FxHashSet::default(),
            parent: Some(self.current()),
        };
        for name in names {
            let name = name.as_ref();
            frame.bindings.insert(Arc::from(name), fresh_local(name));
        }
        tracing::trace!(depth = self.depth() + 1, exclusive, "push frame");
        self.frames.push(frame);
    }

    /// Push an exclusive frame that still resolves `names` through the
    /// parent.
    pub fn push_exclusive_except<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let frame = Frame {
            bindings: FxHashMap::default(),
            exclusive: true,
            exempt: names.into_iter().map(|name| Arc::from(name.as_ref())).collect(),
            parent: Some(self.current()),
        };
        tracing::trace!(depth = self.depth() + 1, "push exclusive frame");
        self.frames.push(frame);
    }

    /// Discard the current frame. Returns `false` at ROOT, which stays.
    pub fn pop(&mut self) -> bool {
        if self.current() == ROOT {
            return false;
        }
        self.frames.pop();
        tracing::trace!(depth = self.depth(), "pop frame");
        true
    }

    /// Resolve `name`, creating a fresh local in the first frame that
    /// owns misses. Never fails.
    pub fn lookup(&mut self, name: &str) -> VariableNode {
        let mut id = self.current();
        loop {
            let frame = &self.frames[id];
            if let Some(node) = frame.bindings.get(name) {
                return node.clone();
            }
            match frame.parent {
                Some(parent) if !frame.binds_on_miss(name) => id = parent,
                _ => break,
            }
        }
        let node = fresh_local(name);
        self.frames[id]
            .bindings
            .insert(Arc::from(name), node.clone());
        node
    }

    /// Whether the current frame itself holds a binding for `name`.
    pub fn is_bound_here(&self, name: &str) -> bool {
        self.frames[self.current()].bindings.contains_key(name)
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_local(name: &str) -> VariableNode {
    VariableNode::new(name, VariableKind::Local, StoreHandle::memory(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests;
