//! Intrinsic functions over variable nodes.
//!
//! Thin glue from the language-level intrinsics (`$DATA`, `$GET`, `$ORDER`,
//! `$QUERY`, `$INCREMENT`) and the `KILL`/`ZKILL`/`MERGE` commands onto the
//! `VariableNode` contract, returning plain `Value`s the way an interpreter
//! would push them.

use mu_key::Subscript;
use mu_store::VariableNode;
use mu_value::{Coerced, Value};

use crate::errors::RuntimeResult;

/// Traversal direction for `$ORDER`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `1` is forward, `-1` backward; anything else is rejected.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }
}

/// `$DATA`: 0, 1, 10 or 11.
pub fn data(node: &VariableNode) -> Value {
    Value::Int(node.data().code())
}

/// `$GET`: the node's value, or the empty string.
pub fn get(node: &VariableNode) -> Value {
    node.get().unwrap_or_default()
}

/// `$GET` with an explicit default.
pub fn get_or(node: &VariableNode, default: &Value) -> Value {
    node.get().unwrap_or_else(|| default.clone())
}

/// `$ORDER`: the next (or previous) sibling subscript with data, or the
/// empty string when there is none.
///
/// A trailing empty-string subscript starts the walk before the first
/// child (or after the last one, going backward).
pub fn order(node: &VariableNode, direction: Direction) -> Value {
    let start = traversal_start(node);
    let found = match direction {
        Direction::Forward => start.next_key(),
        Direction::Backward => start.prev_key(),
    };
    found
        .and_then(|key| key.last().map(Subscript::to_value))
        .unwrap_or_default()
}

fn traversal_start(node: &VariableNode) -> VariableNode {
    match (node.path().last(), node.parent()) {
        (Some(last), Some(parent)) if last.is_empty_string() => parent.probe(),
        _ => node.clone(),
    }
}

/// `$QUERY`: reference of the next node holding a value, in depth-first
/// order, or the empty string at the end.
pub fn query(node: &VariableNode) -> Value {
    node.query()
        .map_or_else(Value::empty, |next| Value::string(next.reference()))
}

/// `$INCREMENT`: add `delta` to the node's numeric view (undefined counts
/// as zero), store the sum and return it.
///
/// The sum is stored as an integer when it has no fractional part. The read
/// and the write are separate store operations, so concurrent increments of
/// one node from different processes can lose updates.
pub fn increment(node: &VariableNode, delta: &Value) -> RuntimeResult<Value> {
    let current = Coerced::new(node.get().as_ref()).number();
    let sum = current.add(delta.to_number()).normalized();
    Ok(node.set(Value::number(sum))?)
}

/// `KILL`: remove the node and everything below it.
pub fn kill(node: &VariableNode) -> RuntimeResult<()> {
    node.kill()?;
    Ok(())
}

/// `ZKILL`: remove only the node's own value.
pub fn zkill(node: &VariableNode) -> RuntimeResult<()> {
    node.unset()?;
    Ok(())
}

/// `MERGE target=source`.
pub fn merge(target: &VariableNode, source: &VariableNode) -> RuntimeResult<()> {
    target.merge_from(source)?;
    Ok(())
}

/// The `]]` operator: does `left` collate after `right` as a subscript?
pub fn sorts_after(left: &Value, right: &Value) -> Value {
    Value::truth(Subscript::from(left) > Subscript::from(right))
}
