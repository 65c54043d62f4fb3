//! Mu Key - subscript tuples and their collation.
//!
//! Every node of a MUMPS variable is addressed by a variable-length tuple of
//! subscripts. Sibling iteration, existence checks and subtree removal all
//! rely on one canonical total order over those tuples:
//!
//! - components compare pairwise up to the shorter length;
//! - the `Null` probe sentinel precedes every real subscript;
//! - numbers compare numerically and precede all strings;
//! - strings compare by code point (uppercase before lowercase);
//! - when every shared component ties, the shorter tuple comes first.
//!
//! A consequence of the last rule is that the descendants of a key form one
//! contiguous run immediately after it, which the stores rely on.

mod key;
mod subscript;

pub use key::SubscriptKey;
pub use subscript::Subscript;
