//! Subscript tuples.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::subscript::Subscript;

/// Most real-world references have four subscripts or fewer.
type Components = SmallVec<[Subscript; 4]>;

/// An ordered, variable-length tuple of subscripts.
///
/// The empty key addresses the unsubscripted root of a variable. Keys are
/// values: every operation returns a new key and leaves `self` untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubscriptKey(Components);

impl SubscriptKey {
    /// The root key (no subscripts).
    #[inline]
    pub fn root() -> Self {
        SubscriptKey(Components::new())
    }

    /// Build a key from subscripts.
    pub fn new<I, S>(subscripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Subscript>,
    {
        SubscriptKey(subscripts.into_iter().map(Into::into).collect())
    }

    /// Number of subscripts.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subscript at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Subscript> {
        self.0.get(index)
    }

    /// Last subscript, `None` for the root.
    #[inline]
    pub fn last(&self) -> Option<&Subscript> {
        self.0.last()
    }

    /// Iterate the subscripts in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Subscript> {
        self.0.iter()
    }

    /// The subscripts as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Subscript] {
        &self.0
    }

    /// A new key with `subscripts` appended.
    ///
    /// Appending nothing appends the `Null` sentinel instead, producing the
    /// probe that sits just before the first child of this key.
    #[must_use]
    pub fn append<I, S>(&self, subscripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Subscript>,
    {
        let mut components = self.0.clone();
        let before = components.len();
        components.extend(subscripts.into_iter().map(Into::into));
        if components.len() == before {
            components.push(Subscript::Null);
        }
        SubscriptKey(components)
    }

    /// Shorthand for appending the `Null` sentinel.
    #[must_use]
    pub fn probe(&self) -> Self {
        let mut components = self.0.clone();
        components.push(Subscript::Null);
        SubscriptKey(components)
    }

    /// The first `n` subscripts. `n` past the end returns the whole key.
    #[must_use]
    pub fn splice(&self, n: usize) -> Self {
        SubscriptKey(self.0.iter().take(n).cloned().collect())
    }

    /// The key one level up, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self.splice(self.len() - 1))
        }
    }

    /// Returns `true` if `prefix` matches the leading components of this key
    /// under collation equality. Every key starts with the root.
    pub fn starts_with(&self, prefix: &SubscriptKey) -> bool {
        prefix.len() <= self.len() && self.0.iter().zip(prefix.iter()).all(|(a, b)| a == b)
    }

    /// Returns `true` if this key lies strictly below `ancestor`.
    #[inline]
    pub fn is_descendant_of(&self, ancestor: &SubscriptKey) -> bool {
        self.len() > ancestor.len() && self.starts_with(ancestor)
    }

    /// Returns `true` if the last component is the `Null` sentinel.
    #[inline]
    pub fn is_probe(&self) -> bool {
        self.last().is_some_and(Subscript::is_null)
    }

    /// Strictly before `other` in collation order.
    #[inline]
    pub fn is_before(&self, other: &SubscriptKey) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Strictly after `other` in collation order.
    #[inline]
    pub fn is_after(&self, other: &SubscriptKey) -> bool {
        self.cmp(other) == Ordering::Greater
    }
}

impl Ord for SubscriptKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.cmp(b) {
                Ordering::Equal => {}
                decided => return decided,
            }
        }
        self.len().cmp(&other.len())
    }
}

impl PartialOrd for SubscriptKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SubscriptKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SubscriptKey {}

/// Renders as a MUMPS subscript list: `(1,"a")`. The root renders empty.
impl fmt::Display for SubscriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, subscript) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{subscript}")?;
        }
        f.write_str(")")
    }
}

impl<S: Into<Subscript>> FromIterator<S> for SubscriptKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SubscriptKey::new(iter)
    }
}

impl<'a> IntoIterator for &'a SubscriptKey {
    type Item = &'a Subscript;
    type IntoIter = std::slice::Iter<'a, Subscript>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests;
