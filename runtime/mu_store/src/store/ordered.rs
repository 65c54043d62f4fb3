//! The in-memory ordered map both store kinds build on.

use std::collections::BTreeMap;
use std::ops::Bound;

use mu_key::SubscriptKey;
use mu_value::Value;

type Range<'a> = (Bound<&'a SubscriptKey>, Bound<&'a SubscriptKey>);

#[derive(Clone, Debug, Default)]
pub(crate) struct OrderedMap {
    entries: BTreeMap<SubscriptKey, Value>,
}

impl OrderedMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &SubscriptKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub(crate) fn contains(&self, key: &SubscriptKey) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn insert(&mut self, key: SubscriptKey, value: Value) {
        self.entries.insert(key, value);
    }

    pub(crate) fn remove(&mut self, key: &SubscriptKey) -> Option<Value> {
        self.entries.remove(key)
    }

    pub(crate) fn remove_subtree(&mut self, prefix: &SubscriptKey) -> usize {
        let doomed: Vec<SubscriptKey> = self
            .range_from(Bound::Included(prefix))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            self.entries.remove(key);
        }
        doomed.len()
    }

    pub(crate) fn ceiling(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.range_from(Bound::Included(key)).next().map(|(k, _)| k.clone())
    }

    pub(crate) fn higher(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        self.range_from(Bound::Excluded(key)).next().map(|(k, _)| k.clone())
    }

    pub(crate) fn floor(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        let range: Range<'_> = (Bound::Unbounded, Bound::Included(key));
        self.entries.range::<SubscriptKey, _>(range).next_back().map(|(k, _)| k.clone())
    }

    pub(crate) fn lower(&self, key: &SubscriptKey) -> Option<SubscriptKey> {
        let range: Range<'_> = (Bound::Unbounded, Bound::Excluded(key));
        self.entries.range::<SubscriptKey, _>(range).next_back().map(|(k, _)| k.clone())
    }

    /// Descendants are contiguous right after their ancestor, so the last
    /// one is the final entry of the run that still starts with `prefix`.
    pub(crate) fn last_under(&self, prefix: &SubscriptKey) -> Option<SubscriptKey> {
        self.range_from(Bound::Excluded(prefix))
            .take_while(|(key, _)| key.starts_with(prefix))
            .last()
            .map(|(key, _)| key.clone())
    }

    pub(crate) fn subtree(&self, prefix: &SubscriptKey) -> Vec<(SubscriptKey, Value)> {
        self.range_from(Bound::Included(prefix))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&SubscriptKey, &Value)> {
        self.entries.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn range_from<'a>(
        &'a self,
        start: Bound<&'a SubscriptKey>,
    ) -> impl Iterator<Item = (&'a SubscriptKey, &'a Value)> + 'a {
        let range: Range<'a> = (start, Bound::Unbounded);
        self.entries.range::<SubscriptKey, _>(range)
    }
}
