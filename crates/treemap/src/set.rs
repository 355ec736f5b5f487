use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::error::Result;
use crate::iter::{IntoIter, Keys};
use crate::map::{natural_order, Insertion, TreeMap};
use crate::snapshot::Snapshot;

/// Ordered set: a [`TreeMap`] with unit values.
///
/// Error rules match the map: queries on an empty set report
/// [`TreeError::Empty`](crate::TreeError::Empty), unmet key-relative queries
/// report [`TreeError::NotFound`](crate::TreeError::NotFound).
pub struct TreeSet<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    map: TreeMap<K, (), C>,
}

impl<K: Ord> TreeSet<K> {
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K>)
    }
}

impl<K: Ord> Default for TreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            map: TreeMap::with_comparator(comparator),
        }
    }

    /// Installs the hook run on every element the set destroys.
    pub fn with_key_destructor<F>(self, destructor: F) -> Self
    where
        F: FnMut(K) + Send + 'static,
    {
        Self {
            map: self.map.with_key_destructor(destructor),
        }
    }

    /// Adds `key`; returns `false` if an equal element was already present,
    /// in which case the set is unchanged and `key` is dropped.
    pub fn add(&mut self, key: K) -> Result<bool> {
        Ok(match self.map.put(key, ())? {
            Insertion::Inserted => true,
            Insertion::Replaced(()) => false,
        })
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes `key`, passing the stored element to the key destructor.
    pub fn remove(&mut self, key: &K) -> Result<()> {
        self.map.remove(key)
    }

    pub fn size(&self) -> usize {
        self.map.size()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn first(&self) -> Result<&K> {
        self.map.first()
    }

    pub fn last(&self) -> Result<&K> {
        self.map.last()
    }

    pub fn floor(&self, key: &K) -> Result<&K> {
        self.map.floor(key)
    }

    pub fn ceiling(&self, key: &K) -> Result<&K> {
        self.map.ceiling(key)
    }

    pub fn lower(&self, key: &K) -> Result<&K> {
        self.map.lower(key)
    }

    pub fn higher(&self, key: &K) -> Result<&K> {
        self.map.higher(key)
    }

    pub fn poll_first(&mut self) -> Result<K> {
        self.map.poll_first().map(|(k, ())| k)
    }

    pub fn poll_last(&mut self) -> Result<K> {
        self.map.poll_last().map(|(k, ())| k)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn destroy(self) {
        self.map.destroy();
    }

    /// Elements in ascending order.
    pub fn to_array(&self) -> Result<Vec<&K>> {
        self.map.key_array()
    }

    /// Snapshot iterator over the elements in ascending order.
    pub fn iterator(&self) -> Result<Snapshot<&K>> {
        self.to_array().map(Snapshot::new)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.map.keys()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        self.map.assert_valid()
    }
}

impl<K: Debug, C> Debug for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> Extend<K> for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K: Ord> FromIterator<K> for TreeSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.extend(iter);
        set
    }
}

impl<'a, K, C> IntoIterator for &'a TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Keys<'a, K, ()> {
        self.iter()
    }
}

/// Owning iterator produced by `TreeSet::into_iter`.
pub struct SetIntoIter<K> {
    inner: IntoIter<K, ()>,
}

impl<K> Iterator for SetIntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for SetIntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<K> ExactSizeIterator for SetIntoIter<K> {}

impl<K, C> IntoIterator for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = K;
    type IntoIter = SetIntoIter<K>;

    fn into_iter(self) -> SetIntoIter<K> {
        SetIntoIter {
            inner: self.map.into_iter(),
        }
    }
}
