/// Read-only view of one map entry.
///
/// Borrows the key and value from the map, so it cannot outlive the next
/// mutation of that map.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry<'a, K, V> {
    key: &'a K,
    value: &'a V,
}

impl<'a, K, V> Entry<'a, K, V> {
    pub(crate) fn new(key: &'a K, value: &'a V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn value(&self) -> &'a V {
        self.value
    }

    pub fn pair(&self) -> (&'a K, &'a V) {
        (self.key, self.value)
    }

    /// Owned copy of the entry, detached from the map.
    pub fn to_owned_pair(&self) -> (K, V)
    where
        K: Clone,
        V: Clone,
    {
        (self.key.clone(), self.value.clone())
    }
}

impl<K, V> Clone for Entry<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Entry<'_, K, V> {}
