use std::cmp::Ordering;
use std::fmt::{self, Debug};

use log::trace;
use rb_forest::red_black::{self, RbNode};
use rb_forest::util::{self as links, Seek};
use rb_forest::KvNode;

use crate::entry::Entry;
use crate::error::{Result, TreeError};
use crate::iter::{into_sorted_pairs, IntoIter, Iter, Keys, Values};
use crate::snapshot::{try_collect, Snapshot};

/// Total order over keys, for comparators picked at runtime
/// (`Box<Comparator<K>>`).
///
/// `Less` when `a < b`, `Equal` when the keys are the same entry, `Greater`
/// when `a > b`. Must stay consistent for the lifetime of a tree.
pub type Comparator<K> = dyn Fn(&K, &K) -> Ordering;

/// Hook run on a key when its entry is destroyed.
pub type KeyDestructor<K> = Box<dyn FnMut(K) + Send>;

/// Default comparator for `K: Ord`.
pub fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

fn key_of<K, V>(node: &RbNode<K, V>) -> &K {
    &node.k
}

/// Outcome of [`TreeMap::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion<V> {
    /// A new entry was linked into the tree.
    Inserted,
    /// The key already existed; holds the value it had before.
    Replaced(V),
}

impl<V> Insertion<V> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Insertion::Replaced(_))
    }

    pub fn previous(self) -> Option<V> {
        match self {
            Insertion::Inserted => None,
            Insertion::Replaced(v) => Some(v),
        }
    }
}

/// Ordered map on a red-black tree, keyed by a caller-supplied total order.
///
/// Besides lookup and removal it answers navigation queries (`floor`,
/// `ceiling`, `lower`, `higher`, `first`, `last`) and can poll either end.
/// Queries against an empty map fail with [`TreeError::Empty`]; key-relative
/// queries with no answer on a populated map fail with
/// [`TreeError::NotFound`].
///
/// Nodes live in a dense arena: removing an entry moves the last arena slot
/// into the hole, so the arena length always equals the entry count.
///
/// An optional key destructor runs exactly once for every key the map
/// destroys: on [`remove`](Self::remove), [`clear`](Self::clear),
/// [`destroy`](Self::destroy), and when the map is dropped. Keys handed back
/// to the caller (`poll_*`, `into_iter`) are not passed to it.
pub struct TreeMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: Vec<RbNode<K, V>>,
    root: Option<u32>,
    comparator: C,
    key_destructor: Option<KeyDestructor<K>>,
}

impl<K, V> TreeMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K>)
    }
}

impl<K, V> Default for TreeMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Empty map ordered by `comparator`. Any closure works; use
    /// `Box<Comparator<K>>` when the order is chosen at runtime.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
            key_destructor: None,
        }
    }

    /// Installs the hook run on every key the map destroys.
    pub fn with_key_destructor<F>(mut self, destructor: F) -> Self
    where
        F: FnMut(K) + Send + 'static,
    {
        self.key_destructor = Some(Box::new(destructor));
        self
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn size(&self) -> usize {
        self.arena.len()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn ensure_populated(&self) -> Result<()> {
        if self.root.is_none() {
            Err(TreeError::Empty)
        } else {
            Ok(())
        }
    }

    fn find_index(&self, key: &K) -> Option<u32> {
        links::find(&self.arena, self.root, key, key_of, &self.comparator)
    }

    fn seek_index(&self, key: &K, mode: Seek) -> Result<u32> {
        self.ensure_populated()?;
        links::seek(&self.arena, self.root, key, mode, key_of, &self.comparator).ok_or(TreeError::NotFound)
    }

    fn key_at(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    fn entry_at(&self, idx: u32) -> Entry<'_, K, V> {
        let node = &self.arena[idx as usize];
        Entry::new(&node.k, &node.v)
    }

    fn push_node(&mut self, key: K, value: V) -> Result<u32> {
        if self.arena.len() >= u32::MAX as usize {
            log::debug!("arena index space exhausted at {} nodes", self.arena.len());
            return Err(TreeError::AllocFailure);
        }
        self.arena.try_reserve(1)?;
        let idx = self.arena.len() as u32;
        self.arena.push(RbNode::new(key, value));
        Ok(idx)
    }

    /// Associates `value` with `key`.
    ///
    /// If an equal key is present its value is swapped out and returned in
    /// [`Insertion::Replaced`]; the stored key is kept and the new `key` is
    /// dropped. Otherwise a new node is linked and the tree rebalanced.
    ///
    /// On [`TreeError::AllocFailure`] the map is unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<Insertion<V>> {
        let Some(mut curr) = self.root else {
            let idx = self.push_node(key, value)?;
            self.root = red_black::insert(&mut self.arena, None, idx, &self.comparator);
            trace!("linked root node #{idx}");
            return Ok(Insertion::Inserted);
        };

        loop {
            let node = &self.arena[curr as usize];
            let (cmp, next) = match (self.comparator)(&key, &node.k) {
                Ordering::Equal => {
                    let previous = self.arena[curr as usize].set_value(value);
                    return Ok(Insertion::Replaced(previous));
                }
                Ordering::Less => (Ordering::Less, node.l),
                Ordering::Greater => (Ordering::Greater, node.r),
            };
            if let Some(next) = next {
                curr = next;
                continue;
            }

            let idx = self.push_node(key, value)?;
            self.root = if cmp == Ordering::Less {
                red_black::insert_left(&mut self.arena, self.root, idx, curr)
            } else {
                red_black::insert_right(&mut self.arena, self.root, idx, curr)
            };
            trace!("linked node #{idx} under #{curr}, size {}", self.arena.len());
            return Ok(Insertion::Inserted);
        }
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.ensure_populated()?;
        let idx = self.find_index(key).ok_or(TreeError::NotFound)?;
        Ok(&self.arena[idx as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.ensure_populated()?;
        let idx = self.find_index(key).ok_or(TreeError::NotFound)?;
        Ok(self.arena[idx as usize].value_mut())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn first(&self) -> Result<&K> {
        self.first_entry().map(|e| e.key())
    }

    pub fn last(&self) -> Result<&K> {
        self.last_entry().map(|e| e.key())
    }

    pub fn first_entry(&self) -> Result<Entry<'_, K, V>> {
        let idx = links::first(&self.arena, self.root).ok_or(TreeError::Empty)?;
        Ok(self.entry_at(idx))
    }

    pub fn last_entry(&self) -> Result<Entry<'_, K, V>> {
        let idx = links::last(&self.arena, self.root).ok_or(TreeError::Empty)?;
        Ok(self.entry_at(idx))
    }

    /// Greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Result<&K> {
        self.seek_index(key, Seek::Floor).map(|i| self.key_at(i))
    }

    /// Least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Result<&K> {
        self.seek_index(key, Seek::Ceiling).map(|i| self.key_at(i))
    }

    /// Greatest key strictly less than `key`.
    pub fn lower(&self, key: &K) -> Result<&K> {
        self.seek_index(key, Seek::Lower).map(|i| self.key_at(i))
    }

    /// Least key strictly greater than `key`.
    pub fn higher(&self, key: &K) -> Result<&K> {
        self.seek_index(key, Seek::Higher).map(|i| self.key_at(i))
    }

    pub fn floor_entry(&self, key: &K) -> Result<Entry<'_, K, V>> {
        self.seek_index(key, Seek::Floor).map(|i| self.entry_at(i))
    }

    pub fn ceiling_entry(&self, key: &K) -> Result<Entry<'_, K, V>> {
        self.seek_index(key, Seek::Ceiling).map(|i| self.entry_at(i))
    }

    pub fn lower_entry(&self, key: &K) -> Result<Entry<'_, K, V>> {
        self.seek_index(key, Seek::Lower).map(|i| self.entry_at(i))
    }

    pub fn higher_entry(&self, key: &K) -> Result<Entry<'_, K, V>> {
        self.seek_index(key, Seek::Higher).map(|i| self.entry_at(i))
    }

    /// Unlinks node `idx`, compacts the arena, and hands back the node.
    fn take(&mut self, idx: u32) -> RbNode<K, V> {
        self.root = red_black::remove(&mut self.arena, self.root, idx);
        let node = self.arena.swap_remove(idx as usize);
        let moved = self.arena.len() as u32;
        if moved != idx {
            self.root = links::relocate(&mut self.arena, self.root, moved, idx);
            trace!("unlinked node #{idx}, slot #{moved} moved into it");
        } else {
            trace!("unlinked node #{idx}");
        }
        node
    }

    fn dispose_key(&mut self, key: K) {
        if let Some(destructor) = self.key_destructor.as_mut() {
            destructor(key);
        }
    }

    /// Removes the entry for `key`, returning its value. The key goes to the
    /// key destructor, if one is installed.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.ensure_populated()?;
        let idx = self.find_index(key).ok_or(TreeError::NotFound)?;
        let (key, value) = self.take(idx).into_pair();
        self.dispose_key(key);
        Ok(value)
    }

    /// Removes and returns the entry with the least key.
    pub fn poll_first(&mut self) -> Result<(K, V)> {
        let idx = links::first(&self.arena, self.root).ok_or(TreeError::Empty)?;
        Ok(self.take(idx).into_pair())
    }

    /// Removes and returns the entry with the greatest key.
    pub fn poll_last(&mut self) -> Result<(K, V)> {
        let idx = links::last(&self.arena, self.root).ok_or(TreeError::Empty)?;
        Ok(self.take(idx).into_pair())
    }

    /// Removes every entry, running the key destructor on each key.
    pub fn clear(&mut self) {
        self.clear_with(drop);
    }

    /// Removes every entry, running the key destructor on each key and
    /// `value_destructor` on each value, in no particular order.
    pub fn clear_with<F>(&mut self, mut value_destructor: F)
    where
        F: FnMut(V),
    {
        let arena = std::mem::take(&mut self.arena);
        self.root = None;
        if !arena.is_empty() {
            trace!("clearing {} entries", arena.len());
        }
        for node in arena {
            let (key, value) = node.into_pair();
            self.dispose_key(key);
            value_destructor(value);
        }
    }

    /// Consumes the map, destroying every entry as [`clear`](Self::clear)
    /// does.
    pub fn destroy(self) {
        self.destroy_with(drop);
    }

    /// Consumes the map, destroying every entry as
    /// [`clear_with`](Self::clear_with) does.
    pub fn destroy_with<F>(mut self, value_destructor: F)
    where
        F: FnMut(V),
    {
        self.clear_with(value_destructor);
    }

    /// Keys in ascending order.
    pub fn key_array(&self) -> Result<Vec<&K>> {
        self.ensure_populated()?;
        try_collect(self.len(), self.keys())
    }

    /// Entries in ascending key order.
    pub fn entry_array(&self) -> Result<Vec<Entry<'_, K, V>>> {
        self.ensure_populated()?;
        try_collect(self.len(), self.iter().map(|(k, v)| Entry::new(k, v)))
    }

    /// Snapshot iterator over the entries in ascending key order.
    pub fn iterator(&self) -> Result<Snapshot<Entry<'_, K, V>>> {
        self.entry_array().map(Snapshot::new)
    }

    /// Borrowing in-order iterator; double-ended.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.root)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        links::height(&self.arena, self.root)
    }

    /// Verifies ordering, red-black, and size invariants.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        red_black::assert_red_black_tree(&self.arena, self.root, &self.comparator)?;
        let reachable = links::size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(format!(
                "Size mismatch: {reachable} reachable nodes, {} stored",
                self.arena.len()
            ));
        }
        Ok(())
    }

    /// Multi-line dump of the tree structure.
    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        red_black::print::<K, V, _>(&self.arena, self.root, "")
    }
}

impl<K, V, C> Drop for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn drop(&mut self) {
        if self.key_destructor.is_some() {
            self.clear();
        }
    }
}

impl<K: Debug, V: Debug, C> Debug for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// # Panics
    ///
    /// Panics if a node cannot be allocated, as `Vec::extend` would.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(err) = self.put(key, value) {
                panic!("TreeMap::extend: {err}");
            }
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Hands every entry to the caller in ascending order; the key
    /// destructor is not run.
    fn into_iter(mut self) -> IntoIter<K, V> {
        let arena = std::mem::take(&mut self.arena);
        let root = self.root.take();
        IntoIter::new(into_sorted_pairs(arena, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn put_get_replace() {
        let mut map = TreeMap::new();
        assert_eq!(map.put(1, "a").unwrap(), Insertion::Inserted);
        assert_eq!(map.put(1, "b").unwrap(), Insertion::Replaced("a"));
        assert_eq!(map.get(&1), Ok(&"b"));
        assert_eq!(map.size(), 1);
    }

    #[test]
    fn empty_vs_not_found() {
        let mut map: TreeMap<i32, i32> = TreeMap::new();
        assert_eq!(map.get(&1), Err(TreeError::Empty));
        assert_eq!(map.remove(&1), Err(TreeError::Empty));
        map.put(2, 2).unwrap();
        assert_eq!(map.get(&1), Err(TreeError::NotFound));
        assert_eq!(map.remove(&1), Err(TreeError::NotFound));
    }

    #[test]
    fn removal_compacts_arena() {
        let mut map = TreeMap::new();
        for i in 0..64 {
            map.put(i, i * 10).unwrap();
        }
        for i in (0..64).step_by(3) {
            assert_eq!(map.remove(&i), Ok(i * 10));
            map.assert_valid().unwrap();
            assert_eq!(map.arena.len(), map.size());
        }
        for i in 0..64 {
            assert_eq!(map.contains_key(&i), i % 3 != 0);
        }
    }

    #[test]
    fn drop_runs_key_destructor() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let sink = Arc::clone(&seen);
            let mut map = TreeMap::new().with_key_destructor(move |k: i32| sink.lock().unwrap().push(k));
            map.put(2, ()).unwrap();
            map.put(1, ()).unwrap();
        }
        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn print_dumps_structure() {
        let mut map = TreeMap::new();
        map.put(1, 'x').unwrap();
        assert!(map.print().starts_with("#0 B 1 => 'x'"));
    }
}
