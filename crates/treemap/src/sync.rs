use std::cell::RefCell;
use std::cmp::Ordering;

use log::trace;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::error::{Result, TreeError};
use crate::map::{Insertion, TreeMap};
use crate::set::TreeSet;
use crate::snapshot::{try_collect, Snapshot};

/// Re-entrant lock decorator for a collection.
///
/// Every pass-through method locks, delegates and unlocks before returning,
/// so values come back as owned clones. Hold the guard from
/// [`lock`](Self::lock) to run several operations in one critical section;
/// the owning thread may keep calling pass-through methods meanwhile.
///
/// Pass-through methods borrow the collection only for the duration of the
/// call. Calling one while holding a `borrow_mut()` from the guard panics.
#[derive(Debug, Default)]
pub struct Synchronized<T> {
    inner: ReentrantMutex<RefCell<T>>,
}

impl<T> Synchronized<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(inner)),
        }
    }

    /// Acquires the lock, or nests inside it when this thread already holds
    /// it. The collection is reached through `borrow()` / `borrow_mut()`.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, RefCell<T>> {
        let guard = self.inner.lock();
        trace!("collection lock acquired");
        guard
    }

    /// Runs `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let guard = self.lock();
        let result = f(&mut guard.borrow_mut());
        result
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<T> From<T> for Synchronized<T> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<K, V, C> Synchronized<TreeMap<K, V, C>>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn put(&self, key: K, value: V) -> Result<Insertion<V>> {
        self.lock().borrow_mut().put(key, value)
    }

    pub fn get(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.lock().borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lock().borrow().contains_key(key)
    }

    pub fn first(&self) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().first().cloned()
    }

    pub fn last(&self) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().last().cloned()
    }

    pub fn first_entry(&self) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().first_entry().map(|e| e.to_owned_pair())
    }

    pub fn last_entry(&self) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().last_entry().map(|e| e.to_owned_pair())
    }

    pub fn floor(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().floor(key).cloned()
    }

    pub fn ceiling(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().ceiling(key).cloned()
    }

    pub fn lower(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().lower(key).cloned()
    }

    pub fn higher(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().higher(key).cloned()
    }

    pub fn floor_entry(&self, key: &K) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().floor_entry(key).map(|e| e.to_owned_pair())
    }

    pub fn ceiling_entry(&self, key: &K) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().ceiling_entry(key).map(|e| e.to_owned_pair())
    }

    pub fn lower_entry(&self, key: &K) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().lower_entry(key).map(|e| e.to_owned_pair())
    }

    pub fn higher_entry(&self, key: &K) -> Result<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock().borrow().higher_entry(key).map(|e| e.to_owned_pair())
    }

    pub fn poll_first(&self) -> Result<(K, V)> {
        self.lock().borrow_mut().poll_first()
    }

    pub fn poll_last(&self) -> Result<(K, V)> {
        self.lock().borrow_mut().poll_last()
    }

    pub fn remove(&self, key: &K) -> Result<V> {
        self.lock().borrow_mut().remove(key)
    }

    pub fn clear(&self) {
        self.lock().borrow_mut().clear();
    }

    pub fn clear_with<F>(&self, value_destructor: F)
    where
        F: FnMut(V),
    {
        self.lock().borrow_mut().clear_with(value_destructor);
    }

    /// Consumes the decorator and destroys the map, running the key
    /// destructor on every remaining key.
    pub fn destroy(self) {
        self.into_inner().destroy();
    }

    pub fn destroy_with<F>(self, value_destructor: F)
    where
        F: FnMut(V),
    {
        self.into_inner().destroy_with(value_destructor);
    }

    pub fn size(&self) -> usize {
        self.lock().borrow().size()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().borrow().is_empty()
    }

    pub fn key_array(&self) -> Result<Vec<K>>
    where
        K: Clone,
    {
        let guard = self.lock();
        let map = guard.borrow();
        if map.is_empty() {
            return Err(TreeError::Empty);
        }
        try_collect(map.len(), map.keys().cloned())
    }

    pub fn entry_array(&self) -> Result<Vec<(K, V)>>
    where
        K: Clone,
        V: Clone,
    {
        let guard = self.lock();
        let map = guard.borrow();
        if map.is_empty() {
            return Err(TreeError::Empty);
        }
        try_collect(map.len(), map.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Snapshot of owned entries taken under the lock; iterating it does not
    /// lock again.
    pub fn iterator(&self) -> Result<Snapshot<(K, V)>>
    where
        K: Clone,
        V: Clone,
    {
        self.entry_array().map(Snapshot::new)
    }
}

impl<K, C> Synchronized<TreeSet<K, C>>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn add(&self, key: K) -> Result<bool> {
        self.lock().borrow_mut().add(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().borrow().contains(key)
    }

    pub fn remove(&self, key: &K) -> Result<()> {
        self.lock().borrow_mut().remove(key)
    }

    pub fn first(&self) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().first().cloned()
    }

    pub fn last(&self) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().last().cloned()
    }

    pub fn floor(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().floor(key).cloned()
    }

    pub fn ceiling(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().ceiling(key).cloned()
    }

    pub fn lower(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().lower(key).cloned()
    }

    pub fn higher(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.lock().borrow().higher(key).cloned()
    }

    pub fn poll_first(&self) -> Result<K> {
        self.lock().borrow_mut().poll_first()
    }

    pub fn poll_last(&self) -> Result<K> {
        self.lock().borrow_mut().poll_last()
    }

    pub fn clear(&self) {
        self.lock().borrow_mut().clear();
    }

    pub fn destroy(self) {
        self.into_inner().destroy();
    }

    pub fn size(&self) -> usize {
        self.lock().borrow().size()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().borrow().is_empty()
    }

    pub fn to_array(&self) -> Result<Vec<K>>
    where
        K: Clone,
    {
        let guard = self.lock();
        let set = guard.borrow();
        if set.is_empty() {
            return Err(TreeError::Empty);
        }
        try_collect(set.len(), set.iter().cloned())
    }

    pub fn iterator(&self) -> Result<Snapshot<K>>
    where
        K: Clone,
    {
        self.to_array().map(Snapshot::new)
    }
}
