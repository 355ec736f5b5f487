use std::iter::FusedIterator;

use crate::error::Result;

/// Iterator over a pre-materialized, ascending copy of a collection.
///
/// The sequence is fixed when the snapshot is taken: later mutation of the
/// source collection does not affect it. It is finite and cannot be
/// restarted.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.items.len() > 0
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    /// Items not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }
}

impl<T> Iterator for Snapshot<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for Snapshot<T> {}

impl<T> FusedIterator for Snapshot<T> {}

/// Collects exactly `len` items into a buffer reserved up front, reporting
/// allocation failure instead of aborting.
pub(crate) fn try_collect<T, I>(len: usize, items: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.extend(items.into_iter().take(len));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_next_tracks_consumption() {
        let mut snap = Snapshot::new(vec![1, 2]);
        assert!(snap.has_next());
        assert_eq!(snap.next(), Some(1));
        assert_eq!(snap.as_slice(), &[2]);
        assert_eq!(snap.next(), Some(2));
        assert!(!snap.has_next());
        assert_eq!(snap.next(), None);
        assert_eq!(snap.next(), None);
    }

    #[test]
    fn try_collect_respects_len() {
        let v = try_collect(3, 0..10).unwrap();
        assert_eq!(v, vec![0, 1, 2]);
        assert!(v.capacity() >= 3);
    }
}
