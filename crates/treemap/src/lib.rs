//! Ordered map and set on an arena-backed red-black tree.
//!
//! Keys are ordered by a caller-supplied comparator (`Ord::cmp` by default).
//! Besides lookup and removal the collections answer navigation queries:
//! `first`, `last`, `floor`, `ceiling`, `lower`, `higher`, and the
//! removing `poll_first` / `poll_last`.
//!
//! # Example
//!
//! ```
//! use treemap::{TreeError, TreeMap};
//!
//! let mut map = TreeMap::new();
//! for k in (2..=40).step_by(2) {
//!     map.put(k, k * 10).unwrap();
//! }
//!
//! assert_eq!(map.floor(&7), Ok(&6));
//! assert_eq!(map.ceiling(&7), Ok(&8));
//! assert_eq!(map.higher(&40), Err(TreeError::NotFound));
//! assert_eq!(map.poll_first(), Ok((2, 20)));
//!
//! let empty: TreeMap<i32, i32> = TreeMap::new();
//! assert_eq!(empty.first(), Err(TreeError::Empty));
//! ```
//!
//! Collections do no locking of their own; wrap them in [`Synchronized`] to
//! share them between threads.
//!
//! With the `serde` feature, [`TreeMap`] serializes as a map and [`TreeSet`]
//! as a sequence.

pub mod entry;
pub mod error;
pub mod iter;
pub mod map;
pub mod set;
pub mod snapshot;
pub mod sync;

#[cfg(feature = "serde")]
mod serde_impl;

pub use entry::Entry;
pub use error::{Result, TreeError};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use map::{natural_order, Comparator, Insertion, KeyDestructor, TreeMap};
pub use set::{SetIntoIter, TreeSet};
pub use snapshot::Snapshot;
pub use sync::Synchronized;
