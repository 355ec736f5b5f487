//! Link-level utilities shared by every tree discipline.
//!
//! Key-based helpers (`find`, `seek`) take a `key_of` accessor closure so they
//! work with any arena-backed node layout.

pub mod swap;

use std::cmp::Ordering;

use crate::types::Node;

pub use swap::{relocate, swap};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points whichever child link of `parent` held `old` at `new` instead.
#[inline]
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else {
        set_r(arena, parent, new);
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let Some(i) = root else {
        return 0;
    };
    1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, key_of(&arena[i as usize])) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Relation a navigation query must satisfy relative to the probe key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seek {
    /// Greatest key `<=` probe.
    Floor,
    /// Least key `>=` probe.
    Ceiling,
    /// Greatest key `<` probe.
    Lower,
    /// Least key `>` probe.
    Higher,
}

/// Navigation search.
///
/// Descends from `root`; whenever the current node satisfies the relation it
/// becomes the tentative answer and the search continues on the side where a
/// closer answer could live. The last tentative answer wins.
pub fn seek<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    mode: Seek,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    let mut found = None;
    while let Some(i) = curr {
        let cmp = comparator(key_of(&arena[i as usize]), key);
        curr = match (mode, cmp) {
            (Seek::Floor | Seek::Ceiling, Ordering::Equal) => return Some(i),
            (Seek::Floor | Seek::Lower, Ordering::Less) => {
                found = Some(i);
                get_r(arena, i)
            }
            (Seek::Floor | Seek::Lower, _) => get_l(arena, i),
            (Seek::Ceiling | Seek::Higher, Ordering::Greater) => {
                found = Some(i);
                get_l(arena, i)
            }
            (Seek::Ceiling | Seek::Higher, _) => get_r(arena, i),
        };
    }
    found
}

/// Greatest node with key `<= key`.
pub fn floor<N, K, F, C>(arena: &[N], root: Option<u32>, key: &K, key_of: F, comparator: C) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    seek(arena, root, key, Seek::Floor, key_of, comparator)
}

/// Least node with key `>= key`.
pub fn ceiling<N, K, F, C>(arena: &[N], root: Option<u32>, key: &K, key_of: F, comparator: C) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    seek(arena, root, key, Seek::Ceiling, key_of, comparator)
}

/// Greatest node with key `< key`.
pub fn lower<N, K, F, C>(arena: &[N], root: Option<u32>, key: &K, key_of: F, comparator: C) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    seek(arena, root, key, Seek::Lower, key_of, comparator)
}

/// Least node with key `> key`.
pub fn higher<N, K, F, C>(arena: &[N], root: Option<u32>, key: &K, key_of: F, comparator: C) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    seek(arena, root, key, Seek::Higher, key_of, comparator)
}
