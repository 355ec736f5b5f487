use std::cmp::Ordering;

use crate::types::KvNode;
use crate::util::{first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r, swap};

use super::types::RbNodeLike;

#[path = "util/print.rs"]
mod print_impl;

pub use print_impl::print;

/// Absent children are black.
#[inline]
fn is_black<N: RbNodeLike>(arena: &[N], i: Option<u32>) -> bool {
    i.map_or(true, |i| arena[i as usize].is_black())
}

#[inline]
fn set_black<N: RbNodeLike>(arena: &mut [N], i: u32, black: bool) {
    arena[i as usize].set_black(black);
}

/// Rotates `x` down to the left; its right child takes its place.
fn rotate_left<N: RbNodeLike>(arena: &mut [N], root: &mut u32, x: u32) {
    let y = get_r(arena, x).expect("left rotation needs a right child");
    let yl = get_l(arena, y);
    set_r(arena, x, yl);
    if let Some(yl) = yl {
        set_p(arena, yl, Some(x));
    }
    let xp = get_p(arena, x);
    set_p(arena, y, xp);
    match xp {
        Some(p) => replace_child(arena, p, x, Some(y)),
        None => *root = y,
    }
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
}

/// Rotates `x` down to the right; its left child takes its place.
fn rotate_right<N: RbNodeLike>(arena: &mut [N], root: &mut u32, x: u32) {
    let y = get_l(arena, x).expect("right rotation needs a left child");
    let yr = get_r(arena, y);
    set_l(arena, x, yr);
    if let Some(yr) = yr {
        set_p(arena, yr, Some(x));
    }
    let xp = get_p(arena, x);
    set_p(arena, y, xp);
    match xp {
        Some(p) => replace_child(arena, p, x, Some(y)),
        None => *root = y,
    }
    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
}

/// Inserts detached node `n` by walking from `root` with `comparator`.
///
/// Equal keys descend to the right; callers that need unique keys must look
/// the key up first. Returns the new root.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> Option<u32>
where
    N: RbNodeLike + KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut curr) = root else {
        set_black(arena, n, true);
        return Some(n);
    };

    loop {
        let cmp = comparator(arena[n as usize].key(), arena[curr as usize].key());
        let child = if cmp == Ordering::Less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(child) => curr = child,
            None if cmp == Ordering::Less => return insert_left(arena, root, n, curr),
            None => return insert_right(arena, root, n, curr),
        }
    }
}

/// Links detached node `n` as the (empty) left child of `parent` and
/// rebalances. Returns the new root.
pub fn insert_left<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32, parent: u32) -> Option<u32> {
    set_l(arena, parent, Some(n));
    link(arena, root, n, parent)
}

/// Links detached node `n` as the (empty) right child of `parent` and
/// rebalances. Returns the new root.
pub fn insert_right<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32, parent: u32) -> Option<u32> {
    set_r(arena, parent, Some(n));
    link(arena, root, n, parent)
}

fn link<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32, parent: u32) -> Option<u32> {
    set_p(arena, n, Some(parent));
    set_black(arena, n, false);
    let mut top = root.unwrap_or(parent);
    insert_fixup(arena, &mut top, n);
    Some(top)
}

fn insert_fixup<N: RbNodeLike>(arena: &mut [N], root: &mut u32, mut z: u32) {
    while let Some(mut p) = get_p(arena, z).filter(|&p| !arena[p as usize].is_black()) {
        // A red parent is never the root, so the grandparent exists.
        let Some(g) = get_p(arena, p) else {
            break;
        };
        let parent_is_left = get_l(arena, g) == Some(p);
        let uncle = if parent_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };

        if let Some(u) = uncle.filter(|&u| !arena[u as usize].is_black()) {
            set_black(arena, p, true);
            set_black(arena, u, true);
            set_black(arena, g, false);
            z = g;
            continue;
        }

        if parent_is_left {
            if get_r(arena, p) == Some(z) {
                rotate_left(arena, root, p);
                z = p;
                p = get_p(arena, z).expect("rotated node has a parent");
            }
            set_black(arena, p, true);
            set_black(arena, g, false);
            rotate_right(arena, root, g);
        } else {
            if get_l(arena, p) == Some(z) {
                rotate_right(arena, root, p);
                z = p;
                p = get_p(arena, z).expect("rotated node has a parent");
            }
            set_black(arena, p, true);
            set_black(arena, g, false);
            rotate_left(arena, root, g);
        }
        break;
    }
    set_black(arena, *root, true);
}

/// Unlinks node `n` from the tree rooted at `root` and rebalances.
///
/// A node with two children first trades places (and colors) with its
/// in-order successor, so the node that is physically unlinked has at most
/// one child. On return `n` is fully detached; its payload is untouched.
/// Returns the new root.
pub fn remove<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let mut top = root?;

    if let (Some(_), Some(r)) = (get_l(arena, n), get_r(arena, n)) {
        let successor = first(arena, Some(r)).unwrap_or(r);
        let n_black = arena[n as usize].is_black();
        let s_black = arena[successor as usize].is_black();
        set_black(arena, n, s_black);
        set_black(arena, successor, n_black);
        top = swap(arena, top, n, successor);
    }

    let child = get_l(arena, n).or(get_r(arena, n));
    let parent = get_p(arena, n);
    let new_root = match (child, parent) {
        // A single child is always red under a black node.
        (Some(c), _) => {
            set_p(arena, c, parent);
            match parent {
                Some(p) => replace_child(arena, p, n, Some(c)),
                None => top = c,
            }
            set_black(arena, c, true);
            Some(top)
        }
        (None, None) => None,
        (None, Some(_)) => {
            if arena[n as usize].is_black() {
                remove_fixup(arena, &mut top, n);
            }
            // Rotations during the fixup may have moved the leaf.
            if let Some(p) = get_p(arena, n) {
                replace_child(arena, p, n, None);
            }
            Some(top)
        }
    };

    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    new_root
}

/// Restores black height after black leaf `x` is about to be unlinked.
///
/// `x` stays in place as a stand-in for the missing black node until the
/// caller detaches it.
fn remove_fixup<N: RbNodeLike>(arena: &mut [N], root: &mut u32, mut x: u32) {
    while x != *root && arena[x as usize].is_black() {
        let Some(p) = get_p(arena, x) else {
            break;
        };

        if get_l(arena, p) == Some(x) {
            let mut s = get_r(arena, p).expect("double-black node has a sibling");
            if !arena[s as usize].is_black() {
                set_black(arena, s, true);
                set_black(arena, p, false);
                rotate_left(arena, root, p);
                s = get_r(arena, p).expect("double-black node has a sibling");
            }
            if is_black(arena, get_l(arena, s)) && is_black(arena, get_r(arena, s)) {
                set_black(arena, s, false);
                x = p;
                continue;
            }
            if is_black(arena, get_r(arena, s)) {
                if let Some(sl) = get_l(arena, s) {
                    set_black(arena, sl, true);
                }
                set_black(arena, s, false);
                rotate_right(arena, root, s);
                s = get_r(arena, p).expect("double-black node has a sibling");
            }
            let parent_black = arena[p as usize].is_black();
            set_black(arena, s, parent_black);
            set_black(arena, p, true);
            if let Some(sr) = get_r(arena, s) {
                set_black(arena, sr, true);
            }
            rotate_left(arena, root, p);
        } else {
            let mut s = get_l(arena, p).expect("double-black node has a sibling");
            if !arena[s as usize].is_black() {
                set_black(arena, s, true);
                set_black(arena, p, false);
                rotate_right(arena, root, p);
                s = get_l(arena, p).expect("double-black node has a sibling");
            }
            if is_black(arena, get_l(arena, s)) && is_black(arena, get_r(arena, s)) {
                set_black(arena, s, false);
                x = p;
                continue;
            }
            if is_black(arena, get_l(arena, s)) {
                if let Some(sr) = get_r(arena, s) {
                    set_black(arena, sr, true);
                }
                set_black(arena, s, false);
                rotate_left(arena, root, s);
                s = get_l(arena, p).expect("double-black node has a sibling");
            }
            let parent_black = arena[p as usize].is_black();
            set_black(arena, s, parent_black);
            set_black(arena, p, true);
            if let Some(sl) = get_l(arena, s) {
                set_black(arena, sl, true);
            }
            rotate_right(arena, root, p);
        }
        x = *root;
    }
    set_black(arena, x, true);
}

/// Checks every red-black and BST invariant of the tree under `root`.
///
/// Returns a description of the first violation found.
pub fn assert_red_black_tree<K, V, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), String>
where
    N: RbNodeLike + KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err("Root has parent".to_string());
    }
    if !arena[root as usize].is_black() {
        return Err("Root is not black".to_string());
    }

    fn black_height<N: RbNodeLike>(arena: &[N], node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(1);
        };

        let l = get_l(arena, node);
        let r = get_r(arena, node);
        for child in [l, r].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(format!("Broken parent link under node {node}"));
            }
        }

        let black = arena[node as usize].is_black();
        if !black && !(is_black(arena, l) && is_black(arena, r)) {
            return Err(format!("Red node {node} has a red child"));
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(format!("Black height mismatch under node {node}: {lh} vs {rh}"));
        }
        Ok(lh + usize::from(black))
    }

    black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) != Ordering::Less {
                return Err(format!("Node order violated between {prev} and {i}"));
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
