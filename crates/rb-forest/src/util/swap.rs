use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Swaps the tree positions of nodes `x` and `y`, keeping their payloads in
/// place. Handles the case where one node is the parent of the other.
///
/// Returns the (possibly new) root index.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let remap = |i: Option<u32>| match i {
        Some(i) if i == x => Some(y),
        Some(i) if i == y => Some(x),
        other => other,
    };

    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));
    let x_was_left = xp.map(|p| get_l(arena, p) == Some(x));
    let y_was_left = yp.map(|p| get_l(arena, p) == Some(y));

    set_p(arena, x, remap(yp));
    set_l(arena, x, remap(yl));
    set_r(arena, x, remap(yr));
    set_p(arena, y, remap(xp));
    set_l(arena, y, remap(xl));
    set_r(arena, y, remap(xr));

    for node in [x, y] {
        if let Some(c) = get_l(arena, node) {
            set_p(arena, c, Some(node));
        }
        if let Some(c) = get_r(arena, node) {
            set_p(arena, c, Some(node));
        }
    }

    if let (Some(p), Some(left)) = (xp, x_was_left) {
        if p != y {
            if left {
                set_l(arena, p, Some(y));
            } else {
                set_r(arena, p, Some(y));
            }
        }
    }
    if let (Some(p), Some(left)) = (yp, y_was_left) {
        if p != x {
            if left {
                set_l(arena, p, Some(x));
            } else {
                set_r(arena, p, Some(x));
            }
        }
    }

    if xp.is_none() {
        y
    } else if yp.is_none() {
        x
    } else {
        root
    }
}

/// Re-points the links around a node whose arena slot moved from `from` to
/// `to` (e.g. after `Vec::swap_remove`). The node must already live at `to`
/// with its own links untouched.
///
/// Returns the (possibly new) root index.
pub fn relocate<N: Node>(arena: &mut [N], root: Option<u32>, from: u32, to: u32) -> Option<u32> {
    if from == to {
        return root;
    }
    if let Some(p) = get_p(arena, to) {
        if get_l(arena, p) == Some(from) {
            set_l(arena, p, Some(to));
        } else {
            set_r(arena, p, Some(to));
        }
    }
    if let Some(l) = get_l(arena, to) {
        set_p(arena, l, Some(to));
    }
    if let Some(r) = get_r(arena, to) {
        set_p(arena, r, Some(to));
    }
    if root == Some(from) {
        Some(to)
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::{insert, RbNode};
    use crate::util::{first, next};

    fn in_order(arena: &[RbNode<i32, ()>], root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = next(arena, i);
        }
        out
    }

    fn build(keys: &[i32]) -> (Vec<RbNode<i32, ()>>, Option<u32>) {
        let mut arena = Vec::new();
        let mut root = None;
        for &k in keys {
            arena.push(RbNode::new(k, ()));
            let idx = (arena.len() - 1) as u32;
            root = insert(&mut arena, root, idx, &|a: &i32, b: &i32| a.cmp(b));
        }
        (arena, root)
    }

    #[test]
    fn swap_parent_and_child_exchanges_order() {
        // 2 is the root, 3 its right child.
        let (mut arena, root) = build(&[2, 1, 3]);
        let root = swap(&mut arena, root.unwrap(), 0, 2);
        assert_eq!(arena[root as usize].k, 3);
        assert_eq!(in_order(&arena, Some(root)), vec![1, 3, 2]);
        assert_eq!(arena[0].p, Some(2));
    }

    #[test]
    fn swap_siblings() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let root = swap(&mut arena, root.unwrap(), 1, 2);
        assert_eq!(in_order(&arena, Some(root)), vec![3, 2, 1]);
        assert_eq!(arena[1].p, Some(0));
        assert_eq!(arena[2].p, Some(0));
    }

    #[test]
    fn relocate_after_swap_remove() {
        let (mut arena, root) = build(&[4, 2, 6, 1, 3, 5, 7]);
        // Detach leaf 1 (index 3) by hand, then compact the arena.
        let p = arena[3].p.unwrap();
        arena[p as usize].l = None;
        arena.swap_remove(3);
        let moved_from = arena.len() as u32;
        let root = relocate(&mut arena, root, moved_from, 3);
        assert_eq!(in_order(&arena, root), vec![2, 3, 4, 5, 6, 7]);
    }
}
