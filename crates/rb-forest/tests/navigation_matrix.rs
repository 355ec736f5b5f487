use std::cmp::Ordering;

use rb_forest::red_black::{insert, remove, RbNode};
use rb_forest::util::{ceiling, find, first, floor, higher, last, lower, seek, Seek};

type Arena = Vec<RbNode<String, usize>>;

fn str_cmp(a: &String, b: &String) -> Ordering {
    a.cmp(b)
}

fn key_of(node: &RbNode<String, usize>) -> &String {
    &node.k
}

/// Keys "02", "04", ... "40".
fn even_keys() -> (Arena, Option<u32>) {
    let mut arena = Arena::new();
    let mut root = None;
    for i in (2..=40).step_by(2) {
        arena.push(RbNode::new(format!("{i:02}"), i));
        let idx = (arena.len() - 1) as u32;
        root = insert(&mut arena, root, idx, &str_cmp);
    }
    (arena, root)
}

fn key(arena: &Arena, idx: Option<u32>) -> Option<&str> {
    idx.map(|i| arena[i as usize].k.as_str())
}

#[test]
fn navigation_even_keys_matrix() {
    let (arena, root) = even_keys();
    let probe = |s: &str| s.to_string();

    assert_eq!(key(&arena, floor(&arena, root, &probe("07"), key_of, str_cmp)), Some("06"));
    assert_eq!(key(&arena, ceiling(&arena, root, &probe("07"), key_of, str_cmp)), Some("08"));
    assert_eq!(key(&arena, lower(&arena, root, &probe("25"), key_of, str_cmp)), Some("24"));
    assert_eq!(key(&arena, higher(&arena, root, &probe("36"), key_of, str_cmp)), Some("38"));
    assert_eq!(key(&arena, floor(&arena, root, &probe("00"), key_of, str_cmp)), None);
    assert_eq!(key(&arena, ceiling(&arena, root, &probe("99"), key_of, str_cmp)), None);

    assert_eq!(key(&arena, first(&arena, root)), Some("02"));
    assert_eq!(key(&arena, last(&arena, root)), Some("40"));
}

#[test]
fn navigation_exact_hits_matrix() {
    let (arena, root) = even_keys();
    let k = "20".to_string();

    assert_eq!(key(&arena, seek(&arena, root, &k, Seek::Floor, key_of, str_cmp)), Some("20"));
    assert_eq!(key(&arena, seek(&arena, root, &k, Seek::Ceiling, key_of, str_cmp)), Some("20"));
    assert_eq!(key(&arena, seek(&arena, root, &k, Seek::Lower, key_of, str_cmp)), Some("18"));
    assert_eq!(key(&arena, seek(&arena, root, &k, Seek::Higher, key_of, str_cmp)), Some("22"));

    let lo = "02".to_string();
    let hi = "40".to_string();
    assert_eq!(key(&arena, lower(&arena, root, &lo, key_of, str_cmp)), None);
    assert_eq!(key(&arena, higher(&arena, root, &hi, key_of, str_cmp)), None);
}

#[test]
fn navigation_after_removals_matrix() {
    let (mut arena, mut root) = even_keys();
    for gone in ["06", "08", "10"] {
        let idx = find(&arena, root, &gone.to_string(), key_of, str_cmp).unwrap();
        root = remove(&mut arena, root, idx);
    }
    let k = "07".to_string();
    assert_eq!(key(&arena, floor(&arena, root, &k, key_of, str_cmp)), Some("04"));
    assert_eq!(key(&arena, ceiling(&arena, root, &k, key_of, str_cmp)), Some("12"));
}

#[test]
fn navigation_empty_tree_matrix() {
    let arena = Arena::new();
    let k = "10".to_string();
    for mode in [Seek::Floor, Seek::Ceiling, Seek::Lower, Seek::Higher] {
        assert_eq!(seek(&arena, None, &k, mode, key_of, str_cmp), None);
    }
}
