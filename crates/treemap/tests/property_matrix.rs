use std::collections::BTreeMap;
use std::ops::Bound;

use proptest::prelude::*;
use treemap::{Insertion, TreeError, TreeMap};

const KEY_MAX: i32 = 200;

#[derive(Clone, Debug)]
enum Op {
    Put(i32, i32),
    Remove(i32),
    PollFirst,
    PollLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..KEY_MAX, any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => (0..KEY_MAX).prop_map(Op::Remove),
        1 => Just(Op::PollFirst),
        1 => Just(Op::PollLast),
    ]
}

/// Expected navigation answer, with the empty/not-found split applied.
fn expect<T: Copy>(model: &BTreeMap<i32, i32>, found: Option<T>) -> Result<T, TreeError> {
    match found {
        Some(k) => Ok(k),
        None if model.is_empty() => Err(TreeError::Empty),
        None => Err(TreeError::NotFound),
    }
}

fn check_navigation(map: &TreeMap<i32, i32>, model: &BTreeMap<i32, i32>, probe: i32) {
    let floor = model.range(..=probe).next_back().map(|(k, _)| k);
    let ceiling = model.range(probe..).next().map(|(k, _)| k);
    let lower = model.range(..probe).next_back().map(|(k, _)| k);
    let higher = model
        .range((Bound::Excluded(probe), Bound::Unbounded))
        .next()
        .map(|(k, _)| k);
    assert_eq!(map.floor(&probe), expect(model, floor));
    assert_eq!(map.ceiling(&probe), expect(model, ceiling));
    assert_eq!(map.lower(&probe), expect(model, lower));
    assert_eq!(map.higher(&probe), expect(model, higher));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_btree_model(ops in proptest::collection::vec(op_strategy(), 0..400)) {
        let mut map = TreeMap::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let expected = match model.insert(k, v) {
                        Some(prev) => Insertion::Replaced(prev),
                        None => Insertion::Inserted,
                    };
                    prop_assert_eq!(map.put(k, v).unwrap(), expected);
                }
                Op::Remove(k) => {
                    let expected = match model.remove(&k) {
                        Some(v) => Ok(v),
                        None if map.is_empty() => Err(TreeError::Empty),
                        None => Err(TreeError::NotFound),
                    };
                    prop_assert_eq!(map.remove(&k), expected);
                }
                Op::PollFirst => {
                    prop_assert_eq!(map.poll_first().ok(), model.pop_first());
                }
                Op::PollLast => {
                    prop_assert_eq!(map.poll_last().ok(), model.pop_last());
                }
            }
            prop_assert_eq!(map.assert_valid(), Ok(()));
            prop_assert_eq!(map.size(), model.len());
        }

        let entries: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(i32, i32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn navigation_matches_model(
        keys in proptest::collection::btree_set(0..KEY_MAX, 0..120),
        probes in proptest::collection::vec(-5..KEY_MAX + 5, 1..40),
    ) {
        let map: TreeMap<i32, i32> = keys.iter().map(|k| (*k, -*k)).collect();
        let model: BTreeMap<i32, i32> = keys.iter().map(|k| (*k, -*k)).collect();
        for probe in probes {
            check_navigation(&map, &model, probe);
        }
        prop_assert_eq!(map.first().ok(), model.keys().next());
        prop_assert_eq!(map.last().ok(), model.keys().next_back());
    }

    #[test]
    fn height_is_logarithmic(keys in proptest::collection::vec(any::<u32>(), 1..2000)) {
        let mut map = TreeMap::new();
        for k in keys {
            let _ = map.put(k, ()).unwrap();
        }
        let bound = 2.0 * ((map.size() + 1) as f64).log2();
        prop_assert!(map.height() as f64 <= bound);
    }

    #[test]
    fn snapshot_size_matches(keys in proptest::collection::vec(0..KEY_MAX, 1..300)) {
        let map: TreeMap<i32, ()> = keys.into_iter().map(|k| (k, ())).collect();
        let snapshot = map.iterator().unwrap();
        prop_assert_eq!(snapshot.len(), map.size());
        prop_assert_eq!(map.key_array().unwrap().len(), map.size());
        let keys: Vec<i32> = snapshot.map(|e| *e.key()).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}
