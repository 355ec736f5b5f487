#![cfg(feature = "serde")]

use treemap::{TreeMap, TreeSet};

#[test]
fn map_serializes_in_key_order() {
    let map: TreeMap<String, u32> = [("b", 2), ("a", 1), ("c", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);

    let back: TreeMap<String, u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.size(), 3);
    assert_eq!(back.get(&"b".to_string()), Ok(&2));
    back.assert_valid().unwrap();
}

#[test]
fn set_serializes_as_sequence() {
    let set: TreeSet<i32> = [3, 1, 2, 1].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");

    let back: TreeSet<i32> = serde_json::from_str("[9,4,9,7]").unwrap();
    assert_eq!(back.iter().copied().collect::<Vec<_>>(), vec![4, 7, 9]);
}

#[test]
fn duplicate_map_keys_keep_last_value() {
    let map: TreeMap<String, i32> = serde_json::from_str(r#"{"k":1,"k":2}"#).unwrap();
    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&"k".to_string()), Ok(&2));
}

#[test]
fn wrong_shape_is_rejected() {
    assert!(serde_json::from_str::<TreeSet<i32>>(r#"{"a":1}"#).is_err());
    assert!(serde_json::from_str::<TreeMap<String, i32>>("[1,2]").is_err());
}
