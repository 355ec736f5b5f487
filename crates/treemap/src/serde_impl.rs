use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::map::TreeMap;
use crate::set::TreeSet;

impl<K, V, C> Serialize for TreeMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
    C: Fn(&K, &K) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K, C> Serialize for TreeSet<K, C>
where
    K: Serialize,
    C: Fn(&K, &K) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for k in self.iter() {
            seq.serialize_element(k)?;
        }
        seq.end()
    }
}

struct TreeMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for TreeMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = TreeMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = TreeMap::new();
        while let Some((k, v)) = access.next_entry()? {
            map.put(k, v).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for TreeMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeMapVisitor(PhantomData))
    }
}

struct TreeSetVisitor<K>(PhantomData<K>);

impl<'de, K> Visitor<'de> for TreeSetVisitor<K>
where
    K: Deserialize<'de> + Ord,
{
    type Value = TreeSet<K>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = TreeSet::new();
        while let Some(k) = access.next_element()? {
            set.add(k).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(set)
    }
}

impl<'de, K> Deserialize<'de> for TreeSet<K>
where
    K: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TreeSetVisitor(PhantomData))
    }
}
