use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;

use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::Serialize;
use serde::ser::Serializer;

use crate::ordered_map::OrderedMap;

impl<K, V, S> Serialize for OrderedMap<K, V, S>
where
    K: Serialize + Hash + Eq,
    V: Serialize,
    S: BuildHasher,
{
    /// Serializes the map as a sequence of key-value pairs in insertion
    /// order.
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        serializer.collect_map(self)
    }
}

struct OrderedMapVisitor<K, V, S>(PhantomData<(K, V, S)>);

impl<'de, K, V, S> Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // The size hint is a claim made by the input, so cap what it can
        // preallocate.
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut map = OrderedMap::with_capacity_and_hasher(capacity, S::default());
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }

        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for OrderedMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    /// Deserializes the map from a sequence of key-value pairs, keeping the
    /// pairs in the order the input produces them. Duplicate keys collapse to
    /// the last value at the first occurrence's position, matching
    /// [`insert`].
    ///
    /// [`insert`]: OrderedMap::insert
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::assert_eq;

    use serde::de::Deserialize;
    use serde::de::value::Error as ValueError;
    use serde::de::value::MapDeserializer;

    use crate::OrderedMap;

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zebra", 1);
        map.insert("apple", 2);
        map.insert("mango", 3);

        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(json, r#"{"zebra":1,"apple":2,"mango":3}"#);
    }

    #[test]
    fn test_serialize_empty_map() {
        let map = OrderedMap::<String, i32>::new();

        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }

    #[test]
    fn test_serialize_integer_keys() {
        let mut map = OrderedMap::new();
        map.insert(9, "nine");
        map.insert(1, "one");

        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(json, r#"{"9":"nine","1":"one"}"#);
    }

    #[test]
    fn test_serialize_sees_value_updates_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 10);

        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(json, r#"{"a":10,"b":2}"#);
    }

    #[test]
    fn test_serialize_after_replace_key() {
        let mut map = OrderedMap::new();
        map.insert("one".to_string(), 1);
        map.insert("two".to_string(), 2);
        map.insert("three".to_string(), 3);
        assert!(map.replace_key(&"two".to_string(), "zwei".to_string()));

        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(json, r#"{"one":1,"zwei":2,"three":3}"#);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let map: OrderedMap<String, i32> =
            serde_json::from_str(r#"{"c":3,"a":1,"b":2}"#).unwrap();

        let keys = map.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(map.get(&"a".to_string()), Some(&1));
    }

    #[test]
    fn test_deserialize_duplicate_keys_keep_first_position() {
        let map: OrderedMap<String, i32> =
            serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a".to_string()), Some(&3));
        let keys = map.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_round_trip() {
        let mut map = OrderedMap::new();
        map.insert("x".to_string(), 1);
        map.insert("y".to_string(), 2);
        map.insert("z".to_string(), 3);

        let json = serde_json::to_string(&map).unwrap();
        let back: OrderedMap<String, i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, map);
        assert!(back.iter().eq(map.iter()));
    }

    #[test]
    fn test_nested_maps() {
        let mut inner = OrderedMap::new();
        inner.insert("b".to_string(), 2);
        inner.insert("a".to_string(), 1);

        let mut outer = OrderedMap::new();
        outer.insert("inner".to_string(), inner);

        let json = serde_json::to_string(&outer).unwrap();

        assert_eq!(json, r#"{"inner":{"b":2,"a":1}}"#);
    }

    #[test]
    fn test_non_string_keys_are_rejected_by_json() {
        let mut map = OrderedMap::new();
        map.insert((1, 2), "pair");

        assert!(serde_json::to_string(&map).is_err());
    }

    /// Claims a gigantic length no matter what the wrapped iterator holds.
    struct HugeSizeHint<I> {
        inner: I,
    }

    impl<I: Iterator> Iterator for HugeSizeHint<I> {
        type Item = I::Item;

        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (usize::MAX, Some(usize::MAX))
        }
    }

    #[test]
    fn test_deserialize_does_not_trust_the_length_hint() {
        let entries = HugeSizeHint {
            inner: [("a", 1u32), ("b", 2)].into_iter(),
        };

        let deserializer = MapDeserializer::<_, ValueError>::new(entries);
        let map = OrderedMap::<String, u32>::deserialize(deserializer).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a".to_string()), Some(&1));
        assert_eq!(map.get(&"b".to_string()), Some(&2));
    }
}
