//! Ordered map implementation.
//!
//! This module provides the core [`OrderedMap`] type and related
//! functionality. The ordered map remembers the order in which keys were
//! first inserted while providing O(1) access, insertion, and removal
//! operations.
//!
//! # Examples
//!
//! ```
//! use tandem_map::ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("first", 1);
//! map.insert("second", 2);
//!
//! // Iteration preserves insertion order
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"first", &1), (&"second", &2)]);
//! ```

use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;
use core::mem;
use core::ops::Index;
use core::ops::IndexMut;

use hashbrown::HashTable;
use hashbrown::hash_table;

use crate::Ptr;
use crate::RandomState;
use crate::list::List;

mod element;
mod iter;
#[cfg(feature = "serde")]
mod serde;

pub use element::Element;
pub use element::ElementMut;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use iter::ValuesMut;

/// A hash map that remembers insertion order using a doubly-linked list.
///
/// This data structure combines the O(1) lookup performance of a hash table
/// with the ability to iterate over entries in the order their keys were
/// first inserted. Updating the value of an existing key, or renaming a key
/// with [`replace_key`](OrderedMap::replace_key), never changes an entry's
/// position.
///
/// Every entry is addressable through a [`Ptr`] handle issued at insertion
/// time. Handles stay valid until their entry is removed or the map is
/// cleared, and a dead handle is reliably detected afterwards, even once its
/// slot has been recycled. Handles belong to the map that issued them; a
/// clone of the map issues its own.
///
/// Entries are stored in slots addressed by 32-bit indices, so a single map
/// holds at most `u32::MAX - 1` entries; inserting past that limit panics.
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `V`: Value type
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// # Examples
///
/// ```
/// use tandem_map::ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("apple", 5);
/// map.insert("banana", 3);
/// map.insert("cherry", 8);
///
/// // Iterate in insertion order
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// // Prints: apple: 5, banana: 3, cherry: 8
/// ```
pub struct OrderedMap<K, V, S = RandomState> {
    list: List<K, V>,
    table: HashTable<Ptr>,
    hasher: S,
}

impl<K, V, S> Clone for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        let mut new_map = OrderedMap::with_capacity_and_hasher(self.len(), self.hasher.clone());
        for (key, value) in self.iter() {
            new_map.insert(key.clone(), value.clone());
        }
        new_map
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: BuildHasher + Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        OrderedMap::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new ordered map with the specified capacity.
    ///
    /// The map will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is 0, the map will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::with_capacity(10);
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            list: List::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher: RandomState::default(),
        }
    }

    /// Creates a new, empty ordered map.
    ///
    /// The map is initially created with a capacity of 0, so it will not
    /// allocate until the first element is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates a new ordered map with the specified capacity and hasher.
    ///
    /// The map will use the given hasher to hash keys and will be able to
    /// hold at least `capacity` elements without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use tandem_map::ordered_map::OrderedMap;
    ///
    /// let hasher = RandomState::default();
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_capacity_and_hasher(10, hasher);
    /// map.insert("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            list: List::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all key-value pairs.
    ///
    /// Keeps the allocated memory for reuse. Every handle issued before the
    /// clear becomes permanently invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.list.clear();
    }

    /// Returns the pointer to the first entry in insertion order.
    pub fn head_ptr(&self) -> Option<Ptr> {
        self.list.front()
    }

    /// Returns the pointer to the last entry in insertion order.
    pub fn tail_ptr(&self) -> Option<Ptr> {
        self.list.back()
    }

    /// Returns the pointer to the entry after `ptr` in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (ptr1, _) = map.insert_full("a", 1);
    /// let (ptr2, _) = map.insert_full("b", 2);
    ///
    /// assert_eq!(map.next_ptr(ptr1), Some(ptr2));
    /// assert_eq!(map.next_ptr(ptr2), None);
    /// ```
    pub fn next_ptr(&self, ptr: Ptr) -> Option<Ptr> {
        self.list.next(ptr)
    }

    /// Returns the pointer to the entry before `ptr` in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (ptr1, _) = map.insert_full("a", 1);
    /// let (ptr2, _) = map.insert_full("b", 2);
    ///
    /// assert_eq!(map.prev_ptr(ptr2), Some(ptr1));
    /// assert_eq!(map.prev_ptr(ptr1), None);
    /// ```
    pub fn prev_ptr(&self, ptr: Ptr) -> Option<Ptr> {
        self.list.prev(ptr)
    }

    /// Checks if the map still contains the entry for the given pointer.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (ptr, _) = map.insert_full("a", 1);
    /// assert!(map.contains_ptr(ptr));
    /// map.remove_ptr(ptr);
    /// assert!(!map.contains_ptr(ptr));
    /// ```
    pub fn contains_ptr(&self, ptr: Ptr) -> bool {
        self.list.contains(ptr)
    }

    /// Returns a reference to the value associated with the given pointer.
    pub fn ptr_get(&self, ptr: Ptr) -> Option<&V> {
        self.list.get(ptr).map(|data| &data.value)
    }

    /// Returns a reference to the key-value pair associated with the given
    /// pointer.
    pub fn ptr_get_entry(&self, ptr: Ptr) -> Option<(&K, &V)> {
        self.list.get(ptr).map(|data| (&data.key, &data.value))
    }

    /// Returns a mutable reference to the key-value pair associated with the
    /// given pointer.
    pub fn ptr_get_entry_mut(&mut self, ptr: Ptr) -> Option<(&K, &mut V)> {
        self.list.get_mut(ptr).map(|data| (&data.key, &mut data.value))
    }

    /// Returns a mutable reference to the value associated with the given
    /// pointer.
    pub fn ptr_get_mut(&mut self, ptr: Ptr) -> Option<&mut V> {
        self.list.get_mut(ptr).map(|data| &mut data.value)
    }

    /// Returns a reference to the key associated with the given pointer.
    ///
    /// After a [`replace_key`](OrderedMap::replace_key), this observes the
    /// entry's current key.
    pub fn ptr_get_key(&self, ptr: Ptr) -> Option<&K> {
        self.list.get(ptr).map(|data| &data.key)
    }

    /// Returns the first entry in insertion order, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "foo");
    /// map.insert(2, "bar");
    ///
    /// let front = map.front().unwrap();
    /// assert_eq!(front.key(), &1);
    /// assert_eq!(front.value(), &"foo");
    /// ```
    pub fn front(&self) -> Option<Element<'_, K, V>> {
        let inx = self.list.head_inx()?;
        Some(Element::new(&self.list, inx))
    }

    /// Returns the last entry in insertion order, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "foo");
    /// map.insert(2, "bar");
    ///
    /// assert_eq!(map.back().unwrap().key(), &2);
    /// ```
    pub fn back(&self) -> Option<Element<'_, K, V>> {
        let inx = self.list.tail_inx()?;
        Some(Element::new(&self.list, inx))
    }

    /// Returns the first entry in insertion order with mutable access to its
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 10);
    ///
    /// *map.front_mut().unwrap().value_mut() += 1;
    /// assert_eq!(map.get(&1), Some(&11));
    /// ```
    pub fn front_mut(&mut self) -> Option<ElementMut<'_, K, V>> {
        let inx = self.list.head_inx()?;
        Some(ElementMut::new(&mut self.list, inx))
    }

    /// Returns the last entry in insertion order with mutable access to its
    /// value, or `None` if the map is empty.
    pub fn back_mut(&mut self) -> Option<ElementMut<'_, K, V>> {
        let inx = self.list.tail_inx()?;
        Some(ElementMut::new(&mut self.list, inx))
    }

    /// Returns the entry for the given pointer, or `None` if the pointer is
    /// invalid.
    pub fn element(&self, ptr: Ptr) -> Option<Element<'_, K, V>> {
        let inx = self.list.resolve(ptr)?;
        Some(Element::new(&self.list, inx))
    }

    /// Returns the entry for the given pointer with mutable access to its
    /// value, or `None` if the pointer is invalid.
    pub fn element_mut(&mut self, ptr: Ptr) -> Option<ElementMut<'_, K, V>> {
        let inx = self.list.resolve(ptr)?;
        Some(ElementMut::new(&mut self.list, inx))
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion
    /// order.
    ///
    /// The iterator element type is `(&'a K, &'a V)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// for (key, val) in map.iter() {
    ///     println!("key: {} val: {}", key, val);
    /// }
    /// ```
    pub fn iter<'s>(&'s self) -> Iter<'s, K, V> {
        Iter {
            forward: self.list.head_inx(),
            reverse: self.list.tail_inx(),
            list: &self.list,
        }
    }

    /// Returns an iterator over the keys of the map in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// let keys: Vec<_> = map.keys().collect();
    /// assert_eq!(keys, [&"a", &"b", &"c"]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values of the map in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// let values: Vec<_> = map.values().collect();
    /// assert_eq!(values, [&1, &2, &3]);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns a mutable iterator over the values of the map in insertion
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// for value in map.values_mut() {
    ///     *value *= 2;
    /// }
    ///
    /// let values: Vec<_> = map.values().collect();
    /// assert_eq!(values, [&2, &4, &6]);
    /// ```
    pub fn values_mut<'s>(&'s mut self) -> ValuesMut<'s, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Returns a mutable iterator over the key-value pairs of the map in
    /// insertion order.
    ///
    /// The iterator yields `(&K, &mut V)` pairs, keeping keys immutable while
    /// values can be modified in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// for (key, value) in map.iter_mut() {
    ///     if key == &"b" {
    ///         *value *= 10;
    ///     }
    /// }
    ///
    /// assert_eq!(map.get(&"b"), Some(&20));
    /// ```
    pub fn iter_mut<'s>(&'s mut self) -> IterMut<'s, K, V> {
        IterMut {
            forward: self.list.head_inx(),
            reverse: self.list.tail_inx(),
            slots: self.list.slots_base(),
            _list: PhantomData,
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> OrderedMap<K, V, S> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the
    /// entry is appended at the back (most recently inserted position).
    ///
    /// If the map did have this key present, the value is updated and the old
    /// value is returned. The entry keeps its position in insertion order and
    /// handles to it remain valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Some(&"c"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_full(key, value).1
    }

    /// Inserts a key-value pair and returns the pointer and any previous
    /// value.
    ///
    /// This method provides the same functionality as `insert` but also
    /// returns the handle of the inserted or updated entry. For an existing
    /// key, the returned pointer is the one issued when the key was first
    /// inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// let (ptr1, old) = map.insert_full("key1", 10);
    /// assert_eq!(old, None);
    ///
    /// let (ptr2, old) = map.insert_full("key1", 20);
    /// assert_eq!(old, Some(10));
    /// assert_eq!(ptr1, ptr2);
    ///
    /// assert_eq!(map.ptr_get(ptr1), Some(&20));
    /// ```
    pub fn insert_full(&mut self, key: K, value: V) -> (Ptr, Option<V>) {
        let hash = self.hasher.hash_one(&key);
        match self.table.entry(
            hash,
            |ptr| self.list.key_at(ptr.inx()) == &key,
            |ptr| self.list.hash_at(ptr.inx()),
        ) {
            hash_table::Entry::Occupied(entry) => {
                let ptr = *entry.get();
                let old = mem::replace(&mut self.list.data_at_mut(ptr.inx()).value, value);
                (ptr, Some(old))
            }
            hash_table::Entry::Vacant(entry) => {
                let ptr = self.list.push_back(hash, key, value);
                entry.insert(ptr);
                (ptr, None)
            }
        }
    }

    /// Returns the pointer to the entry with the given key.
    ///
    /// The pointer can then be used for direct access operations without
    /// additional key lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (inserted_ptr, _) = map.insert_full("key", 42);
    ///
    /// let found_ptr = map.get_ptr(&"key").unwrap();
    /// assert_eq!(inserted_ptr, found_ptr);
    ///
    /// assert_eq!(map.get_ptr(&"missing"), None);
    /// ```
    pub fn get_ptr(&self, key: &K) -> Option<Ptr> {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |ptr| self.list.key_at(ptr.inx()) == key)
            .copied()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table
            .find(self.hasher.hash_one(key), |ptr| {
                self.list.key_at(ptr.inx()) == key
            })
            .map(|ptr| &self.list.data_at(ptr.inx()).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ptr = self
            .table
            .find(self.hasher.hash_one(key), |ptr| {
                self.list.key_at(ptr.inx()) == key
            })
            .copied()?;
        Some(&mut self.list.data_at_mut(ptr.inx()).value)
    }

    /// Returns a reference to the value corresponding to the key, or the
    /// given default if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.get_or_default(&"a", &0), &1);
    /// assert_eq!(map.get_or_default(&"b", &0), &0);
    /// ```
    pub fn get_or_default<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_ptr(key).is_some()
    }

    /// Returns the entry with the given key, or `None` if the key is not
    /// present.
    ///
    /// The returned [`Element`] can navigate to neighboring entries in
    /// insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let element = map.get_element(&"b").unwrap();
    /// assert_eq!(element.value(), &2);
    /// assert_eq!(element.prev().unwrap().key(), &"a");
    /// ```
    pub fn get_element(&self, key: &K) -> Option<Element<'_, K, V>> {
        let ptr = self.get_ptr(key)?;
        Some(Element::new(&self.list, ptr.inx()))
    }

    /// Returns the entry with the given key with mutable access to its value,
    /// or `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    ///
    /// *map.get_element_mut(&"a").unwrap().value_mut() = 5;
    /// assert_eq!(map.get(&"a"), Some(&5));
    /// ```
    pub fn get_element_mut(&mut self, key: &K) -> Option<ElementMut<'_, K, V>> {
        let ptr = self.get_ptr(key)?;
        Some(ElementMut::new(&mut self.list, ptr.inx()))
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Handles to the removed entry become invalid. All other entries keep
    /// their positions and handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        if self.is_empty() {
            return None;
        }

        let hash = self.hasher.hash_one(key);
        match self
            .table
            .find_entry(hash, |ptr| self.list.key_at(ptr.inx()) == key)
        {
            Ok(entry) => {
                let ptr = entry.remove().0;
                let data = self.list.remove(ptr);
                Some((data.key, data.value))
            }
            Err(_) => None,
        }
    }

    /// Removes the entry for the given pointer, returning its key and value
    /// if the pointer was valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let (ptr, _) = map.insert_full("key", 42);
    ///
    /// assert_eq!(map.remove_ptr(ptr), Some(("key", 42)));
    /// assert_eq!(map.remove_ptr(ptr), None);
    /// ```
    pub fn remove_ptr(&mut self, ptr: Ptr) -> Option<(K, V)> {
        let hash = self.list.get(ptr)?.hash;
        match self.table.find_entry(hash, |candidate| *candidate == ptr) {
            Ok(entry) => {
                entry.remove();
                let data = self.list.remove(ptr);
                Some((data.key, data.value))
            }
            Err(_) => None,
        }
    }

    /// Renames the entry at `old_key` to `new_key`, keeping its value, its
    /// position in insertion order, and any handles to it.
    ///
    /// Returns `true` if the rename happened. Returns `false` and leaves the
    /// map completely untouched if `old_key` is not present or `new_key` is
    /// already present (including when both name the same entry).
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    /// map.insert(3, "three");
    ///
    /// assert!(map.replace_key(&2, 20));
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 20, 3]);
    /// assert_eq!(map.get(&20), Some(&"two"));
    ///
    /// // Missing original key, or a conflicting new key, changes nothing.
    /// assert!(!map.replace_key(&2, 99));
    /// assert!(!map.replace_key(&1, 3));
    /// ```
    pub fn replace_key(&mut self, old_key: &K, new_key: K) -> bool {
        if self.contains_key(&new_key) {
            return false;
        }

        let hash = self.hasher.hash_one(old_key);
        let ptr = match self
            .table
            .find_entry(hash, |ptr| self.list.key_at(ptr.inx()) == old_key)
        {
            Ok(entry) => entry.remove().0,
            Err(_) => return false,
        };

        let new_hash = self.hasher.hash_one(&new_key);
        self.list.set_key(ptr, new_key, new_hash);
        self.table
            .insert_unique(new_hash, ptr, |moved| self.list.hash_at(moved.inx()));
        true
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.clone(), value.clone());
        }
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self.list }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> Index<&K> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> IndexMut<&K> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn index_mut(&mut self, key: &K) -> &mut Self::Output {
        self.get_mut(key).expect("no entry found for key")
    }
}

impl<K, V, S> Index<Ptr> for OrderedMap<K, V, S> {
    type Output = V;

    fn index(&self, index: Ptr) -> &Self::Output {
        &self.list[index].value
    }
}

impl<K, V, S> IndexMut<Ptr> for OrderedMap<K, V, S> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        &mut self.list[index].value
    }
}
