#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod list;
pub mod ordered_map;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// A hash map that remembers the order keys were first inserted, implemented
/// as a doubly-linked list threaded through a slot arena and indexed by a
/// hash table for O(1) lookups.
///
/// This is the main type alias using the default hasher. For custom hashers,
/// use [`ordered_map::OrderedMap`] directly.
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
/// // Iterates in insertion order
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;
use core::num::NonZeroU32;

pub use ordered_map::Element;
pub use ordered_map::ElementMut;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::IterMut;
pub use ordered_map::ValuesMut;

/// A handle to an entry of an [`OrderedMap`](crate::ordered_map::OrderedMap).
///
/// A `Ptr` is issued when an entry is inserted and stays valid until that
/// entry is removed or the map is cleared, no matter how the map is mutated
/// in between. Updating an entry's value, or renaming its key through
/// [`replace_key`](crate::ordered_map::OrderedMap::replace_key), does not
/// invalidate handles to it.
///
/// Handles carry a generation tag alongside the slot index, so a `Ptr` whose
/// entry is gone is reliably rejected even after the map recycles the slot
/// for a new entry. Handles are only meaningful for the map that issued them;
/// handles from one map are rejected or resolve arbitrarily on another map
/// (including a clone), but never touch invalid memory.
///
/// `Option<Ptr>` is the same size as `Ptr`.
///
/// # Examples
///
/// ```
/// use tandem_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// let (ptr, _) = map.insert_full("key", 42);
///
/// assert_eq!(map.ptr_get(ptr), Some(&42));
///
/// map.remove(&"key");
/// assert_eq!(map.ptr_get(ptr), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ptr {
    inx: u32,
    gen: NonZeroU32,
}

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({}v{})", self.inx, self.gen)
    }
}

impl Ptr {
    pub(crate) fn new(inx: u32, gen: NonZeroU32) -> Self {
        Ptr { inx, gen }
    }

    pub(crate) fn inx(self) -> u32 {
        self.inx
    }

    pub(crate) fn index(self) -> usize {
        self.inx as usize
    }

    pub(crate) fn generation(self) -> NonZeroU32 {
        self.gen
    }
}
