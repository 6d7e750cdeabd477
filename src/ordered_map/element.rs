use core::fmt;

use crate::Ptr;
use crate::list::List;

/// A borrowed view of one entry of an
/// [`OrderedMap`](crate::ordered_map::OrderedMap), able to step to
/// neighboring entries in insertion order.
///
/// This struct is created by the [`front`], [`back`], [`get_element`], and
/// [`element`] methods on [`OrderedMap`](crate::ordered_map::OrderedMap).
///
/// [`front`]: crate::ordered_map::OrderedMap::front
/// [`back`]: crate::ordered_map::OrderedMap::back
/// [`get_element`]: crate::ordered_map::OrderedMap::get_element
/// [`element`]: crate::ordered_map::OrderedMap::element
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
/// let mut keys = Vec::new();
/// let mut element = map.front();
/// while let Some(current) = element {
///     keys.push(*current.key());
///     element = current.next();
/// }
/// assert_eq!(keys, ["a", "b"]);
/// ```
pub struct Element<'a, K, V> {
    list: &'a List<K, V>,
    inx: u32,
}

impl<K, V> Clone for Element<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Element<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Element<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

impl<'a, K, V> Element<'a, K, V> {
    pub(crate) fn new(list: &'a List<K, V>, inx: u32) -> Self {
        Element { list, inx }
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &'a K {
        &self.list.data_at(self.inx).key
    }

    /// Returns a reference to the entry's value.
    pub fn value(&self) -> &'a V {
        &self.list.data_at(self.inx).value
    }

    /// Returns the handle of this entry.
    pub fn ptr(&self) -> Ptr {
        self.list.ptr_at(self.inx)
    }

    /// Returns the entry after this one in insertion order, or `None` at the
    /// back of the map.
    pub fn next(&self) -> Option<Element<'a, K, V>> {
        let inx = self.list.next_inx(self.inx)?;
        Some(Element {
            list: self.list,
            inx,
        })
    }

    /// Returns the entry before this one in insertion order, or `None` at the
    /// front of the map.
    pub fn prev(&self) -> Option<Element<'a, K, V>> {
        let inx = self.list.prev_inx(self.inx)?;
        Some(Element {
            list: self.list,
            inx,
        })
    }
}

/// A borrowed view of one entry of an
/// [`OrderedMap`](crate::ordered_map::OrderedMap) with mutable access to the
/// entry's value.
///
/// Stepping with [`next`](ElementMut::next) or [`prev`](ElementMut::prev)
/// consumes the handle, since only one entry may be borrowed mutably at a
/// time.
///
/// This struct is created by the [`front_mut`], [`back_mut`],
/// [`get_element_mut`], and [`element_mut`] methods on
/// [`OrderedMap`](crate::ordered_map::OrderedMap).
///
/// [`front_mut`]: crate::ordered_map::OrderedMap::front_mut
/// [`back_mut`]: crate::ordered_map::OrderedMap::back_mut
/// [`get_element_mut`]: crate::ordered_map::OrderedMap::get_element_mut
/// [`element_mut`]: crate::ordered_map::OrderedMap::element_mut
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
/// let mut element = map.front_mut();
/// while let Some(mut current) = element {
///     *current.value_mut() *= 10;
///     element = current.next();
/// }
///
/// let values: Vec<_> = map.values().collect();
/// assert_eq!(values, [&10, &20]);
/// ```
pub struct ElementMut<'a, K, V> {
    list: &'a mut List<K, V>,
    inx: u32,
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ElementMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementMut")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

impl<'a, K, V> ElementMut<'a, K, V> {
    pub(crate) fn new(list: &'a mut List<K, V>, inx: u32) -> Self {
        ElementMut { list, inx }
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        &self.list.data_at(self.inx).key
    }

    /// Returns a reference to the entry's value.
    pub fn value(&self) -> &V {
        &self.list.data_at(self.inx).value
    }

    /// Returns a mutable reference to the entry's value.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.list.data_at_mut(self.inx).value
    }

    /// Consumes the handle, returning a mutable reference to the entry's
    /// value that lives as long as the underlying map borrow.
    pub fn into_mut(self) -> &'a mut V {
        let ElementMut { list, inx } = self;
        &mut list.data_at_mut(inx).value
    }

    /// Returns the handle of this entry.
    pub fn ptr(&self) -> Ptr {
        self.list.ptr_at(self.inx)
    }

    /// Steps to the entry after this one in insertion order, consuming this
    /// handle. Returns `None` at the back of the map.
    pub fn next(self) -> Option<ElementMut<'a, K, V>> {
        let ElementMut { list, inx } = self;
        let inx = list.next_inx(inx)?;
        Some(ElementMut { list, inx })
    }

    /// Steps to the entry before this one in insertion order, consuming this
    /// handle. Returns `None` at the front of the map.
    pub fn prev(self) -> Option<ElementMut<'a, K, V>> {
        let ElementMut { list, inx } = self;
        let inx = list.prev_inx(inx)?;
        Some(ElementMut { list, inx })
    }
}
