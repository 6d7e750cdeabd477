use core::marker::PhantomData;

use crate::list::List;
use crate::list::SENTINEL;
use crate::list::Slot;

#[derive(Debug, Clone, Copy)]
/// An iterator over the entries of an `OrderedMap`.
///
/// This struct is created by the [`iter`] method on [`OrderedMap`]. See its
/// documentation for more.
///
/// [`iter`]: crate::ordered_map::OrderedMap::iter
/// [`OrderedMap`]: crate::ordered_map::OrderedMap
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
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct Iter<'a, K, V> {
    pub(crate) forward: Option<u32>,
    pub(crate) reverse: Option<u32>,
    pub(crate) list: &'a List<K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let inx = self.forward?;
        if self.forward == self.reverse {
            self.forward = None;
            self.reverse = None;
        } else {
            self.forward = self.list.next_inx(inx);
        }

        let data = self.list.data_at(inx);

        Some((&data.key, &data.value))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let inx = self.reverse?;
        if self.reverse == self.forward {
            self.reverse = None;
            self.forward = None;
        } else {
            self.reverse = self.list.prev_inx(inx);
        }

        let data = self.list.data_at(inx);

        Some((&data.key, &data.value))
    }
}

#[derive(Debug)]
/// An owning iterator over the entries of an `OrderedMap`.
///
/// This struct is created by the [`into_iter`] method on [`OrderedMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
/// [`OrderedMap`]: crate::ordered_map::OrderedMap
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
/// for (key, value) in map {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct IntoIter<K, V> {
    pub(crate) list: List<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.list.pop_front()?;
        Some((data.key, data.value))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let data = self.list.pop_back()?;
        Some((data.key, data.value))
    }
}

#[derive(Debug)]
/// A mutable iterator over the entries of an `OrderedMap`.
///
/// This struct is created by the [`iter_mut`] method on [`OrderedMap`]. See
/// its documentation for more.
///
/// [`iter_mut`]: crate::ordered_map::OrderedMap::iter_mut
/// [`OrderedMap`]: crate::ordered_map::OrderedMap
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
/// for (key, value) in map.iter_mut() {
///     *value *= 2;
/// }
///
/// assert_eq!(map.get(&"a"), Some(&2));
/// assert_eq!(map.get(&"b"), Some(&4));
/// ```
pub struct IterMut<'a, K, V> {
    pub(crate) forward: Option<u32>,
    pub(crate) reverse: Option<u32>,
    pub(crate) slots: *mut Slot<K, V>,
    pub(crate) _list: PhantomData<&'a mut List<K, V>>,
}

#[derive(Debug)]
/// A mutable iterator over the values of an `OrderedMap`.
///
/// This iterator yields `&mut V` values in the order their keys were inserted
/// into the map. It is created by the [`values_mut`] method on `OrderedMap`.
///
/// [`values_mut`]: crate::ordered_map::OrderedMap::values_mut
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
/// for value in map.values_mut() {
///     *value *= 10;
/// }
///
/// assert_eq!(map.get(&"a"), Some(&10));
/// assert_eq!(map.get(&"b"), Some(&20));
/// ```
pub struct ValuesMut<'a, K, V> {
    pub(crate) iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let inx = self.forward?;
        // SAFETY: We yield exactly one item per index: the walk stops where
        // the two ends meet, and indices on the ring are distinct. The base
        // pointer comes from the unique borrow of the list that this iterator
        // holds for 'a, and indices taken from the live ring are in bounds.
        let slot = unsafe { &mut *self.slots.add(inx as usize) };
        if self.forward == self.reverse {
            self.forward = None;
            self.reverse = None;
        } else {
            self.forward = (slot.next != SENTINEL).then_some(slot.next);
        }

        let data = slot.data.as_mut()?;
        Some((&data.key, &mut data.value))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let inx = self.reverse?;
        // SAFETY: See `next`.
        let slot = unsafe { &mut *self.slots.add(inx as usize) };
        if self.reverse == self.forward {
            self.reverse = None;
            self.forward = None;
        } else {
            self.reverse = (slot.prev != SENTINEL).then_some(slot.prev);
        }

        let data = slot.data.as_mut()?;
        Some((&data.key, &mut data.value))
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}
