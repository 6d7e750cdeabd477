use alloc::vec::Vec;
use core::num::NonZeroU32;
use core::ops::Index;
use core::ops::IndexMut;

use crate::Ptr;

/// Slot index of the sentinel. The sentinel is never vacant, so the same
/// index doubles as the free-list terminator.
pub(crate) const SENTINEL: u32 = 0;

#[cold]
#[inline(never)]
pub(crate) fn stale_ptr() -> ! {
    panic!("invalid or stale Ptr");
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow: the map holds at most u32::MAX - 1 entries");
}

/// Index of the slot about to be pushed. Lengths the 32-bit links cannot
/// address are rejected in release builds too; `len as u32` would wrap to
/// `SENTINEL` and splice the sentinel into the ring as an entry.
fn next_slot_index(len: usize) -> u32 {
    if len >= u32::MAX as usize {
        capacity_overflow();
    }
    len as u32
}

#[derive(Debug)]
pub(crate) struct NodeData<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) prev: u32,
    /// For vacant slots this is the next free slot index instead.
    pub(crate) next: u32,
    pub(crate) gen: NonZeroU32,
    pub(crate) data: Option<NodeData<K, V>>,
}

/// The linked sequence: an arena of slots threaded into a circular
/// doubly-linked ring through the sentinel at slot 0. Insertion order is the
/// ring order. Vacant slots are chained into a free list through their `next`
/// field and recycled before the slot vector grows.
///
/// Every allocation is stamped from `next_gen`, a counter that only moves
/// forward, so a `Ptr` issued for a previous occupant of a recycled slot can
/// never pass the tag comparison. The counter wraps after `u32::MAX`
/// allocations, which is out of practical reach for a single map.
#[derive(Debug)]
pub(crate) struct List<K, V> {
    slots: Vec<Slot<K, V>>,
    /// Head of the vacant-slot chain, `SENTINEL` when there is none.
    free_head: u32,
    /// Tag for the next allocation.
    next_gen: NonZeroU32,
    len: usize,
}

impl<K, V> List<K, V> {
    pub(crate) fn new() -> Self {
        List {
            slots: Vec::new(),
            free_head: SENTINEL,
            next_gen: NonZeroU32::MIN,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut list = List::new();
        if capacity > 0 {
            // One extra slot for the sentinel.
            list.slots = Vec::with_capacity(capacity + 1);
        }
        list
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First slot of the ring, `SENTINEL` when the sequence is empty. The
    /// sentinel slot is created lazily, so an unallocated slot vector also
    /// reads as the empty ring.
    fn head(&self) -> u32 {
        self.slots.first().map_or(SENTINEL, |sentinel| sentinel.next)
    }

    /// Last slot of the ring, `SENTINEL` when the sequence is empty.
    fn tail(&self) -> u32 {
        self.slots.first().map_or(SENTINEL, |sentinel| sentinel.prev)
    }

    fn ptr_of(&self, inx: u32) -> Option<Ptr> {
        if inx == SENTINEL {
            None
        } else {
            Some(self.ptr_at(inx))
        }
    }

    pub(crate) fn ptr_at(&self, inx: u32) -> Ptr {
        Ptr::new(inx, self.slots[inx as usize].gen)
    }

    pub(crate) fn head_inx(&self) -> Option<u32> {
        let head = self.head();
        (head != SENTINEL).then_some(head)
    }

    pub(crate) fn tail_inx(&self) -> Option<u32> {
        let tail = self.tail();
        (tail != SENTINEL).then_some(tail)
    }

    pub(crate) fn front(&self) -> Option<Ptr> {
        self.ptr_of(self.head())
    }

    pub(crate) fn back(&self) -> Option<Ptr> {
        self.ptr_of(self.tail())
    }

    /// Ring step toward the back, `None` at the boundary. The slot at `inx`
    /// must be occupied.
    pub(crate) fn next_inx(&self, inx: u32) -> Option<u32> {
        let next = self.slots[inx as usize].next;
        (next != SENTINEL).then_some(next)
    }

    /// Ring step toward the front, `None` at the boundary. The slot at `inx`
    /// must be occupied.
    pub(crate) fn prev_inx(&self, inx: u32) -> Option<u32> {
        let prev = self.slots[inx as usize].prev;
        (prev != SENTINEL).then_some(prev)
    }

    pub(crate) fn next(&self, ptr: Ptr) -> Option<Ptr> {
        let inx = self.resolve(ptr)?;
        self.ptr_of(self.slots[inx as usize].next)
    }

    pub(crate) fn prev(&self, ptr: Ptr) -> Option<Ptr> {
        let inx = self.resolve(ptr)?;
        self.ptr_of(self.slots[inx as usize].prev)
    }

    /// Slot index for a live handle, `None` if the handle is out of range,
    /// outlived its node, or tags a recycled slot.
    pub(crate) fn resolve(&self, ptr: Ptr) -> Option<u32> {
        let slot = self.slots.get(ptr.index())?;
        (slot.gen == ptr.generation() && slot.data.is_some()).then_some(ptr.inx())
    }

    pub(crate) fn contains(&self, ptr: Ptr) -> bool {
        self.resolve(ptr).is_some()
    }

    pub(crate) fn get(&self, ptr: Ptr) -> Option<&NodeData<K, V>> {
        let slot = self.slots.get(ptr.index())?;
        if slot.gen != ptr.generation() {
            return None;
        }
        slot.data.as_ref()
    }

    pub(crate) fn get_mut(&mut self, ptr: Ptr) -> Option<&mut NodeData<K, V>> {
        let slot = self.slots.get_mut(ptr.index())?;
        if slot.gen != ptr.generation() {
            return None;
        }
        slot.data.as_mut()
    }

    /// Payload of an occupied slot. Panics on a vacant slot; callers pass
    /// indices taken from the live ring.
    pub(crate) fn data_at(&self, inx: u32) -> &NodeData<K, V> {
        match self.slots[inx as usize].data.as_ref() {
            Some(data) => data,
            None => stale_ptr(),
        }
    }

    pub(crate) fn data_at_mut(&mut self, inx: u32) -> &mut NodeData<K, V> {
        match self.slots[inx as usize].data.as_mut() {
            Some(data) => data,
            None => stale_ptr(),
        }
    }

    pub(crate) fn key_at(&self, inx: u32) -> &K {
        &self.data_at(inx).key
    }

    pub(crate) fn hash_at(&self, inx: u32) -> u64 {
        self.data_at(inx).hash
    }

    /// Appends a node immediately before the sentinel and returns its handle.
    /// Panics when the arena already holds `u32::MAX - 1` entries, the most
    /// its 32-bit slot indices can address.
    pub(crate) fn push_back(&mut self, hash: u64, key: K, value: V) -> Ptr {
        if self.slots.is_empty() {
            self.slots.push(Slot {
                prev: SENTINEL,
                next: SENTINEL,
                gen: NonZeroU32::MIN,
                data: None,
            });
        }

        let gen = self.next_gen;
        self.next_gen = NonZeroU32::new(gen.get().wrapping_add(1)).unwrap_or(NonZeroU32::MIN);

        let tail = self.slots[SENTINEL as usize].prev;
        let data = NodeData { hash, key, value };
        let inx = if self.free_head != SENTINEL {
            let inx = self.free_head;
            let slot = &mut self.slots[inx as usize];
            self.free_head = slot.next;
            slot.prev = tail;
            slot.next = SENTINEL;
            slot.gen = gen;
            slot.data = Some(data);
            inx
        } else {
            let inx = next_slot_index(self.slots.len());
            self.slots.push(Slot {
                prev: tail,
                next: SENTINEL,
                gen,
                data: Some(data),
            });
            inx
        };

        self.slots[tail as usize].next = inx;
        self.slots[SENTINEL as usize].prev = inx;
        self.len += 1;
        Ptr::new(inx, gen)
    }

    /// Splices the node out of the ring and recycles its slot. Panics on a
    /// stale handle.
    pub(crate) fn remove(&mut self, ptr: Ptr) -> NodeData<K, V> {
        match self.resolve(ptr) {
            Some(inx) => self.take_at(inx),
            None => stale_ptr(),
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<NodeData<K, V>> {
        let head = self.head();
        (head != SENTINEL).then(|| self.take_at(head))
    }

    pub(crate) fn pop_back(&mut self) -> Option<NodeData<K, V>> {
        let tail = self.tail();
        (tail != SENTINEL).then(|| self.take_at(tail))
    }

    fn take_at(&mut self, inx: u32) -> NodeData<K, V> {
        let free_head = self.free_head;
        let slot = &mut self.slots[inx as usize];
        let data = match slot.data.take() {
            Some(data) => data,
            None => stale_ptr(),
        };
        let prev = slot.prev;
        let next = slot.next;
        slot.next = free_head;
        self.free_head = inx;

        self.slots[prev as usize].next = next;
        self.slots[next as usize].prev = prev;
        self.len -= 1;
        data
    }

    /// Relabels an occupied node in place: new key, new cached hash, links
    /// and therefore ring position untouched. Panics on a stale handle.
    pub(crate) fn set_key(&mut self, ptr: Ptr, key: K, hash: u64) {
        match self.get_mut(ptr) {
            Some(data) => {
                data.key = key;
                data.hash = hash;
            }
            None => stale_ptr(),
        }
    }

    /// Drops every node but keeps the slot allocation. The generation counter
    /// keeps running, so handles issued before the clear stay stale forever.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        if let Some(sentinel) = self.slots.first_mut() {
            sentinel.prev = SENTINEL;
            sentinel.next = SENTINEL;
        }
        self.free_head = SENTINEL;
        self.len = 0;
    }

    /// Base pointer of the slot vector, for the mutable iterator.
    pub(crate) fn slots_base(&mut self) -> *mut Slot<K, V> {
        self.slots.as_mut_ptr()
    }
}

impl<K, V> Index<Ptr> for List<K, V> {
    type Output = NodeData<K, V>;

    fn index(&self, index: Ptr) -> &Self::Output {
        match self.get(index) {
            Some(data) => data,
            None => stale_ptr(),
        }
    }
}

impl<K, V> IndexMut<Ptr> for List<K, V> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(data) => data,
            None => stale_ptr(),
        }
    }
}
