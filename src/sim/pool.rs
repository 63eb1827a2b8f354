//! Fixed-capacity entity pools
//!
//! Slots are allocated once when the pool is built and reused for the rest of
//! the run. A slot is addressed by its [`SlotId`], which stays valid for the
//! lifetime of the pool; iteration is always in slot order.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Stable handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Entities that can live in a [`Pool`]
pub trait Poolable: Default {
    fn is_active(&self) -> bool;
    /// Return the slot to the free state
    fn deactivate(&mut self);
}

/// A fixed array of reusable slots
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Box<[T]>,
}

impl<T: Poolable> Pool<T> {
    /// Prewarm `capacity` inactive slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First free slot, or `None` when every slot is active
    ///
    /// The slot is not marked active; the caller activates it.
    pub fn acquire(&self) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|s| !s.is_active())
            .map(|i| SlotId(i as u32))
    }

    /// Deactivate a slot. Releasing a free slot or an unknown id is a no-op.
    pub fn release(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.deactivate();
        }
    }

    /// Visit active slots in slot order and release those where `f` returns
    /// true; `f` may mutate the slot first. Returns the number released.
    pub fn release_if(&mut self, mut f: impl FnMut(&mut T) -> bool) -> u32 {
        let mut released = 0;
        for i in 0..self.slots.len() {
            let slot = &mut self.slots[i];
            if slot.is_active() && f(slot) {
                self.release(SlotId(i as u32));
                released += 1;
            }
        }
        released
    }

    /// Deactivate every slot
    pub fn release_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.deactivate();
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.index())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.index())
    }

    /// Active slots in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, s)| (SlotId(i as u32), s))
    }

    /// Active slots in slot order, mutably
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, s)| (SlotId(i as u32), s))
    }
}

impl<T> Index<SlotId> for Pool<T> {
    type Output = T;

    fn index(&self, id: SlotId) -> &T {
        &self.slots[id.index()]
    }
}

impl<T> IndexMut<SlotId> for Pool<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        &mut self.slots[id.index()]
    }
}
