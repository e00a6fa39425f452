// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage shared by the node arena and the object table.

use alloc::vec::Vec;

use crate::types::{NodeId, ObjectId};

/// A `(slot, generation)` handle into an [`Arena`].
pub(crate) trait Handle: Copy {
    fn from_parts(idx: u32, generation: u32) -> Self;
    fn idx(self) -> usize;
    fn generation(self) -> u32;
}

impl Handle for ObjectId {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    fn idx(self) -> usize {
        self.0 as usize
    }

    fn generation(self) -> u32 {
        self.1
    }
}

impl Handle for NodeId {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    fn idx(self) -> usize {
        self.0 as usize
    }

    fn generation(self) -> u32 {
        self.1
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn insert<H: Handle>(&mut self, value: T) -> H {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(value);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles use 32-bit indices by design."
            )]
            H::from_parts(idx as u32, generation)
        } else {
            self.slots.push(Some(value));
            self.generations.push(1);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles use 32-bit indices by design."
            )]
            H::from_parts((self.slots.len() - 1) as u32, 1)
        }
    }

    pub(crate) fn remove<H: Handle>(&mut self, h: H) -> Option<T> {
        if !self.is_alive(h) {
            return None;
        }
        self.len -= 1;
        self.free_list.push(h.idx());
        self.slots[h.idx()].take()
    }

    pub(crate) fn is_alive<H: Handle>(&self, h: H) -> bool {
        self.slots.get(h.idx()).is_some_and(Option::is_some)
            && self.generations[h.idx()] == h.generation()
    }

    pub(crate) fn get<H: Handle>(&self, h: H) -> Option<&T> {
        if !self.is_alive(h) {
            return None;
        }
        self.slots[h.idx()].as_ref()
    }

    pub(crate) fn get_mut<H: Handle>(&mut self, h: H) -> Option<&mut T> {
        if !self.is_alive(h) {
            return None;
        }
        self.slots[h.idx()].as_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Drop every value. Generations are kept so old handles stay stale.
    pub(crate) fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            *slot = None;
            self.free_list.push(idx);
        }
        self.len = 0;
    }

    pub(crate) fn iter<H: Handle>(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles use 32-bit indices by design."
            )]
            let h = H::from_parts(idx as u32, self.generations[idx]);
            slot.as_ref().map(|v| (h, v))
        })
    }
}
