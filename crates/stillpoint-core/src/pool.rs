//! Fixed-capacity arena with a free list and generation counters.
//!
//! Rings, burst particles and background orbs all live in one of these so a
//! frame never allocates. A `Handle` names a slot *and* the generation it was
//! issued for; once the slot is freed and reused the old handle goes stale.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena is full (capacity {0})")]
    Full(usize),
    #[error("stale handle for slot {index} (generation {generation})")]
    Stale { index: usize, generation: u32 },
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                value: None,
            })
            .collect();
        // Pop order hands out low indices first.
        let free = (0..capacity as u32).rev().collect();
        Self {
            slots,
            free,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    pub fn insert(&mut self, value: T) -> Result<Handle, ArenaError> {
        let index = self.free.pop().ok_or(ArenaError::Full(self.slots.len()))?;
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.live += 1;
        Ok(Handle {
            index,
            generation: slot.generation,
        })
    }

    pub fn remove(&mut self, handle: Handle) -> Result<T, ArenaError> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation && s.value.is_some())
            .ok_or(ArenaError::Stale {
                index: handle.index(),
                generation: handle.generation,
            })?;
        let value = slot.value.take().ok_or(ArenaError::Stale {
            index: handle.index(),
            generation: handle.generation,
        })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Ok(value)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_mut())
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.value.as_mut().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation,
                    },
                    v,
                )
            })
        })
    }

    /// Free every live slot for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let drop_it = match slot.value.as_mut() {
                Some(v) => !keep(v),
                None => false,
            };
            if drop_it {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
                self.live -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_handle_goes_stale_and_slot_is_reused() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.insert("a").unwrap();
        let b = arena.insert("b").unwrap();
        assert_eq!(arena.insert("c"), Err(ArenaError::Full(2)));
        assert_eq!(arena.remove(a), Ok("a"));
        assert!(!arena.contains(a));
        assert!(matches!(arena.remove(a), Err(ArenaError::Stale { .. })));

        let c = arena.insert("c").unwrap();
        assert_eq!(c.index(), a.index());
        assert_eq!(c.generation(), a.generation() + 1);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn retain_frees_slots() {
        let mut arena = Arena::with_capacity(4);
        let handles: Vec<_> = (0..4).map(|i| arena.insert(i).unwrap()).collect();
        arena.retain(|v| *v % 2 == 0);
        assert_eq!(arena.len(), 2);
        assert!(arena.contains(handles[0]));
        assert!(!arena.contains(handles[1]));
        assert!(arena.insert(9).is_ok());
        assert!(arena.insert(9).is_ok());
        assert!(arena.is_full());
    }
}
