use std::collections::BTreeMap;
use crate::core::BodyHandle;
use crate::error::DiceError;
use crate::Result;

/// Storage for physics bodies
///
/// Handles are never reused, and iteration follows handle order so a run
/// with the same inputs visits bodies in the same order.
#[derive(Debug)]
pub struct BodyStorage<T> {
    items: BTreeMap<BodyHandle, T>,
    next_id: u32,
}

impl<T> BodyStorage<T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Removes an item from the storage
    pub fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        self.items.remove(&handle)
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all items from the storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.items.keys().copied().collect()
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| DiceError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| DiceError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_not_reused() {
        let mut storage = BodyStorage::new();
        let a = storage.add("a");
        storage.remove(a);
        let b = storage.add("b");

        assert_ne!(a, b);
        assert!(storage.get_body(a).is_err());
        assert_eq!(storage.get_body(b).copied(), Ok("b"));
        assert_eq!(storage.len(), 1);
    }
}
