//! In-memory item store.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::model::{Item, ItemInput};

/// The authoritative collection of items plus the id counter.
///
/// Ids start at 1, grow by one per create and are never reused, so ordering
/// the map by id is also creation order. One lock covers both the map and
/// the counter; nothing awaits while it is held.
#[derive(Debug)]
pub struct ItemStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    items: BTreeMap<u64, Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { items: BTreeMap::new(), next_id: 1 }),
        }
    }

    /// All items, oldest first.
    pub fn list_all(&self) -> Vec<Item> {
        self.inner.lock().items.values().cloned().collect()
    }

    pub fn create(&self, fields: ItemInput) -> Item {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let item = Item::from_input(id, fields);
        inner.items.insert(id, item.clone());
        item
    }

    pub fn get(&self, id: u64) -> Option<Item> {
        self.inner.lock().items.get(&id).cloned()
    }

    /// Replaces every mutable field of item `id`. `None` if it does not exist.
    pub fn update(&self, id: u64, fields: ItemInput) -> Option<Item> {
        let mut inner = self.inner.lock();
        let slot = inner.items.get_mut(&id)?;
        *slot = Item::from_input(id, fields);
        Some(slot.clone())
    }

    /// Removes item `id`, returning the removed record.
    pub fn remove(&self, id: u64) -> Option<Item> {
        self.inner.lock().items.remove(&id)
    }

    /// `true` if item `id` existed and was removed.
    pub fn delete(&self, id: u64) -> bool {
        self.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ItemStore {
    fn default() -> Self { Self::new() }
}
