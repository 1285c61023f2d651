//! Per-category in-memory store of line items.

use std::collections::HashMap;

use pence_domain::{ItemId, ItemPatch, LineItem};

use crate::error::{CoreError, Result};

/// Insertion-ordered collection of line items for one category.
///
/// Positions are stable: inserting never disturbs the position of existing
/// items, so view indices captured before an insert remain valid. There is
/// no removal operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCache {
    order: Vec<ItemId>,
    items: HashMap<ItemId, LineItem>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item at the next position.
    pub fn insert(&mut self, item: LineItem) {
        self.order.push(item.id);
        self.items.insert(item.id, item);
    }

    pub fn get(&self, position: usize) -> Option<&LineItem> {
        let id = self.order.get(position)?;
        self.items.get(id)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&LineItem> {
        self.items.get(&id)
    }

    /// Merges a partial update into the item at `position`. Fields absent
    /// from the patch keep their current values.
    pub fn update_at(&mut self, position: usize, patch: ItemPatch) -> Result<&LineItem> {
        let id = *self
            .order
            .get(position)
            .ok_or(CoreError::ItemNotFound(position))?;
        let item = self
            .items
            .get_mut(&id)
            .ok_or(CoreError::ItemNotFound(position))?;
        item.apply(patch);
        Ok(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Items in display order: newest date first, ties broken by highest id.
    pub fn iter_sorted(&self) -> Vec<&LineItem> {
        let mut items: Vec<&LineItem> = self.iter().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        items
    }
}
