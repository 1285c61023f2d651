//! Abstraction over the remote REST service.
//!
//! The core never talks HTTP itself; it drives this trait, and the sync
//! crate supplies the real client. Tests supply in-memory fakes.

use pence_domain::{Category, ItemAttrs, ItemId, Ymd};

use crate::caches::SyncSnapshot;
use crate::Result;

/// The validated field values for one line item, as sent to the server on
/// create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPayload {
    pub date: Ymd,
    pub label: String,
    pub cost: i64,
    pub attrs: ItemAttrs,
}

impl ItemPayload {
    /// The payload an existing item would produce if resubmitted untouched.
    /// Used to detect no-op edits before any network call.
    pub fn of(item: &pence_domain::LineItem) -> Self {
        Self {
            date: item.date,
            label: item.label.clone(),
            cost: item.cost,
            attrs: item.attrs.clone(),
        }
    }
}

/// Contract with the remote collaborator. Any non-success response maps to
/// an error and the caller treats the whole operation as a no-op.
pub trait RemoteStore {
    /// Bulk fetch of the full dataset, translated into domain shape.
    fn fetch_all(&self) -> Result<SyncSnapshot>;

    /// Creates an item; the server assigns and returns its id.
    fn create_item(&self, category: Category, item: &ItemPayload) -> Result<ItemId>;

    /// Updates an existing item in place.
    fn update_item(&self, category: Category, id: ItemId, item: &ItemPayload) -> Result<()>;
}
