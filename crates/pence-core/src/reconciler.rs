//! Keeps the caches consistent when a line item is added or edited.
//!
//! A submission is all-or-nothing from the caller's perspective:
//! validation and the remote round-trip happen before any cache write, so
//! a failure at any step leaves every cache untouched.

use pence_domain::{Category, ItemId, ItemPatch, LineItem};
use tracing::{debug, info};

use crate::caches::Caches;
use crate::error::{CoreError, Result};
use crate::forecast::{recompute, DerivedOverview};
use crate::form::{validate, FormValues};
use crate::remote::{ItemPayload, RemoteStore};

/// What a submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every field matched its last-known value: no network call, no
    /// mutation, the form simply closes.
    Unchanged,
    /// The item was created or updated; dependent views should re-render
    /// from the fresh derived columns.
    Applied {
        id: ItemId,
        derived: DerivedOverview,
    },
}

/// Drives add/edit form submissions against the caches and the remote
/// service.
pub struct Reconciler<'a, R: RemoteStore> {
    caches: &'a mut Caches,
    remote: &'a R,
}

impl<'a, R: RemoteStore> Reconciler<'a, R> {
    pub fn new(caches: &'a mut Caches, remote: &'a R) -> Self {
        Self { caches, remote }
    }

    /// Submits an add (`position: None`) or edit (`position: Some`) form
    /// for one category.
    pub fn submit(
        &mut self,
        category: Category,
        position: Option<usize>,
        values: &FormValues,
    ) -> Result<Outcome> {
        // Nothing can be reconciled into an unloaded overview; fail before
        // touching the network.
        self.caches.overview.data()?;

        let old = match position {
            Some(pos) => Some(
                self.caches
                    .page(category)
                    .and_then(|page| page.get(pos))
                    .ok_or(CoreError::ItemNotFound(pos))?
                    .clone(),
            ),
            None => None,
        };

        let payload = validate(category, values, old.as_ref().map(|item| &item.attrs))?;

        if let Some(old_item) = &old {
            if payload == ItemPayload::of(old_item) {
                debug!(%category, id = %old_item.id, "no fields changed, skipping submit");
                return Ok(Outcome::Unchanged);
            }
        }

        let (id, old_month, old_cost) = match (&old, position) {
            (Some(old_item), Some(pos)) => {
                self.remote.update_item(category, old_item.id, &payload)?;
                let patch = ItemPatch {
                    date: Some(payload.date),
                    label: Some(payload.label.clone()),
                    cost: Some(payload.cost),
                    attrs: Some(payload.attrs.clone()),
                };
                self.caches.page_mut(category).update_at(pos, patch)?;
                (old_item.id, old_item.date.year_month(), old_item.cost)
            }
            _ => {
                let id = self.remote.create_item(category, &payload)?;
                self.caches.page_mut(category).insert(LineItem::new(
                    id,
                    payload.date,
                    payload.label.clone(),
                    payload.cost,
                    payload.attrs.clone(),
                ));
                // creation contributes nothing to remove
                (id, payload.date.year_month(), 0)
            }
        };

        self.caches.overview.reconcile(
            category,
            old_month,
            old_cost,
            payload.date.year_month(),
            payload.cost,
        )?;

        let derived = recompute(self.caches.overview.data()?);
        info!(%category, %id, cost = payload.cost, "item reconciled");
        Ok(Outcome::Applied { id, derived })
    }

    /// Full refresh: bulk-fetches the dataset, replaces the caches and
    /// derives the overview columns for display.
    pub fn refresh(&mut self) -> Result<DerivedOverview> {
        let snapshot = self.remote.fetch_all()?;
        self.caches.load(snapshot)?;
        Ok(recompute(self.caches.overview.data()?))
    }
}
