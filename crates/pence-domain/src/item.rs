//! Line items: the individual ledger entries listed on each page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::Ymd;

/// Server-assigned identifier, unique per category.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category-specific attributes, keyed by category so the type system
/// enforces which extra fields exist per page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ItemAttrs {
    /// Income and bills carry nothing beyond the core fields.
    Plain,
    /// Food and general items record what kind of thing was bought and where.
    Consumable { category: String, shop: String },
    /// Holiday items record which trip they belong to and where they were bought.
    Holiday { holiday: String, shop: String },
    /// Social items record the venue.
    Social { shop: String },
    /// Fund holdings track accumulated units and the latest unit price.
    Funds { units: f64, latest_price: Option<f64> },
}

impl ItemAttrs {
    /// Current market value of a fund holding, in pence. Truncates to whole
    /// pence. `None` when no price has been scraped yet, or for non-fund
    /// attributes.
    pub fn fund_value(&self) -> Option<i64> {
        match self {
            ItemAttrs::Funds {
                units,
                latest_price: Some(price),
            } => Some((units * price) as i64),
            _ => None,
        }
    }
}

/// One entry in a category's page: a dated, labelled cost plus any
/// category-specific attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: ItemId,
    pub date: Ymd,
    pub label: String,
    /// Cost in integer minor units (pence).
    pub cost: i64,
    pub attrs: ItemAttrs,
}

impl LineItem {
    pub fn new(id: ItemId, date: Ymd, label: impl Into<String>, cost: i64, attrs: ItemAttrs) -> Self {
        Self {
            id,
            date,
            label: label.into(),
            cost,
            attrs,
        }
    }

    /// Merges a partial update; fields absent from the patch are unchanged.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(attrs) = patch.attrs {
            self.attrs = attrs;
        }
    }
}

/// A partial field update submitted from the edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub date: Option<Ymd>,
    pub label: Option<String>,
    pub cost: Option<i64>,
    pub attrs: Option<ItemAttrs>,
}
